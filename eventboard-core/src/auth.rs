//! Local user accounts keyed by email.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::{EventBoardError, EventBoardResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub username: String,
    pub salt: String,
    pub password_hash: String,
}

impl User {
    fn verify(&self, password: &str) -> bool {
        hash_password(&self.salt, password) == self.password_hash
    }
}

/// The signed-in user, as persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "_id")]
    pub user_id: String,
    pub email: String,
    pub username: String,
}

impl From<&User> for Session {
    fn from(user: &User) -> Self {
        Session {
            user_id: user.id.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserStore {
    users: Vec<User>,
}

impl UserStore {
    pub fn new(users: Vec<User>) -> Self {
        UserStore { users }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find(&self, email: &str) -> Option<&User> {
        let email = normalize_email(email);
        self.users.iter().find(|u| u.email == email)
    }

    /// Register a new account. Emails are compared case-insensitively.
    pub fn signup(&mut self, email: &str, username: &str, password: &str) -> EventBoardResult<&User> {
        let email = normalize_email(email);
        if !email.contains('@') {
            return Err(EventBoardError::invalid_field("email", "must be an email address"));
        }
        if username.trim().is_empty() {
            return Err(EventBoardError::invalid_field("username", "must not be empty"));
        }
        if password.is_empty() {
            return Err(EventBoardError::invalid_field("password", "must not be empty"));
        }
        if self.find(&email).is_some() {
            return Err(EventBoardError::EmailTaken(email));
        }

        let salt = uuid::Uuid::new_v4().simple().to_string();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            username: username.trim().to_string(),
            password_hash: hash_password(&salt, password),
            salt,
        };

        info!(email = %user.email, "registered user");
        self.users.push(user);
        Ok(&self.users[self.users.len() - 1])
    }

    pub fn login(&self, email: &str, password: &str) -> EventBoardResult<Session> {
        let user = self
            .find(email)
            .filter(|u| u.verify(password))
            .ok_or(EventBoardError::InvalidCredentials)?;

        info!(email = %user.email, "logged in");
        Ok(Session::from(user))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
