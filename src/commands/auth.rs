use anyhow::{Context as _, Result};
use dialoguer::Input;
use owo_colors::OwoColorize;

use super::Context;

pub fn signup(ctx: &Context, email: Option<String>, username: Option<String>) -> Result<()> {
    let email = match email {
        Some(e) => e,
        None => prompt_text("  Email")?,
    };
    let username = match username {
        Some(u) => u,
        None => prompt_text("  Username")?,
    };

    let password = prompt_password("  Password")?;
    let confirm = prompt_password("  Confirm password")?;
    if password != confirm {
        anyhow::bail!("Passwords do not match");
    }

    let mut users = ctx.storage.load_users().context("Failed to load accounts")?;
    let user = users.signup(&email, &username, &password)?;
    let email = user.email.clone();
    ctx.storage.save_users(&users).context("Failed to save accounts")?;

    println!("{}", "  Registered successfully".green());
    println!("  Sign in with: eventboard login --email {}", email);
    Ok(())
}

pub fn login(ctx: &Context, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(e) => e,
        None => prompt_text("  Email")?,
    };
    let password = prompt_password("  Password")?;

    let users = ctx.storage.load_users().context("Failed to load accounts")?;
    let session = users.login(&email, &password)?;

    ctx.storage.save_session(&session).context("Failed to save session")?;
    println!("{}", format!("  Welcome, {}", session.username).green());
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    ctx.storage.clear_session().context("Failed to clear session")?;
    println!("{}", "  Logged out".dimmed());
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<()> {
    match ctx.storage.load_session().context("Failed to read session")? {
        Some(session) => println!("{} <{}>", session.username, session.email),
        None => println!("{}", "Not logged in".dimmed()),
    }
    Ok(())
}

fn prompt_text(label: &str) -> Result<String> {
    Ok(Input::<String>::new().with_prompt(label).interact_text()?)
}

/// Prompt the user for password input (hidden).
fn prompt_password(label: &str) -> Result<String> {
    let prompt = format!("{}: ", label);
    rpassword::prompt_password(&prompt).context("Failed to read password")
}
