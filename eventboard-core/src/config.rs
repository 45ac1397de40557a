//! Global eventboard configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{EventBoardError, EventBoardResult};
use crate::interval::BoundaryPolicy;
use crate::storage::LocalStorage;

static DEFAULT_DATA_DIR: &str = "~/.eventboard";
const DEFAULT_PAGE_SIZE: usize = 5;

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Configuration at ~/.config/eventboard/config.toml
///
/// Every key may also be set through an `EVENTBOARD_`-prefixed
/// environment variable, e.g. `EVENTBOARD_OVERLAP_POLICY=closed`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BoardConfig {
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// IANA zone used to read dates typed without an offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<Tz>,

    #[serde(default)]
    pub overlap_policy: BoundaryPolicy,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            data_dir: default_data_dir(),
            timezone: None,
            overlap_policy: BoundaryPolicy::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl BoardConfig {
    pub fn config_path() -> EventBoardResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventBoardError::Config("Could not determine config directory".into()))?
            .join("eventboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config from its default location, creating a commented
    /// template on first run.
    pub fn load() -> EventBoardResult<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            Self::create_default_config(&path)?;
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> EventBoardResult<Self> {
        let config: BoardConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("EVENTBOARD"))
            .build()
            .map_err(|e| EventBoardError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EventBoardError::Config(e.to_string()))?;

        if config.page_size == 0 {
            return Err(EventBoardError::Config("page_size must be at least 1".into()));
        }

        Ok(config)
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn storage(&self) -> LocalStorage {
        LocalStorage::new(self.data_path())
    }

    /// Configured timezone, else the system zone, else UTC.
    pub fn timezone(&self) -> Tz {
        self.timezone.unwrap_or_else(system_timezone)
    }

    pub fn save_to(&self, path: &Path) -> EventBoardResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| EventBoardError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| EventBoardError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EventBoardResult<()> {
        let contents = format!(
            "\
# eventboard configuration

# Where events and accounts are stored:
# data_dir = \"{}\"

# Timezone for dates entered without an offset (defaults to the system zone):
# timezone = \"Europe/Berlin\"

# Whether back-to-back events conflict: \"half-open\" (allowed) or \"closed\":
# overlap_policy = \"half-open\"

# Rows per page in `eventboard list`:
# page_size = {}
",
            DEFAULT_DATA_DIR, DEFAULT_PAGE_SIZE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventBoardError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EventBoardError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn system_timezone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse().ok())
        .unwrap_or(Tz::UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commented_template_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eventboard").join("config.toml");

        BoardConfig::create_default_config(&path).unwrap();
        let config = BoardConfig::load_from(&path).unwrap();

        assert_eq!(config.data_dir, default_data_dir());
        assert_eq!(config.overlap_policy, BoundaryPolicy::HalfOpen);
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn test_values_are_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/tmp/board\"\ntimezone = \"Asia/Tokyo\"\noverlap_policy = \"closed\"\npage_size = 10\n",
        )
        .unwrap();

        let config = BoardConfig::load_from(&path).unwrap();
        assert_eq!(config.data_path(), PathBuf::from("/tmp/board"));
        assert_eq!(config.timezone(), chrono_tz::Asia::Tokyo);
        assert_eq!(config.overlap_policy, BoundaryPolicy::Closed);
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = 0\n").unwrap();

        assert!(matches!(
            BoardConfig::load_from(&path),
            Err(EventBoardError::Config(_))
        ));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = BoardConfig {
            overlap_policy: BoundaryPolicy::Closed,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(BoardConfig::load_from(&path).unwrap(), config);
    }
}
