//! Configuration file and resolved settings
//!
//! A JSON file can carry any of the command-line settings plus keybinding
//! overrides. Values given on the command line win over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::keybindings::Keybindings;
use crate::loader::VenueSource;
use crate::persistence::FileStorage;

/// Contents of a config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    /// Venue document path or URL
    pub venue: Option<String>,
    pub storage_dir: Option<PathBuf>,
    /// Display name of the signed-in viewer
    pub user: Option<String>,
    pub log_file: Option<PathBuf>,
    /// Per-command overrides, merged over the defaults
    #[serde(default)]
    pub keybindings: Option<Keybindings>,
}

impl ConfigFile {
    pub fn from_json(path: &Path, json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &json)
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub venue: Option<String>,
    pub storage_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub venue: VenueSource,
    /// Where the selection is persisted; `None` when no data dir exists
    pub storage_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub log_file: Option<PathBuf>,
    pub keybindings: Keybindings,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            venue: VenueSource::default(),
            storage_dir: FileStorage::default_dir(),
            user: None,
            log_file: None,
            keybindings: Keybindings::default(),
        }
    }
}

impl SessionConfig {
    /// Layer the file and the command line over the defaults
    pub fn resolve(file: ConfigFile, cli: CliOverrides) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let keybindings = match file.keybindings {
            Some(user) => {
                user.validate()?;
                Keybindings::merge(defaults.keybindings, user)
            }
            None => defaults.keybindings,
        };

        Ok(Self {
            venue: cli
                .venue
                .or(file.venue)
                .map(|location| VenueSource::parse(&location))
                .unwrap_or(defaults.venue),
            storage_dir: cli
                .storage_dir
                .or(file.storage_dir)
                .or(defaults.storage_dir),
            user: cli.user.or(file.user).filter(|name| !name.trim().is_empty()),
            log_file: cli.log_file.or(file.log_file),
            keybindings,
        })
    }

    /// Read `path` if given, then resolve
    pub fn load(path: Option<&Path>, cli: CliOverrides) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        Self::resolve(file, cli)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::Command;

    fn parse(json: &str) -> Result<ConfigFile, ConfigError> {
        ConfigFile::from_json(Path::new("test.json"), json)
    }

    #[test]
    fn test_defaults() {
        let config = SessionConfig::resolve(ConfigFile::default(), CliOverrides::default()).unwrap();
        assert_eq!(config.venue, VenueSource::default());
        assert_eq!(config.user, None);
        assert_eq!(config.keybindings, Keybindings::default());
    }

    #[test]
    fn test_cli_wins_over_file() {
        let file = parse(r#"{ "venue": "https://example.com/v.json", "user": "Grace" }"#).unwrap();
        let cli = CliOverrides {
            venue: Some("local.json".into()),
            ..Default::default()
        };

        let config = SessionConfig::resolve(file, cli).unwrap();
        assert_eq!(config.venue, VenueSource::File("local.json".into()));
        assert_eq!(config.user.as_deref(), Some("Grace"));
    }

    #[test]
    fn test_blank_user_is_none() {
        let cli = CliOverrides {
            user: Some("  ".into()),
            ..Default::default()
        };
        let config = SessionConfig::resolve(ConfigFile::default(), cli).unwrap();
        assert_eq!(config.user, None);
    }

    #[test]
    fn test_keybinding_overrides_merge() {
        let file = parse(r#"{ "keybindings": { "quit": ["x"] } }"#).unwrap();
        let config = SessionConfig::resolve(file, CliOverrides::default()).unwrap();

        assert_eq!(config.keybindings.keys(Command::Quit), ["x".to_string()]);
        assert_eq!(
            config.keybindings.keys(Command::Activate),
            Keybindings::default().keys(Command::Activate)
        );
    }

    #[test]
    fn test_bad_key_rejected() {
        let file = parse(r#"{ "keybindings": { "activate": ["hyper+z"] } }"#).unwrap();
        assert!(matches!(
            SessionConfig::resolve(file, CliOverrides::default()),
            Err(ConfigError::UnknownKey(k)) if k == "hyper+z"
        ));
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        assert!(matches!(parse(r#"{ "colour": "red" }"#), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ConfigFile::load(Path::new("/no/such/seatmap.json")),
            Err(ConfigError::Read { .. })
        ));
    }
}
