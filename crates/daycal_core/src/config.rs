//! Application configuration.
//!
//! # Responsibility
//! - Load an explicit configuration object from an optional JSON file.
//! - Validate values before any service is constructed.
//!
//! # Invariants
//! - Missing fields take defaults; unknown fields are rejected.
//! - The loaded config is passed to callers by value; nothing here is global.

use crate::calendar::{validate_agenda_days, CalendarView, LabelLocale, AGENDA_DEFAULT_DAYS};
use crate::logging::{default_log_level, normalize_level};
use crate::model::OwnerId;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE_NAME: &str = "daycal.sqlite3";
const DEFAULT_OWNER_ID: &str = "local";

/// Runtime configuration for daycal front ends.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaycalConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Owner id used to scope every repository call.
    pub owner_id: String,
    pub log_level: String,
    /// Absolute directory for rolling logs; stderr when unset.
    pub log_dir: Option<PathBuf>,
    pub default_view: CalendarView,
    pub agenda_days: usize,
    pub locale: LabelLocale,
}

impl Default for DaycalConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            owner_id: DEFAULT_OWNER_ID.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
            default_view: CalendarView::default(),
            agenda_days: AGENDA_DEFAULT_DAYS,
            locale: LabelLocale::default(),
        }
    }
}

impl DaycalConfig {
    /// Loads `path` when given, otherwise returns defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                serde_json::from_str::<Self>(&raw).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        OwnerId::new(&self.owner_id)
            .map_err(|err| ConfigError::Invalid(format!("owner_id: {err}")))?;
        normalize_level(&self.log_level)
            .map_err(|err| ConfigError::Invalid(format!("log_level: {err}")))?;
        validate_agenda_days(self.agenda_days)
            .map_err(|err| ConfigError::Invalid(format!("agenda_days: {err}")))?;
        if let Some(dir) = self.log_dir.as_deref() {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log_dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Validated owner id.
    pub fn owner(&self) -> Result<OwnerId, ConfigError> {
        OwnerId::new(&self.owner_id)
            .map_err(|err| ConfigError::Invalid(format!("owner_id: {err}")))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DaycalConfig};
    use crate::calendar::{CalendarView, LabelLocale};
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn missing_path_yields_defaults() {
        let config = DaycalConfig::load(None).unwrap();
        assert_eq!(config, DaycalConfig::default());
        assert_eq!(config.agenda_days, 7);
        assert_eq!(config.locale, LabelLocale::Es);
    }

    #[test]
    fn partial_file_overrides_selected_fields() {
        let file = write_config(r#"{"owner_id": "ana", "default_view": "agenda", "locale": "en"}"#);
        let config = DaycalConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.owner().unwrap().as_str(), "ana");
        assert_eq!(config.default_view, CalendarView::Agenda);
        assert_eq!(config.locale, LabelLocale::En);
        assert_eq!(config.agenda_days, 7);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let file = write_config(r#"{"agenda_days": 0}"#);
        let err = DaycalConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(message) if message.contains("agenda_days")));

        let file = write_config(r#"{"colour": "blue"}"#);
        assert!(matches!(
            DaycalConfig::load(Some(file.path())).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }
}
