//! Command handlers and the shared runtime context.
//!
//! # Invariants
//! - Logging is initialized before the database is opened.
//! - Every handler writes results to stdout and returns errors to `main`.

pub mod calendar;
pub mod category;
pub mod note;
pub mod task;

use crate::GlobalArgs;
use chrono::{Local, NaiveDate};
use daycal_core::db::{open_db, DbError};
use daycal_core::{
    init_logging, init_stderr_logging, parse_iso, CalendarService, CalendarServiceError,
    ConfigError, DaycalConfig, NoteService, NoteServiceError, OwnerId, SqliteCategoryRepository,
    SqliteNoteRepository, SqliteTaskRepository,
};
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Logging(String),
    Db(DbError),
    Calendar(CalendarServiceError),
    Note(NoteServiceError),
    InvalidArgument(String),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(message) => write!(f, "logging: {message}"),
            Self::Db(err) => write!(f, "database: {err}"),
            Self::Calendar(err) => write!(f, "{err}"),
            Self::Note(err) => write!(f, "{err}"),
            Self::InvalidArgument(message) => write!(f, "{message}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Calendar(err) => Some(err),
            Self::Note(err) => Some(err),
            Self::Logging(_) | Self::InvalidArgument(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<CalendarServiceError> for CliError {
    fn from(value: CalendarServiceError) -> Self {
        Self::Calendar(value)
    }
}

impl From<NoteServiceError> for CliError {
    fn from(value: NoteServiceError) -> Self {
        Self::Note(value)
    }
}

pub type CliResult<T> = Result<T, CliError>;

/// Loaded config, owner and open database for one invocation.
pub struct Context {
    pub config: DaycalConfig,
    pub owner: OwnerId,
    pub today: NaiveDate,
    conn: Connection,
}

impl Context {
    pub fn open(args: &GlobalArgs) -> CliResult<Self> {
        let mut config = DaycalConfig::load(args.config.as_deref())?;
        if let Some(db) = &args.db {
            config.db_path = db.clone();
        }
        if let Some(owner) = &args.owner {
            config.owner_id = owner.clone();
        }
        config.validate()?;
        let owner = config.owner()?;

        let logging = match config.log_dir.as_deref() {
            Some(dir) => init_logging(&config.log_level, &dir.to_string_lossy()),
            None => init_stderr_logging(&config.log_level),
        };
        logging.map_err(CliError::Logging)?;

        let conn = open_db(&config.db_path)?;
        info!("event=cli_start module=cli status=ok");
        Ok(Self {
            config,
            owner,
            today: Local::now().date_naive(),
            conn,
        })
    }

    pub fn calendar(
        &self,
    ) -> CalendarService<SqliteCategoryRepository<'_>, SqliteTaskRepository<'_>> {
        CalendarService::new(
            SqliteCategoryRepository::new(&self.conn),
            SqliteTaskRepository::new(&self.conn),
            self.config.locale,
        )
    }

    pub fn notes(&self) -> NoteService<SqliteNoteRepository<'_>> {
        NoteService::new(SqliteNoteRepository::new(&self.conn))
    }
}

/// clap value parser for strict `YYYY-MM-DD` dates.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    parse_iso(value).ok_or_else(|| format!("expected a YYYY-MM-DD date, got `{value}`"))
}
