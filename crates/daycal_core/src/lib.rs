//! Core domain logic for daycal.
//! Calendar grid arithmetic, note copy-markup processing, and the
//! repositories/services that join them with stored tasks and notes.

pub mod calendar;
pub mod config;
pub mod db;
pub mod logging;
pub mod markup;
pub mod model;
pub mod repo;
pub mod service;

pub use calendar::{
    agenda_window, day_label, format_iso, month_grid, parse_iso, shift_month, week_days,
    CalendarDate, CalendarNavigator, CalendarView, DateWindow, DayKind, DayLabel, LabelLocale,
    MonthGrid,
};
pub use config::{ConfigError, DaycalConfig};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status};
pub use markup::{
    clean_display_text, extract_copyable_spans, truncate_label, CopyableSpan, CopyableSpans,
};
pub use model::category::Category;
pub use model::note::Note;
pub use model::task::Task;
pub use model::{OwnerId, ValidationError};
pub use repo::{
    CategoryRepository, NoteRepository, RepoError, RepoResult, SqliteCategoryRepository,
    SqliteNoteRepository, SqliteTaskRepository, TaskRepository,
};
pub use service::calendar_service::{
    CalendarService, CalendarServiceError, CalendarTask, NewTask,
};
pub use service::note_service::{NoteCard, NoteService, NoteServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
