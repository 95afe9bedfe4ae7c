//! Calendar date arithmetic for month/week/day/agenda layouts.
//!
//! # Responsibility
//! - Build the fixed month matrix and the contiguous day windows used by
//!   calendar views.
//! - Produce ISO keys and human-readable agenda headers.
//!
//! # Invariants
//! - Weeks start on Monday.
//! - Every function here is pure and independent of the wall clock; callers
//!   pass `today` explicitly where it matters.

pub mod grid;
pub mod locale;
pub mod navigator;

pub use grid::{
    add_days, agenda_window, checked_add_days, checked_agenda_window, checked_month_grid,
    checked_shift_month, checked_week_days, day_label, end_of_month, end_of_week, format_iso,
    is_same_day, month_grid, parse_iso, shift_month, start_of_month, start_of_week, week_days,
    CalendarDate, DateWindow, DayKind, DayLabel, MonthGrid, MONTH_GRID_CELLS,
};
pub use locale::LabelLocale;
pub use navigator::{
    validate_agenda_days, CalendarNavigator, CalendarView, DateOutOfRange, InvalidDayCount, AGENDA_DAY_PRESETS,
    AGENDA_DEFAULT_DAYS, AGENDA_MAX_DAYS,
};
