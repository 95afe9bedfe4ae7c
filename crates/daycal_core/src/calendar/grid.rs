//! Month matrix and day-window builders.
//!
//! # Responsibility
//! - Compute the 6x7 month grid padded with adjacent-month days.
//! - Compute week, agenda and month-navigation anchors.
//!
//! # Invariants
//! - `month_grid` always yields 42 days, Monday first and Sunday last.
//! - Windows are contiguous, ascending, one day apart.
//! - No function here reads the clock.
//! - Nothing panics at the edges of chrono's date range: `checked_*`
//!   builders return `None`, the others saturate at `NaiveDate::MIN`/`MAX`.

use super::locale::LabelLocale;
use chrono::{Datelike, Days, NaiveDate};

/// Plain civil date; no time-zone semantics.
pub type CalendarDate = NaiveDate;

/// Contiguous ascending run of dates used by week/day/agenda views.
pub type DateWindow = Vec<CalendarDate>;

/// Number of cells in a month view (6 weeks x 7 days).
pub const MONTH_GRID_CELLS: usize = 42;
const DAYS_PER_WEEK: usize = 7;

/// Fixed-size month matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    days: Vec<CalendarDate>,
}

impl MonthGrid {
    /// Target year of this grid.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Target month of this grid, 1-12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// All 42 cells in row-major order.
    pub fn days(&self) -> &[CalendarDate] {
        &self.days
    }

    /// The six week rows.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDate]> {
        self.days.chunks(DAYS_PER_WEEK)
    }

    /// Whether `date` belongs to the target month rather than padding.
    pub fn is_in_month(&self, date: CalendarDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Top-left cell, the Monday on or before day 1.
    pub fn first(&self) -> CalendarDate {
        self.days[0]
    }

    /// Bottom-right cell, a Sunday in the following month.
    pub fn last(&self) -> CalendarDate {
        self.days[MONTH_GRID_CELLS - 1]
    }
}

/// Classification of an agenda day relative to `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Today,
    Tomorrow,
    Other,
}

/// Agenda header: classification plus locale-formatted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLabel {
    pub kind: DayKind,
    pub text: String,
}

/// Builds the 42-day month matrix for the month containing `reference`.
///
/// Depends only on `(year, month)` of `reference`. Cells past the end of the
/// supported range repeat the boundary date; see `checked_month_grid`.
pub fn month_grid(reference: CalendarDate) -> MonthGrid {
    let first = start_of_month(reference);
    let grid_start = add_days(first, -monday_offset(first));
    MonthGrid {
        year: first.year(),
        month: first.month(),
        days: agenda_window(grid_start, MONTH_GRID_CELLS),
    }
}

/// Like `month_grid`, but `None` when any cell is outside the date range.
pub fn checked_month_grid(reference: CalendarDate) -> Option<MonthGrid> {
    let first = start_of_month(reference);
    let grid_start = checked_add_days(first, -monday_offset(first))?;
    checked_add_days(grid_start, MONTH_GRID_CELLS as i64 - 1)?;
    Some(month_grid(reference))
}

/// Returns the Monday..Sunday week containing `reference`.
pub fn week_days(reference: CalendarDate) -> DateWindow {
    agenda_window(start_of_week(reference), DAYS_PER_WEEK)
}

pub fn checked_week_days(reference: CalendarDate) -> Option<DateWindow> {
    let monday = checked_add_days(reference, -monday_offset(reference))?;
    checked_agenda_window(monday, DAYS_PER_WEEK)
}

/// Returns `day_count` consecutive days starting at `start`.
///
/// `day_count` is validated by callers; zero yields an empty window.
pub fn agenda_window(start: CalendarDate, day_count: usize) -> DateWindow {
    (0..day_count as i64)
        .map(|index| add_days(start, index))
        .collect()
}

/// Like `agenda_window`, but `None` when the last day is out of range.
pub fn checked_agenda_window(start: CalendarDate, day_count: usize) -> Option<DateWindow> {
    if day_count > 0 {
        checked_add_days(start, i64::try_from(day_count - 1).ok()?)?;
    }
    Some(agenda_window(start, day_count))
}

/// Returns day 1 of the month `delta` months away from `reference`.
///
/// Falls back to the first of the reference month if the result is outside
/// chrono's representable range.
pub fn shift_month(reference: CalendarDate, delta: i32) -> CalendarDate {
    checked_shift_month(reference, i64::from(delta)).unwrap_or_else(|| start_of_month(reference))
}

pub fn checked_shift_month(reference: CalendarDate, delta: i64) -> Option<CalendarDate> {
    let total = (i64::from(reference.year()) * 12 + i64::from(reference.month0()))
        .checked_add(delta)?;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Zero-padded `yyyy-mm-dd`.
pub fn format_iso(date: CalendarDate) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month(),
        date.day()
    )
}

/// Parses a strict `yyyy-mm-dd` string.
pub fn parse_iso(value: &str) -> Option<CalendarDate> {
    let trimmed = value.trim();
    if trimmed.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Agenda header for `date`, relative to `today`.
pub fn day_label(date: CalendarDate, today: CalendarDate, locale: LabelLocale) -> DayLabel {
    let month_day = locale.month_day(date.month0(), date.day());
    if is_same_day(date, today) {
        return DayLabel {
            kind: DayKind::Today,
            text: format!("{}, {month_day}", locale.today_word()),
        };
    }
    if is_same_day(date, add_days(today, 1)) {
        return DayLabel {
            kind: DayKind::Tomorrow,
            text: format!("{}, {month_day}", locale.tomorrow_word()),
        };
    }
    DayLabel {
        kind: DayKind::Other,
        text: format!("{}, {month_day}", locale.weekday_name(date.weekday())),
    }
}

pub fn start_of_month(date: CalendarDate) -> CalendarDate {
    add_days(date, -i64::from(date.day0()))
}

pub fn end_of_month(date: CalendarDate) -> CalendarDate {
    match checked_shift_month(date, 1) {
        Some(next) => add_days(next, -1),
        // Only December of the last representable year has no successor.
        None => NaiveDate::MAX,
    }
}

/// Most recent Monday on or before `date`.
pub fn start_of_week(date: CalendarDate) -> CalendarDate {
    add_days(date, -monday_offset(date))
}

pub fn end_of_week(date: CalendarDate) -> CalendarDate {
    add_days(start_of_week(date), 6)
}

/// `date + amount` days, saturating at `NaiveDate::MIN`/`MAX`.
pub fn add_days(date: CalendarDate, amount: i64) -> CalendarDate {
    checked_add_days(date, amount).unwrap_or(if amount < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

pub fn checked_add_days(date: CalendarDate, amount: i64) -> Option<CalendarDate> {
    let days = Days::new(amount.unsigned_abs());
    if amount < 0 {
        date.checked_sub_days(days)
    } else {
        date.checked_add_days(days)
    }
}

/// Compares calendar components only.
pub fn is_same_day(a: CalendarDate, b: CalendarDate) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

// (weekday_from_sunday + 6) mod 7, i.e. Monday = 0 .. Sunday = 6.
fn monday_offset(date: CalendarDate) -> i64 {
    i64::from((date.weekday().num_days_from_sunday() + 6) % 7)
}
