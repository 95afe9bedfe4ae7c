//! Prev/next/today navigation across calendar layouts.
//!
//! # Invariants
//! - The anchor is always rebuilt, never mutated day-by-day in place.
//! - In month view the anchor is day 1 of the displayed month.
//! - `agenda_days` stays within `1..=AGENDA_MAX_DAYS`.

use super::grid::{
    agenda_window, checked_add_days, checked_agenda_window, checked_month_grid,
    checked_shift_month, checked_week_days, month_grid, start_of_month, week_days, CalendarDate,
    DateWindow,
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Day counts offered by the agenda picker.
pub const AGENDA_DAY_PRESETS: [usize; 4] = [3, 7, 14, 30];
pub const AGENDA_DEFAULT_DAYS: usize = 7;
pub const AGENDA_MAX_DAYS: usize = 366;

/// Calendar layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarView {
    #[default]
    Month,
    Week,
    Day,
    Agenda,
}

/// Agenda day count outside `1..=AGENDA_MAX_DAYS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDayCount(pub usize);

impl Display for InvalidDayCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "agenda day count must be between 1 and {AGENDA_MAX_DAYS}, got {}",
            self.0
        )
    }
}

impl Error for InvalidDayCount {}

/// Navigation target outside the representable date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateOutOfRange;

impl Display for DateOutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "date is outside the supported calendar range")
    }
}

impl Error for DateOutOfRange {}

/// Checks an agenda day count at the input boundary.
pub fn validate_agenda_days(days: usize) -> Result<usize, InvalidDayCount> {
    if days == 0 || days > AGENDA_MAX_DAYS {
        return Err(InvalidDayCount(days));
    }
    Ok(days)
}

/// Navigation state for one calendar screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarNavigator {
    view: CalendarView,
    anchor: CalendarDate,
    agenda_days: usize,
}

impl CalendarNavigator {
    pub fn new(
        view: CalendarView,
        today: CalendarDate,
        agenda_days: usize,
    ) -> Result<Self, InvalidDayCount> {
        let agenda_days = validate_agenda_days(agenda_days)?;
        Ok(Self {
            view,
            anchor: anchor_for(view, today),
            agenda_days,
        })
    }

    pub fn view(&self) -> CalendarView {
        self.view
    }

    pub fn anchor(&self) -> CalendarDate {
        self.anchor
    }

    pub fn agenda_days(&self) -> usize {
        self.agenda_days
    }

    /// Switches layout, keeping the current anchor date.
    pub fn set_view(&mut self, view: CalendarView) {
        self.view = view;
        self.anchor = anchor_for(view, self.anchor);
    }

    pub fn set_agenda_days(&mut self, days: usize) -> Result<(), InvalidDayCount> {
        self.agenda_days = validate_agenda_days(days)?;
        Ok(())
    }

    /// One period back; stays put at the start of the supported range.
    pub fn prev(&mut self) {
        let _ = self.shift(-1);
    }

    /// One period forward; stays put at the end of the supported range.
    pub fn next(&mut self) {
        let _ = self.shift(1);
    }

    /// Moves `steps` periods at once (negative moves back).
    ///
    /// The anchor is left unchanged when the target, or any day of its
    /// window, falls outside the supported date range.
    pub fn shift(&mut self, steps: i64) -> Result<(), DateOutOfRange> {
        let anchor = self.target(steps).ok_or(DateOutOfRange)?;
        if !window_fits(self.view, anchor, self.agenda_days) {
            return Err(DateOutOfRange);
        }
        self.anchor = anchor;
        Ok(())
    }

    pub fn today(&mut self, today: CalendarDate) {
        self.anchor = anchor_for(self.view, today);
    }

    /// Dates shown by the current layout.
    pub fn window(&self) -> DateWindow {
        match self.view {
            CalendarView::Month => month_grid(self.anchor).days().to_vec(),
            CalendarView::Week => week_days(self.anchor),
            CalendarView::Day => vec![self.anchor],
            CalendarView::Agenda => agenda_window(self.anchor, self.agenda_days),
        }
    }

    fn target(&self, steps: i64) -> Option<CalendarDate> {
        let period_days = match self.view {
            CalendarView::Month => return checked_shift_month(self.anchor, steps),
            CalendarView::Week => 7,
            CalendarView::Day => 1,
            CalendarView::Agenda => i64::try_from(self.agenda_days).ok()?,
        };
        checked_add_days(self.anchor, period_days.checked_mul(steps)?)
    }
}

fn window_fits(view: CalendarView, anchor: CalendarDate, agenda_days: usize) -> bool {
    match view {
        CalendarView::Month => checked_month_grid(anchor).is_some(),
        CalendarView::Week => checked_week_days(anchor).is_some(),
        CalendarView::Day => true,
        CalendarView::Agenda => checked_agenda_window(anchor, agenda_days).is_some(),
    }
}

fn anchor_for(view: CalendarView, date: CalendarDate) -> CalendarDate {
    match view {
        CalendarView::Month => start_of_month(date),
        CalendarView::Week | CalendarView::Day | CalendarView::Agenda => date,
    }
}
