//! Calendar use-case service.
//!
//! # Responsibility
//! - Join task records with their categories into display-ready tasks.
//! - Join grid/window output with tasks grouped by ISO date.
//! - Provide category/task CRUD entry points with cross-entity checks.
//!
//! # Invariants
//! - Display color resolves task custom color, then category color, then
//!   `DEFAULT_TASK_COLOR`.
//! - Tasks inside one day are sorted by title.
//! - Agenda day counts are validated here, before reaching the grid builder.
//! - Views whose cells would leave chrono's date range fail with
//!   `DateOutOfRange` instead of rendering clamped dates.

use crate::calendar::{
    checked_agenda_window, checked_month_grid, checked_week_days, day_label, format_iso,
    is_same_day, validate_agenda_days, CalendarDate, DateOutOfRange, DayLabel, InvalidDayCount,
    LabelLocale,
};
use crate::model::category::{free_palette_color, Category, CategoryId};
use crate::model::task::{Task, TaskId};
use crate::model::{OwnerId, ValidationError};
use crate::repo::{CategoryRepository, RepoError, TaskRepository};
use log::info;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Color used when neither the task nor its category provides one.
pub const DEFAULT_TASK_COLOR: &str = "#64748b";
/// Category name shown for tasks whose category no longer exists.
pub const UNCATEGORIZED_NAME: &str = "Sin categoría";

/// Service error for calendar use-cases.
#[derive(Debug)]
pub enum CalendarServiceError {
    InvalidDayCount(InvalidDayCount),
    /// Requested view reaches past the representable date range.
    DateOutOfRange(DateOutOfRange),
    CategoryNotFound(CategoryId),
    TaskNotFound(TaskId),
    /// Another category of the same owner already uses this color.
    ColorInUse(String),
    /// Every palette color is taken; an explicit color is required.
    PaletteExhausted,
    CategoryInUse(CategoryId),
    Validation(ValidationError),
    Repo(RepoError),
}

impl Display for CalendarServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDayCount(err) => write!(f, "{err}"),
            Self::DateOutOfRange(err) => write!(f, "{err}"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::ColorInUse(color) => write!(f, "color `{color}` is already used by another category"),
            Self::PaletteExhausted => {
                write!(f, "every palette color is in use; choose a color explicitly")
            }
            Self::CategoryInUse(id) => write!(f, "category {id} still has tasks assigned"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CalendarServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDayCount(err) => Some(err),
            Self::DateOutOfRange(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvalidDayCount> for CalendarServiceError {
    fn from(value: InvalidDayCount) -> Self {
        Self::InvalidDayCount(value)
    }
}

impl From<DateOutOfRange> for CalendarServiceError {
    fn from(value: DateOutOfRange) -> Self {
        Self::DateOutOfRange(value)
    }
}

impl From<ValidationError> for CalendarServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for CalendarServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::CategoryInUse(id) => Self::CategoryInUse(id),
            other => Self::Repo(other),
        }
    }
}

pub type CalendarResult<T> = Result<T, CalendarServiceError>;

/// Task joined with its resolved display color and category name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarTask {
    pub task: Task,
    pub color: String,
    pub category_name: String,
}

/// One rendered day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: CalendarDate,
    /// ISO key used to join tasks.
    pub iso: String,
    /// False for month-view padding days.
    pub in_month: bool,
    pub is_today: bool,
    pub tasks: Vec<CalendarTask>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// Header such as `febrero de 2024`.
    pub title: String,
    /// Six rows of seven cells.
    pub weeks: Vec<Vec<DayCell>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaSection {
    pub label: DayLabel,
    pub day: DayCell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaView {
    pub start: CalendarDate,
    pub day_count: usize,
    pub sections: Vec<AgendaSection>,
}

/// Category with its task counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: Category,
    pub total: usize,
    pub pending: usize,
}

impl CategorySummary {
    /// Deletion is only allowed once no task references the category.
    pub fn can_delete(&self) -> bool {
        self.total == 0
    }
}

/// Input for task creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub date: CalendarDate,
    pub category_id: CategoryId,
    pub description: Option<String>,
    pub custom_color: Option<String>,
}

/// Calendar service facade over category and task repositories.
pub struct CalendarService<C: CategoryRepository, T: TaskRepository> {
    categories: C,
    tasks: T,
    locale: LabelLocale,
}

impl<C: CategoryRepository, T: TaskRepository> CalendarService<C, T> {
    pub fn new(categories: C, tasks: T, locale: LabelLocale) -> Self {
        Self {
            categories,
            tasks,
            locale,
        }
    }

    pub fn locale(&self) -> LabelLocale {
        self.locale
    }

    pub fn list_categories(&self, owner: &OwnerId) -> CalendarResult<Vec<Category>> {
        Ok(self.categories.list_categories(owner)?)
    }

    /// Creates a category; without an explicit color the first unused palette
    /// color is picked, and `PaletteExhausted` is returned once all are taken.
    pub fn create_category(
        &self,
        owner: &OwnerId,
        name: &str,
        color: Option<&str>,
    ) -> CalendarResult<Category> {
        let existing = self.categories.list_categories(owner)?;
        let used: Vec<&str> = existing.iter().map(|c| c.color.as_str()).collect();
        let color = match color {
            Some(value) => {
                let value = value.trim().to_lowercase();
                if used.iter().any(|u| u.eq_ignore_ascii_case(&value)) {
                    return Err(CalendarServiceError::ColorInUse(value));
                }
                value
            }
            None => free_palette_color(&used)
                .ok_or(CalendarServiceError::PaletteExhausted)?
                .to_string(),
        };

        let category = Category::new(owner.clone(), name, color);
        self.categories.create_category(&category)?;
        info!("event=category_create module=service status=ok");
        Ok(category)
    }

    pub fn update_category(&self, category: &Category) -> CalendarResult<()> {
        let existing = self.categories.list_categories(&category.owner_id)?;
        if existing
            .iter()
            .any(|c| c.id != category.id && c.color.eq_ignore_ascii_case(&category.color))
        {
            return Err(CalendarServiceError::ColorInUse(category.color.clone()));
        }
        self.categories
            .update_category(category)
            .map_err(category_not_found)
    }

    pub fn delete_category(&self, owner: &OwnerId, id: CategoryId) -> CalendarResult<()> {
        self.categories
            .delete_category(owner, id)
            .map_err(category_not_found)?;
        info!("event=category_delete module=service status=ok");
        Ok(())
    }

    /// Categories with total and pending task counts.
    pub fn category_summaries(&self, owner: &OwnerId) -> CalendarResult<Vec<CategorySummary>> {
        let tasks = self.tasks.list_tasks(owner)?;
        let mut counters: HashMap<CategoryId, (usize, usize)> = HashMap::new();
        for task in &tasks {
            let entry = counters.entry(task.category_id).or_default();
            entry.0 += 1;
            if !task.completed {
                entry.1 += 1;
            }
        }

        let summaries = self
            .categories
            .list_categories(owner)?
            .into_iter()
            .map(|category| {
                let (total, pending) = counters.get(&category.id).copied().unwrap_or_default();
                CategorySummary {
                    category,
                    total,
                    pending,
                }
            })
            .collect();
        Ok(summaries)
    }

    pub fn create_task(&self, owner: &OwnerId, request: NewTask) -> CalendarResult<Task> {
        self.ensure_category(owner, request.category_id)?;
        let mut task = Task::new(owner.clone(), &request.title, request.date, request.category_id);
        task.set_description(request.description.as_deref());
        task.custom_color = request
            .custom_color
            .map(|value| value.trim().to_lowercase())
            .filter(|value| !value.is_empty());

        self.tasks.create_task(&task)?;
        info!(
            "event=task_create module=service status=ok date={}",
            format_iso(task.date)
        );
        Ok(task)
    }

    pub fn get_task(&self, owner: &OwnerId, id: TaskId) -> CalendarResult<Option<Task>> {
        Ok(self.tasks.get_task(owner, id)?)
    }

    /// Replaces all editable fields of an existing task.
    pub fn update_task(&self, task: &Task) -> CalendarResult<()> {
        self.ensure_category(&task.owner_id, task.category_id)?;
        self.tasks.update_task(task).map_err(task_not_found)
    }

    pub fn set_task_completed(
        &self,
        owner: &OwnerId,
        id: TaskId,
        completed: bool,
    ) -> CalendarResult<()> {
        self.tasks
            .set_task_completed(owner, id, completed)
            .map_err(task_not_found)
    }

    /// Flips completion and returns the new state.
    pub fn toggle_task_completed(&self, owner: &OwnerId, id: TaskId) -> CalendarResult<bool> {
        let task = self
            .tasks
            .get_task(owner, id)?
            .ok_or(CalendarServiceError::TaskNotFound(id))?;
        let completed = !task.completed;
        self.set_task_completed(owner, id, completed)?;
        Ok(completed)
    }

    pub fn delete_task(&self, owner: &OwnerId, id: TaskId) -> CalendarResult<()> {
        self.tasks.delete_task(owner, id).map_err(task_not_found)?;
        info!("event=task_delete module=service status=ok");
        Ok(())
    }

    /// All tasks of `owner` with display color and category name resolved.
    pub fn calendar_tasks(&self, owner: &OwnerId) -> CalendarResult<Vec<CalendarTask>> {
        let tasks = self.tasks.list_tasks(owner)?;
        let categories = self.categories.list_categories(owner)?;
        Ok(resolve_calendar_tasks(tasks, &categories))
    }

    pub fn month_view(
        &self,
        owner: &OwnerId,
        reference: CalendarDate,
        today: CalendarDate,
    ) -> CalendarResult<MonthView> {
        let grid = checked_month_grid(reference).ok_or(DateOutOfRange)?;
        let mut by_date = self.tasks_by_date(owner, grid.first(), grid.last())?;
        let mut weeks = Vec::with_capacity(6);
        for week in grid.weeks() {
            let mut row = Vec::with_capacity(week.len());
            for date in week {
                row.push(build_cell(*date, grid.is_in_month(*date), today, &mut by_date));
            }
            weeks.push(row);
        }

        Ok(MonthView {
            year: grid.year(),
            month: grid.month(),
            title: self.locale.month_year(grid.month() - 1, grid.year()),
            weeks,
        })
    }

    pub fn week_view(
        &self,
        owner: &OwnerId,
        reference: CalendarDate,
        today: CalendarDate,
    ) -> CalendarResult<Vec<DayCell>> {
        let window = checked_week_days(reference).ok_or(DateOutOfRange)?;
        self.window_cells(owner, window, today)
    }

    pub fn day_view(
        &self,
        owner: &OwnerId,
        date: CalendarDate,
        today: CalendarDate,
    ) -> CalendarResult<DayCell> {
        let mut by_date = self.tasks_by_date(owner, date, date)?;
        Ok(build_cell(date, true, today, &mut by_date))
    }

    pub fn agenda_view(
        &self,
        owner: &OwnerId,
        start: CalendarDate,
        day_count: usize,
        today: CalendarDate,
    ) -> CalendarResult<AgendaView> {
        let day_count = validate_agenda_days(day_count)?;
        let window = checked_agenda_window(start, day_count).ok_or(DateOutOfRange)?;
        let sections = self
            .window_cells(owner, window, today)?
            .into_iter()
            .map(|day| AgendaSection {
                label: day_label(day.date, today, self.locale),
                day,
            })
            .collect();

        Ok(AgendaView {
            start,
            day_count,
            sections,
        })
    }

    fn window_cells(
        &self,
        owner: &OwnerId,
        window: Vec<CalendarDate>,
        today: CalendarDate,
    ) -> CalendarResult<Vec<DayCell>> {
        let (Some(first), Some(last)) = (window.first().copied(), window.last().copied()) else {
            return Ok(Vec::new());
        };
        let mut by_date = self.tasks_by_date(owner, first, last)?;
        Ok(window
            .into_iter()
            .map(|date| build_cell(date, true, today, &mut by_date))
            .collect())
    }

    fn tasks_by_date(
        &self,
        owner: &OwnerId,
        from: CalendarDate,
        to: CalendarDate,
    ) -> CalendarResult<BTreeMap<String, Vec<CalendarTask>>> {
        let tasks = self.tasks.list_tasks_in_range(owner, from, to)?;
        let categories = self.categories.list_categories(owner)?;
        Ok(group_by_date(resolve_calendar_tasks(tasks, &categories)))
    }

    fn ensure_category(&self, owner: &OwnerId, id: CategoryId) -> CalendarResult<()> {
        match self.categories.get_category(owner, id)? {
            Some(_) => Ok(()),
            None => Err(CalendarServiceError::CategoryNotFound(id)),
        }
    }
}

/// Resolves display color and category name for each task.
pub fn resolve_calendar_tasks(tasks: Vec<Task>, categories: &[Category]) -> Vec<CalendarTask> {
    let by_id: HashMap<CategoryId, &Category> = categories.iter().map(|c| (c.id, c)).collect();
    tasks
        .into_iter()
        .map(|task| {
            let category = by_id.get(&task.category_id);
            let color = task
                .custom_color
                .clone()
                .or_else(|| category.map(|c| c.color.clone()))
                .unwrap_or_else(|| DEFAULT_TASK_COLOR.to_string());
            let category_name = category
                .map(|c| c.name.clone())
                .unwrap_or_else(|| UNCATEGORIZED_NAME.to_string());
            CalendarTask {
                task,
                color,
                category_name,
            }
        })
        .collect()
}

/// Groups tasks by ISO date, each day sorted by title.
pub fn group_by_date(tasks: Vec<CalendarTask>) -> BTreeMap<String, Vec<CalendarTask>> {
    let mut grouped: BTreeMap<String, Vec<CalendarTask>> = BTreeMap::new();
    for task in tasks {
        grouped
            .entry(format_iso(task.task.date))
            .or_default()
            .push(task);
    }
    for day in grouped.values_mut() {
        day.sort_by(|a, b| {
            a.task
                .title
                .to_lowercase()
                .cmp(&b.task.title.to_lowercase())
        });
    }
    grouped
}

fn build_cell(
    date: CalendarDate,
    in_month: bool,
    today: CalendarDate,
    by_date: &mut BTreeMap<String, Vec<CalendarTask>>,
) -> DayCell {
    let iso = format_iso(date);
    let tasks = by_date.remove(&iso).unwrap_or_default();
    DayCell {
        date,
        iso,
        in_month,
        is_today: is_same_day(date, today),
        tasks,
    }
}

fn task_not_found(err: RepoError) -> CalendarServiceError {
    match err {
        RepoError::NotFound(id) => CalendarServiceError::TaskNotFound(id),
        other => other.into(),
    }
}

fn category_not_found(err: RepoError) -> CalendarServiceError {
    match err {
        RepoError::NotFound(id) => CalendarServiceError::CategoryNotFound(id),
        other => other.into(),
    }
}
