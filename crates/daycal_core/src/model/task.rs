//! Task record pinned to a calendar date.
//!
//! One canonical schema carries both the optional per-task color override
//! and the completion flag.

use super::category::CategoryId;
use super::{validate_color, validate_id, OwnerId, ValidationError};
use crate::calendar::CalendarDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TaskId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub owner_id: OwnerId,
    pub title: String,
    /// Serialized as ISO `yyyy-mm-dd`.
    pub date: CalendarDate,
    pub category_id: CategoryId,
    pub description: Option<String>,
    /// Overrides the category color when set.
    pub custom_color: Option<String>,
    pub completed: bool,
}

impl Task {
    /// Creates an open task with a generated id. Title is trimmed.
    pub fn new(owner_id: OwnerId, title: &str, date: CalendarDate, category_id: CategoryId) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title: title.trim().to_string(),
            date,
            category_id,
            description: None,
            custom_color: None,
            completed: false,
        }
    }

    /// Sets the description; blank text clears it.
    pub fn set_description(&mut self, description: Option<&str>) {
        self.description = description
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_id(self.id)?;
        validate_id(self.category_id)?;
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if let Some(color) = self.custom_color.as_deref() {
            validate_color(color)?;
        }
        Ok(())
    }
}
