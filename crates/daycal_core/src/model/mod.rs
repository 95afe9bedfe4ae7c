//! Domain records for tasks, categories and notes.
//!
//! # Responsibility
//! - Define the canonical shapes shared by repositories and services.
//! - Validate record invariants before they reach storage.
//!
//! # Invariants
//! - Every record belongs to exactly one `OwnerId`.
//! - Record ids are non-nil v4 UUIDs.
//! - Colors are `#rrggbb` hex strings.

pub mod category;
pub mod note;
pub mod task;

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque identifier of the user that owns records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Wraps a trimmed, non-empty owner identifier.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyOwner);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OwnerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Record-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyOwner,
    NilId,
    EmptyName,
    EmptyTitle,
    EmptyBody,
    InvalidColor(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyOwner => write!(f, "owner id must not be empty"),
            Self::NilId => write!(f, "record id must not be nil"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyBody => write!(f, "note body must not be empty"),
            Self::InvalidColor(value) => {
                write!(f, "invalid color `{value}`; expected #rrggbb")
            }
        }
    }
}

impl Error for ValidationError {}

/// Whether `value` is a `#rrggbb` hex color.
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn validate_id(id: Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::NilId);
    }
    Ok(())
}

fn validate_color(value: &str) -> Result<(), ValidationError> {
    if !is_hex_color(value) {
        return Err(ValidationError::InvalidColor(value.to_string()));
    }
    Ok(())
}
