//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Join pure calendar/markup output with stored records.
//! - Keep front ends decoupled from storage details.

pub mod calendar_service;
pub mod note_service;
