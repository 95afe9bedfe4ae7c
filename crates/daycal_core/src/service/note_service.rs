//! Note use-case service.
//!
//! # Responsibility
//! - Provide note create/update/pin/delete/list APIs.
//! - Project notes into cards: display text with copy markers resolved, and
//!   one copy button per marker.
//! - Filter notes by a case/diacritic-insensitive query.
//!
//! # Invariants
//! - Lists are ordered pinned first, then newest `created_at` first.
//! - Search looks at the title and the cleaned body, never at marker syntax.

use crate::markup::{
    clean_display_text, extract_copyable_spans, matches_query, truncate_label,
    COPY_LABEL_MAX_CHARS,
};
use crate::model::note::{Note, NoteId};
use crate::model::{OwnerId, ValidationError};
use crate::repo::{NoteRepository, RepoError};
use log::info;
use serde::Serialize;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    NoteNotFound(NoteId),
    Validation(ValidationError),
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for NoteServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type NoteResult<T> = Result<T, NoteServiceError>;

/// Copy button rendered under a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyButton {
    /// Label truncated to `COPY_LABEL_MAX_CHARS`.
    pub label: String,
    pub copy_value: String,
}

/// Display projection of one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteCard {
    pub note: Note,
    pub display_text: String,
    pub copy_items: Vec<CopyButton>,
}

/// Note service facade over a repository implementation.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_note(&self, owner: &OwnerId, title: &str, body: &str) -> NoteResult<Note> {
        let note = Note::new(owner.clone(), title, body);
        let id = self.repo.create_note(&note)?;
        info!(
            "event=note_create module=service status=ok copy_markers={}",
            extract_copyable_spans(&note.body).count()
        );
        self.read_back(owner, id, "created note not found in read-back")
    }

    /// Replaces title and body. Both are trimmed and must be non-empty.
    pub fn update_note(
        &self,
        owner: &OwnerId,
        id: NoteId,
        title: &str,
        body: &str,
    ) -> NoteResult<Note> {
        let title = title.trim();
        let body = body.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        if body.is_empty() {
            return Err(ValidationError::EmptyBody.into());
        }

        self.repo.update_note(owner, id, title, body)?;
        self.read_back(owner, id, "updated note not found in read-back")
    }

    /// Flips the pinned flag and returns the updated note.
    pub fn toggle_pin(&self, owner: &OwnerId, id: NoteId) -> NoteResult<Note> {
        let current = self
            .repo
            .get_note(owner, id)?
            .ok_or(NoteServiceError::NoteNotFound(id))?;
        self.repo.set_note_pinned(owner, id, !current.pinned)?;
        self.read_back(owner, id, "note missing after pin toggle")
    }

    pub fn delete_note(&self, owner: &OwnerId, id: NoteId) -> NoteResult<()> {
        self.repo.delete_note(owner, id)?;
        info!("event=note_delete module=service status=ok");
        Ok(())
    }

    pub fn get_note(&self, owner: &OwnerId, id: NoteId) -> NoteResult<Option<Note>> {
        Ok(self.repo.get_note(owner, id)?)
    }

    /// Lists notes matching `query` (all notes when `None` or blank).
    pub fn list_notes(&self, owner: &OwnerId, query: Option<&str>) -> NoteResult<Vec<Note>> {
        let mut notes = self.repo.list_notes(owner)?;
        if let Some(query) = query {
            notes.retain(|note| note_matches(note, query));
        }
        sort_for_display(&mut notes);
        Ok(notes)
    }

    /// Same as `list_notes`, projected into cards.
    pub fn list_note_cards(
        &self,
        owner: &OwnerId,
        query: Option<&str>,
    ) -> NoteResult<Vec<NoteCard>> {
        Ok(self
            .list_notes(owner, query)?
            .into_iter()
            .map(note_card)
            .collect())
    }

    fn read_back(&self, owner: &OwnerId, id: NoteId, details: &'static str) -> NoteResult<Note> {
        self.repo
            .get_note(owner, id)?
            .ok_or(NoteServiceError::InconsistentState(details))
    }
}

/// Builds the display card for `note`.
pub fn note_card(note: Note) -> NoteCard {
    let display_text = clean_display_text(&note.body);
    let copy_items = extract_copyable_spans(&note.body)
        .map(|span| CopyButton {
            label: truncate_label(&span.display_label, COPY_LABEL_MAX_CHARS),
            copy_value: span.copy_value,
        })
        .collect();

    NoteCard {
        note,
        display_text,
        copy_items,
    }
}

/// Whether `query` matches the note title or its cleaned body.
pub fn note_matches(note: &Note, query: &str) -> bool {
    matches_query(&note.title, query) || matches_query(&clean_display_text(&note.body), query)
}

/// Pinned first, then newest first; id breaks ties.
pub fn sort_for_display(notes: &mut [Note]) {
    notes.sort_by(|a, b| match (a.pinned, b.pinned) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => b
            .created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id)),
    });
}

#[cfg(test)]
mod tests {
    use super::{note_card, note_matches, sort_for_display};
    use crate::model::note::Note;
    use crate::model::OwnerId;

    fn note(title: &str, body: &str) -> Note {
        Note::new(OwnerId::new("u1").unwrap(), title, body)
    }

    #[test]
    fn card_resolves_markers_and_truncates_labels() {
        let card = note_card(note(
            "Wifi",
            "Red: [copy:casa-5g] clave [copy:contraseña del router principal|abc123]",
        ));
        assert_eq!(card.display_text, "Red: casa-5g clave abc123");
        assert_eq!(card.copy_items.len(), 2);
        assert_eq!(card.copy_items[0].label, "casa-5g");
        assert_eq!(card.copy_items[1].label, "contraseña del route...");
        assert_eq!(card.copy_items[1].copy_value, "abc123");
    }

    #[test]
    fn search_ignores_marker_syntax_and_accents() {
        let n = note("Códigos", "PIN [copy:Tarjeta|4477]");
        assert!(note_matches(&n, "codigos"));
        assert!(note_matches(&n, "4477"));
        assert!(!note_matches(&n, "tarjeta"));
        assert!(!note_matches(&n, "copy:"));
    }

    #[test]
    fn sort_puts_pinned_first_then_newest() {
        let mut old_pinned = note("a", "x");
        old_pinned.pinned = true;
        old_pinned.created_at = 1;
        let mut newest = note("b", "x");
        newest.created_at = 30;
        let mut older = note("c", "x");
        older.created_at = 20;

        let mut notes = vec![older.clone(), newest.clone(), old_pinned.clone()];
        sort_for_display(&mut notes);
        let titles: Vec<_> = notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }
}
