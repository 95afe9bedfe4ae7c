//! Note repository contract and SQLite implementation.
//!
//! # Invariants
//! - `created_at` is set once at creation and never rewritten.
//! - `list_notes` returns pinned notes first, then newest `created_at` first.

use super::{bool_to_int, parse_flag, parse_uuid, RepoError, RepoResult};
use crate::model::note::{Note, NoteId};
use crate::model::OwnerId;
use rusqlite::{params, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    owner_id,
    title,
    body,
    pinned,
    created_at,
    updated_at
FROM notes";

/// Owner-scoped note storage.
pub trait NoteRepository {
    fn list_notes(&self, owner: &OwnerId) -> RepoResult<Vec<Note>>;
    fn get_note(&self, owner: &OwnerId, id: NoteId) -> RepoResult<Option<Note>>;
    fn create_note(&self, note: &Note) -> RepoResult<NoteId>;
    /// Replaces title and body; pin state and timestamps are managed separately.
    fn update_note(&self, owner: &OwnerId, id: NoteId, title: &str, body: &str) -> RepoResult<()>;
    fn set_note_pinned(&self, owner: &OwnerId, id: NoteId, pinned: bool) -> RepoResult<()>;
    fn delete_note(&self, owner: &OwnerId, id: NoteId) -> RepoResult<()>;
}

pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn list_notes(&self, owner: &OwnerId) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE owner_id = ?1
             ORDER BY pinned DESC, created_at DESC, id ASC;"
        ))?;
        let mut rows = stmt.query([owner.as_str()])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn get_note(&self, owner: &OwnerId, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL} WHERE owner_id = ?1 AND id = ?2;"
        ))?;
        let mut rows = stmt.query(params![owner.as_str(), id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }
        Ok(None)
    }

    fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        note.validate()?;
        self.conn.execute(
            "INSERT INTO notes (
                id,
                owner_id,
                title,
                body,
                pinned,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                note.id.to_string(),
                note.owner_id.as_str(),
                note.title.as_str(),
                note.body.as_str(),
                bool_to_int(note.pinned),
                note.created_at,
                note.updated_at,
            ],
        )?;
        Ok(note.id)
    }

    fn update_note(&self, owner: &OwnerId, id: NoteId, title: &str, body: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = ?1,
                body = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE owner_id = ?3 AND id = ?4;",
            params![title, body, owner.as_str(), id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn set_note_pinned(&self, owner: &OwnerId, id: NoteId, pinned: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes SET pinned = ?1 WHERE owner_id = ?2 AND id = ?3;",
            params![bool_to_int(pinned), owner.as_str(), id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_note(&self, owner: &OwnerId, id: NoteId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM notes WHERE owner_id = ?1 AND id = ?2;",
            params![owner.as_str(), id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id_text: String = row.get("id")?;
    let owner_text: String = row.get("owner_id")?;
    let note = Note {
        id: parse_uuid(&id_text, "notes.id")?,
        owner_id: OwnerId::new(owner_text)?,
        title: row.get("title")?,
        body: row.get("body")?,
        pinned: parse_flag(row.get("pinned")?, "notes.pinned")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    note.validate()?;
    Ok(note)
}
