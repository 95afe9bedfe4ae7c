//! Task repository contract and SQLite implementation.
//!
//! # Invariants
//! - Dates are stored as ISO `yyyy-mm-dd` text, so lexical order is date order.
//! - Lists are ordered by `date ASC, title ASC`.

use super::{bool_to_int, parse_flag, parse_uuid, RepoError, RepoResult};
use crate::calendar::{format_iso, parse_iso, CalendarDate};
use crate::model::task::{Task, TaskId};
use crate::model::OwnerId;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    owner_id,
    title,
    date,
    category_id,
    description,
    custom_color,
    completed
FROM tasks";

/// Owner-scoped task storage.
pub trait TaskRepository {
    fn list_tasks(&self, owner: &OwnerId) -> RepoResult<Vec<Task>>;
    /// Tasks with `from <= date <= to`.
    fn list_tasks_in_range(
        &self,
        owner: &OwnerId,
        from: CalendarDate,
        to: CalendarDate,
    ) -> RepoResult<Vec<Task>>;
    fn get_task(&self, owner: &OwnerId, id: TaskId) -> RepoResult<Option<Task>>;
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn set_task_completed(&self, owner: &OwnerId, id: TaskId, completed: bool) -> RepoResult<()>;
    fn delete_task(&self, owner: &OwnerId, id: TaskId) -> RepoResult<()>;
}

pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_tasks(&self, filter_sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<Task>> {
        let sql = format!(
            "{TASK_SELECT_SQL} WHERE {filter_sql} ORDER BY date ASC, title COLLATE NOCASE ASC, id ASC;"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn list_tasks(&self, owner: &OwnerId) -> RepoResult<Vec<Task>> {
        self.query_tasks("owner_id = ?", vec![Value::Text(owner.to_string())])
    }

    fn list_tasks_in_range(
        &self,
        owner: &OwnerId,
        from: CalendarDate,
        to: CalendarDate,
    ) -> RepoResult<Vec<Task>> {
        self.query_tasks(
            "owner_id = ? AND date >= ? AND date <= ?",
            vec![
                Value::Text(owner.to_string()),
                Value::Text(format_iso(from)),
                Value::Text(format_iso(to)),
            ],
        )
    }

    fn get_task(&self, owner: &OwnerId, id: TaskId) -> RepoResult<Option<Task>> {
        let mut tasks = self.query_tasks(
            "owner_id = ? AND id = ?",
            vec![Value::Text(owner.to_string()), Value::Text(id.to_string())],
        )?;
        Ok(tasks.pop())
    }

    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;
        self.conn.execute(
            "INSERT INTO tasks (
                id,
                owner_id,
                title,
                date,
                category_id,
                description,
                custom_color,
                completed
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                task.id.to_string(),
                task.owner_id.as_str(),
                task.title.as_str(),
                format_iso(task.date),
                task.category_id.to_string(),
                task.description.as_deref(),
                task.custom_color.as_deref(),
                bool_to_int(task.completed),
            ],
        )?;
        Ok(task.id)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                date = ?2,
                category_id = ?3,
                description = ?4,
                custom_color = ?5,
                completed = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE owner_id = ?7 AND id = ?8;",
            params![
                task.title.as_str(),
                format_iso(task.date),
                task.category_id.to_string(),
                task.description.as_deref(),
                task.custom_color.as_deref(),
                bool_to_int(task.completed),
                task.owner_id.as_str(),
                task.id.to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }
        Ok(())
    }

    fn set_task_completed(&self, owner: &OwnerId, id: TaskId, completed: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET completed = ?1, updated_at = (strftime('%s', 'now') * 1000)
             WHERE owner_id = ?2 AND id = ?3;",
            params![bool_to_int(completed), owner.as_str(), id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_task(&self, owner: &OwnerId, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM tasks WHERE owner_id = ?1 AND id = ?2;",
            params![owner.as_str(), id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id_text: String = row.get("id")?;
    let owner_text: String = row.get("owner_id")?;
    let date_text: String = row.get("date")?;
    let category_text: String = row.get("category_id")?;

    let date = parse_iso(&date_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid date `{date_text}` in tasks.date"))
    })?;

    let task = Task {
        id: parse_uuid(&id_text, "tasks.id")?,
        owner_id: OwnerId::new(owner_text)?,
        title: row.get("title")?,
        date,
        category_id: parse_uuid(&category_text, "tasks.category_id")?,
        description: row.get("description")?,
        custom_color: row.get("custom_color")?,
        completed: parse_flag(row.get("completed")?, "tasks.completed")?,
    };
    task.validate()?;
    Ok(task)
}
