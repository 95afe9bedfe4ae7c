//! Category repository contract and SQLite implementation.

use super::{parse_uuid, RepoError, RepoResult};
use crate::model::category::{Category, CategoryId};
use crate::model::OwnerId;
use rusqlite::{params, Connection, Row};

/// Owner-scoped category storage.
pub trait CategoryRepository {
    /// Lists categories ordered by name (case-insensitive).
    fn list_categories(&self, owner: &OwnerId) -> RepoResult<Vec<Category>>;
    fn get_category(&self, owner: &OwnerId, id: CategoryId) -> RepoResult<Option<Category>>;
    fn create_category(&self, category: &Category) -> RepoResult<CategoryId>;
    fn update_category(&self, category: &Category) -> RepoResult<()>;
    /// Fails with `CategoryInUse` while tasks still reference the category.
    fn delete_category(&self, owner: &OwnerId, id: CategoryId) -> RepoResult<()>;
}

pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn list_categories(&self, owner: &OwnerId) -> RepoResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, name, color
             FROM categories
             WHERE owner_id = ?1
             ORDER BY name COLLATE NOCASE ASC, id ASC;",
        )?;
        let mut rows = stmt.query([owner.as_str()])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn get_category(&self, owner: &OwnerId, id: CategoryId) -> RepoResult<Option<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, name, color
             FROM categories
             WHERE owner_id = ?1 AND id = ?2;",
        )?;
        let mut rows = stmt.query(params![owner.as_str(), id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_category_row(row)?));
        }
        Ok(None)
    }

    fn create_category(&self, category: &Category) -> RepoResult<CategoryId> {
        category.validate()?;
        self.conn.execute(
            "INSERT INTO categories (id, owner_id, name, color) VALUES (?1, ?2, ?3, ?4);",
            params![
                category.id.to_string(),
                category.owner_id.as_str(),
                category.name.as_str(),
                category.color.as_str(),
            ],
        )?;
        Ok(category.id)
    }

    fn update_category(&self, category: &Category) -> RepoResult<()> {
        category.validate()?;
        let changed = self.conn.execute(
            "UPDATE categories SET name = ?1, color = ?2 WHERE owner_id = ?3 AND id = ?4;",
            params![
                category.name.as_str(),
                category.color.as_str(),
                category.owner_id.as_str(),
                category.id.to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(category.id));
        }
        Ok(())
    }

    fn delete_category(&self, owner: &OwnerId, id: CategoryId) -> RepoResult<()> {
        let in_use: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM tasks WHERE owner_id = ?1 AND category_id = ?2
            );",
            params![owner.as_str(), id.to_string()],
            |row| row.get(0),
        )?;
        if in_use == 1 {
            return Err(RepoError::CategoryInUse(id));
        }

        let changed = self.conn.execute(
            "DELETE FROM categories WHERE owner_id = ?1 AND id = ?2;",
            params![owner.as_str(), id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let id_text: String = row.get("id")?;
    let owner_text: String = row.get("owner_id")?;
    let category = Category {
        id: parse_uuid(&id_text, "categories.id")?,
        owner_id: OwnerId::new(owner_text)?,
        name: row.get("name")?,
        color: row.get("color")?,
    };
    category.validate()?;
    Ok(category)
}
