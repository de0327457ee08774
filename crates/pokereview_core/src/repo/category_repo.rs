//! Category repository contract and SQLite implementation.
//!
//! # Invariants
//! - Category names are unique under trim + casefold.
//! - Deleting a category removes its association rows in the same
//!   transaction; linked pokemon themselves are untouched.

use crate::model::category::Category;
use crate::model::pokemon::Pokemon;
use crate::model::EntityId;
use crate::repo::{
    classify_name_conflict, ensure_connection_ready, name_taken, row_exists, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row, TransactionBehavior};

/// Repository interface for category CRUD and association traversals.
pub trait CategoryRepository {
    /// Creates one category and returns its store-assigned id.
    fn create_category(&mut self, name: &str) -> RepoResult<EntityId>;
    /// Replaces the row identified by `category.id`.
    fn update_category(&mut self, category: &Category) -> RepoResult<()>;
    /// Deletes one category and its association rows.
    fn delete_category(&mut self, id: EntityId) -> RepoResult<()>;
    /// Gets one category by id.
    fn get_category(&self, id: EntityId) -> RepoResult<Option<Category>>;
    /// Lists all categories in ascending id order.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Returns whether a category row with this id exists.
    fn category_exists(&self, id: EntityId) -> RepoResult<bool>;
    /// Lists pokemon linked to this category, ascending pokemon id.
    fn pokemon_by_category(&self, category_id: EntityId) -> RepoResult<Vec<Pokemon>>;
    /// Lists categories linked to this pokemon, ascending category id.
    fn categories_of_pokemon(&self, pokemon_id: EntityId) -> RepoResult<Vec<Category>>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                ("categories", &["id", "name"]),
                ("pokemon_categories", &["pokemon_id", "category_id"]),
            ],
        )?;
        Ok(Self { conn })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn create_category(&mut self, name: &str) -> RepoResult<EntityId> {
        if name_taken(self.conn, "categories", "name", name)? {
            return Err(RepoError::DuplicateName {
                entity: "category",
                name: name.to_string(),
            });
        }

        self.conn
            .execute("INSERT INTO categories (name) VALUES (?1);", [name])
            .map_err(|err| classify_name_conflict(err, "category", name))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_category(&mut self, category: &Category) -> RepoResult<()> {
        if !row_exists(self.conn, "categories", category.id)? {
            return Err(RepoError::NotFound {
                entity: "category",
                id: category.id,
            });
        }

        let changed = self.conn.execute(
            "UPDATE categories SET name = ?1 WHERE id = ?2;",
            params![category.name.as_str(), category.id],
        )?;

        if changed == 0 {
            return Err(RepoError::PersistenceFailure);
        }
        Ok(())
    }

    fn delete_category(&mut self, id: EntityId) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if !row_exists(&tx, "categories", id)? {
            return Err(RepoError::NotFound {
                entity: "category",
                id,
            });
        }

        tx.execute(
            "DELETE FROM pokemon_categories WHERE category_id = ?1;",
            [id],
        )?;
        let changed = tx.execute("DELETE FROM categories WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::PersistenceFailure);
        }

        tx.commit()?;
        Ok(())
    }

    fn get_category(&self, id: EntityId) -> RepoResult<Option<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_category_row(row)?));
        }
        Ok(None)
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn category_exists(&self, id: EntityId) -> RepoResult<bool> {
        row_exists(self.conn, "categories", id)
    }

    fn pokemon_by_category(&self, category_id: EntityId) -> RepoResult<Vec<Pokemon>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.name, p.birth_date
             FROM pokemon_categories pc
             INNER JOIN pokemon p ON p.id = pc.pokemon_id
             WHERE pc.category_id = ?1
             ORDER BY p.id ASC;",
        )?;
        let mut rows = stmt.query([category_id])?;
        let mut pokemon = Vec::new();
        while let Some(row) = rows.next()? {
            pokemon.push(Pokemon {
                id: row.get("id")?,
                name: row.get("name")?,
                birth_date: row.get("birth_date")?,
            });
        }
        Ok(pokemon)
    }

    fn categories_of_pokemon(&self, pokemon_id: EntityId) -> RepoResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.name
             FROM pokemon_categories pc
             INNER JOIN categories c ON c.id = pc.category_id
             WHERE pc.pokemon_id = ?1
             ORDER BY c.id ASC;",
        )?;
        let mut rows = stmt.query([pokemon_id])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    Ok(Category {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
