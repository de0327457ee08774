//! Reviewer repository contract and SQLite implementation.
//!
//! # Invariants
//! - Reviewer last names are unique under trim + casefold.
//! - Deleting a reviewer cascades that reviewer's reviews in the same
//!   transaction; a cascade failure aborts the whole delete.

use crate::model::review::{NewReviewer, Review, Reviewer};
use crate::model::EntityId;
use crate::repo::{
    classify_name_conflict, ensure_connection_ready, name_taken, row_exists, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row, TransactionBehavior};

/// Repository interface for reviewer CRUD and review traversals.
pub trait ReviewerRepository {
    /// Creates one reviewer and returns its store-assigned id.
    fn create_reviewer(&mut self, reviewer: &NewReviewer) -> RepoResult<EntityId>;
    /// Replaces the row identified by `reviewer.id`.
    fn update_reviewer(&mut self, reviewer: &Reviewer) -> RepoResult<()>;
    /// Deletes one reviewer and all reviews they wrote.
    fn delete_reviewer(&mut self, id: EntityId) -> RepoResult<()>;
    /// Gets one reviewer by id.
    fn get_reviewer(&self, id: EntityId) -> RepoResult<Option<Reviewer>>;
    /// Lists all reviewers in ascending id order.
    fn list_reviewers(&self) -> RepoResult<Vec<Reviewer>>;
    /// Returns whether a reviewer row with this id exists.
    fn reviewer_exists(&self, id: EntityId) -> RepoResult<bool>;
    /// Lists reviews written by this reviewer, ascending review id.
    fn reviews_by_reviewer(&self, reviewer_id: EntityId) -> RepoResult<Vec<Review>>;
}

/// SQLite-backed reviewer repository.
pub struct SqliteReviewerRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteReviewerRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                ("reviewers", &["id", "first_name", "last_name"]),
                ("reviews", &["id", "reviewer_id"]),
            ],
        )?;
        Ok(Self { conn })
    }
}

impl ReviewerRepository for SqliteReviewerRepository<'_> {
    fn create_reviewer(&mut self, reviewer: &NewReviewer) -> RepoResult<EntityId> {
        if name_taken(self.conn, "reviewers", "last_name", &reviewer.last_name)? {
            return Err(RepoError::DuplicateName {
                entity: "reviewer",
                name: reviewer.last_name.clone(),
            });
        }

        self.conn
            .execute(
                "INSERT INTO reviewers (first_name, last_name) VALUES (?1, ?2);",
                params![reviewer.first_name.as_str(), reviewer.last_name.as_str()],
            )
            .map_err(|err| classify_name_conflict(err, "reviewer", &reviewer.last_name))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_reviewer(&mut self, reviewer: &Reviewer) -> RepoResult<()> {
        if !row_exists(self.conn, "reviewers", reviewer.id)? {
            return Err(RepoError::NotFound {
                entity: "reviewer",
                id: reviewer.id,
            });
        }

        let changed = self.conn.execute(
            "UPDATE reviewers SET first_name = ?1, last_name = ?2 WHERE id = ?3;",
            params![
                reviewer.first_name.as_str(),
                reviewer.last_name.as_str(),
                reviewer.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::PersistenceFailure);
        }
        Ok(())
    }

    fn delete_reviewer(&mut self, id: EntityId) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if !row_exists(&tx, "reviewers", id)? {
            return Err(RepoError::NotFound {
                entity: "reviewer",
                id,
            });
        }

        tx.execute("DELETE FROM reviews WHERE reviewer_id = ?1;", [id])?;
        let changed = tx.execute("DELETE FROM reviewers WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::PersistenceFailure);
        }

        tx.commit()?;
        Ok(())
    }

    fn get_reviewer(&self, id: EntityId) -> RepoResult<Option<Reviewer>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, first_name, last_name FROM reviewers WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_reviewer_row(row)?));
        }
        Ok(None)
    }

    fn list_reviewers(&self) -> RepoResult<Vec<Reviewer>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, first_name, last_name FROM reviewers ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut reviewers = Vec::new();
        while let Some(row) = rows.next()? {
            reviewers.push(parse_reviewer_row(row)?);
        }
        Ok(reviewers)
    }

    fn reviewer_exists(&self, id: EntityId) -> RepoResult<bool> {
        row_exists(self.conn, "reviewers", id)
    }

    fn reviews_by_reviewer(&self, reviewer_id: EntityId) -> RepoResult<Vec<Review>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, text, rating, pokemon_id, reviewer_id
             FROM reviews
             WHERE reviewer_id = ?1
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([reviewer_id])?;
        let mut reviews = Vec::new();
        while let Some(row) = rows.next()? {
            reviews.push(Review {
                id: row.get("id")?,
                title: row.get("title")?,
                text: row.get("text")?,
                rating: row.get("rating")?,
                pokemon_id: row.get("pokemon_id")?,
                reviewer_id: row.get("reviewer_id")?,
            });
        }
        Ok(reviews)
    }
}

fn parse_reviewer_row(row: &Row<'_>) -> RepoResult<Reviewer> {
    Ok(Reviewer {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
    })
}
