//! Review repository contract and SQLite implementation.
//!
//! # Invariants
//! - Review titles are unique under trim + casefold.
//! - Creates and updates reject dangling `pokemon_id`/`reviewer_id`
//!   references before writing.
//! - `reviews_of_pokemon` is the explicit traversal backing both the list
//!   endpoint and the pokemon delete cascade.

use crate::model::review::{NewReview, Review};
use crate::model::EntityId;
use crate::repo::{
    classify_name_conflict, ensure_connection_ready, name_taken, row_exists, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

const REVIEW_SELECT_SQL: &str =
    "SELECT id, title, text, rating, pokemon_id, reviewer_id FROM reviews";

/// Repository interface for review CRUD and traversals.
pub trait ReviewRepository {
    /// Creates one review and returns its store-assigned id.
    fn create_review(&mut self, review: &NewReview) -> RepoResult<EntityId>;
    /// Replaces the row identified by `review.id`.
    fn update_review(&mut self, review: &Review) -> RepoResult<()>;
    /// Deletes one review by id.
    fn delete_review(&mut self, id: EntityId) -> RepoResult<()>;
    /// Gets one review by id.
    fn get_review(&self, id: EntityId) -> RepoResult<Option<Review>>;
    /// Lists all reviews in ascending id order.
    fn list_reviews(&self) -> RepoResult<Vec<Review>>;
    /// Returns whether a review row with this id exists.
    fn review_exists(&self, id: EntityId) -> RepoResult<bool>;
    /// Lists reviews of one pokemon, ascending review id.
    fn reviews_of_pokemon(&self, pokemon_id: EntityId) -> RepoResult<Vec<Review>>;
}

/// SQLite-backed review repository.
pub struct SqliteReviewRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReviewRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[(
                "reviews",
                &["id", "title", "text", "rating", "pokemon_id", "reviewer_id"],
            )],
        )?;
        Ok(Self { conn })
    }
}

impl ReviewRepository for SqliteReviewRepository<'_> {
    fn create_review(&mut self, review: &NewReview) -> RepoResult<EntityId> {
        if name_taken(self.conn, "reviews", "title", &review.title)? {
            return Err(RepoError::DuplicateName {
                entity: "review",
                name: review.title.clone(),
            });
        }
        if !row_exists(self.conn, "pokemon", review.pokemon_id)? {
            return Err(RepoError::DanglingReference {
                entity: "pokemon",
                id: review.pokemon_id,
            });
        }
        if !row_exists(self.conn, "reviewers", review.reviewer_id)? {
            return Err(RepoError::DanglingReference {
                entity: "reviewer",
                id: review.reviewer_id,
            });
        }

        self.conn
            .execute(
                "INSERT INTO reviews (title, text, rating, pokemon_id, reviewer_id)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    review.title.as_str(),
                    review.text.as_str(),
                    review.rating,
                    review.pokemon_id,
                    review.reviewer_id,
                ],
            )
            .map_err(|err| classify_name_conflict(err, "review", &review.title))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_review(&mut self, review: &Review) -> RepoResult<()> {
        if !row_exists(self.conn, "reviews", review.id)? {
            return Err(RepoError::NotFound {
                entity: "review",
                id: review.id,
            });
        }
        if !row_exists(self.conn, "pokemon", review.pokemon_id)? {
            return Err(RepoError::DanglingReference {
                entity: "pokemon",
                id: review.pokemon_id,
            });
        }
        if !row_exists(self.conn, "reviewers", review.reviewer_id)? {
            return Err(RepoError::DanglingReference {
                entity: "reviewer",
                id: review.reviewer_id,
            });
        }

        let changed = self.conn.execute(
            "UPDATE reviews
             SET title = ?1, text = ?2, rating = ?3, pokemon_id = ?4, reviewer_id = ?5
             WHERE id = ?6;",
            params![
                review.title.as_str(),
                review.text.as_str(),
                review.rating,
                review.pokemon_id,
                review.reviewer_id,
                review.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::PersistenceFailure);
        }
        Ok(())
    }

    fn delete_review(&mut self, id: EntityId) -> RepoResult<()> {
        if !row_exists(self.conn, "reviews", id)? {
            return Err(RepoError::NotFound {
                entity: "review",
                id,
            });
        }

        let changed = self.conn.execute("DELETE FROM reviews WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::PersistenceFailure);
        }
        Ok(())
    }

    fn get_review(&self, id: EntityId) -> RepoResult<Option<Review>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REVIEW_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_review_row(row)?));
        }
        Ok(None)
    }

    fn list_reviews(&self) -> RepoResult<Vec<Review>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REVIEW_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut reviews = Vec::new();
        while let Some(row) = rows.next()? {
            reviews.push(parse_review_row(row)?);
        }
        Ok(reviews)
    }

    fn review_exists(&self, id: EntityId) -> RepoResult<bool> {
        row_exists(self.conn, "reviews", id)
    }

    fn reviews_of_pokemon(&self, pokemon_id: EntityId) -> RepoResult<Vec<Review>> {
        let mut stmt = self.conn.prepare(&format!(
            "{REVIEW_SELECT_SQL} WHERE pokemon_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([pokemon_id])?;
        let mut reviews = Vec::new();
        while let Some(row) = rows.next()? {
            reviews.push(parse_review_row(row)?);
        }
        Ok(reviews)
    }
}

fn parse_review_row(row: &Row<'_>) -> RepoResult<Review> {
    Ok(Review {
        id: row.get("id")?,
        title: row.get("title")?,
        text: row.get("text")?,
        rating: row.get("rating")?,
        pokemon_id: row.get("pokemon_id")?,
        reviewer_id: row.get("reviewer_id")?,
    })
}
