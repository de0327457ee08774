//! Pokemon repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the canonical `pokemon` table.
//! - Coordinate the three-way create (pokemon row + both association rows)
//!   as one transaction.
//! - Compute the derived rating aggregate from current review rows.
//!
//! # Invariants
//! - `create_pokemon` rejects dangling owner/category ids before writing
//!   anything; either all three rows commit or none do.
//! - `delete_pokemon` removes dependent reviews and association rows in the
//!   same transaction as the pokemon row; a cascade failure aborts the
//!   whole delete.
//! - The rating aggregate is recomputed on every call, never cached.

use crate::model::pokemon::{NewPokemon, Pokemon};
use crate::model::EntityId;
use crate::repo::{
    classify_name_conflict, ensure_connection_ready, name_taken, row_exists, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row, TransactionBehavior};
use rust_decimal::Decimal;

const POKEMON_SELECT_SQL: &str = "SELECT id, name, birth_date FROM pokemon";

/// Repository interface for pokemon CRUD and the rating aggregate.
pub trait PokemonRepository {
    /// Creates one pokemon linked to an owner and a category, atomically.
    fn create_pokemon(
        &mut self,
        owner_id: EntityId,
        category_id: EntityId,
        pokemon: &NewPokemon,
    ) -> RepoResult<EntityId>;
    /// Replaces the row identified by `pokemon.id`.
    fn update_pokemon(&mut self, pokemon: &Pokemon) -> RepoResult<()>;
    /// Deletes one pokemon, cascading its reviews and association rows.
    fn delete_pokemon(&mut self, id: EntityId) -> RepoResult<()>;
    /// Gets one pokemon by id.
    fn get_pokemon(&self, id: EntityId) -> RepoResult<Option<Pokemon>>;
    /// Gets one pokemon by exact name.
    fn get_pokemon_by_name(&self, name: &str) -> RepoResult<Option<Pokemon>>;
    /// Lists all pokemon in ascending id order.
    fn list_pokemon(&self) -> RepoResult<Vec<Pokemon>>;
    /// Returns whether a pokemon row with this id exists.
    fn pokemon_exists(&self, id: EntityId) -> RepoResult<bool>;
    /// Returns the mean review rating, or exactly zero with no reviews.
    fn pokemon_rating(&self, id: EntityId) -> RepoResult<Decimal>;
}

/// SQLite-backed pokemon repository.
pub struct SqlitePokemonRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqlitePokemonRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                ("pokemon", &["id", "name", "birth_date"]),
                ("pokemon_owners", &["pokemon_id", "owner_id"]),
                ("pokemon_categories", &["pokemon_id", "category_id"]),
                ("reviews", &["id", "pokemon_id", "rating"]),
            ],
        )?;
        Ok(Self { conn })
    }
}

impl PokemonRepository for SqlitePokemonRepository<'_> {
    fn create_pokemon(
        &mut self,
        owner_id: EntityId,
        category_id: EntityId,
        pokemon: &NewPokemon,
    ) -> RepoResult<EntityId> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if name_taken(&tx, "pokemon", "name", &pokemon.name)? {
            return Err(RepoError::DuplicateName {
                entity: "pokemon",
                name: pokemon.name.clone(),
            });
        }
        if !row_exists(&tx, "owners", owner_id)? {
            return Err(RepoError::DanglingReference {
                entity: "owner",
                id: owner_id,
            });
        }
        if !row_exists(&tx, "categories", category_id)? {
            return Err(RepoError::DanglingReference {
                entity: "category",
                id: category_id,
            });
        }

        tx.execute(
            "INSERT INTO pokemon (name, birth_date) VALUES (?1, ?2);",
            params![pokemon.name.as_str(), pokemon.birth_date],
        )
        .map_err(|err| classify_name_conflict(err, "pokemon", &pokemon.name))?;
        let pokemon_id = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO pokemon_owners (pokemon_id, owner_id) VALUES (?1, ?2);",
            params![pokemon_id, owner_id],
        )?;
        tx.execute(
            "INSERT INTO pokemon_categories (pokemon_id, category_id) VALUES (?1, ?2);",
            params![pokemon_id, category_id],
        )?;

        tx.commit()?;
        Ok(pokemon_id)
    }

    fn update_pokemon(&mut self, pokemon: &Pokemon) -> RepoResult<()> {
        if !row_exists(self.conn, "pokemon", pokemon.id)? {
            return Err(RepoError::NotFound {
                entity: "pokemon",
                id: pokemon.id,
            });
        }

        let changed = self.conn.execute(
            "UPDATE pokemon SET name = ?1, birth_date = ?2 WHERE id = ?3;",
            params![pokemon.name.as_str(), pokemon.birth_date, pokemon.id],
        )?;

        if changed == 0 {
            return Err(RepoError::PersistenceFailure);
        }
        Ok(())
    }

    fn delete_pokemon(&mut self, id: EntityId) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if !row_exists(&tx, "pokemon", id)? {
            return Err(RepoError::NotFound {
                entity: "pokemon",
                id,
            });
        }

        // Review cascade is mandatory: any failure here rolls the whole
        // delete back rather than leaving orphaned reviews behind.
        tx.execute("DELETE FROM reviews WHERE pokemon_id = ?1;", [id])?;
        tx.execute("DELETE FROM pokemon_owners WHERE pokemon_id = ?1;", [id])?;
        tx.execute(
            "DELETE FROM pokemon_categories WHERE pokemon_id = ?1;",
            [id],
        )?;

        let changed = tx.execute("DELETE FROM pokemon WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::PersistenceFailure);
        }

        tx.commit()?;
        Ok(())
    }

    fn get_pokemon(&self, id: EntityId) -> RepoResult<Option<Pokemon>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POKEMON_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_pokemon_row(row)?));
        }
        Ok(None)
    }

    fn get_pokemon_by_name(&self, name: &str) -> RepoResult<Option<Pokemon>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POKEMON_SELECT_SQL} WHERE name = ?1;"))?;
        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_pokemon_row(row)?));
        }
        Ok(None)
    }

    fn list_pokemon(&self) -> RepoResult<Vec<Pokemon>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POKEMON_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut pokemon = Vec::new();
        while let Some(row) = rows.next()? {
            pokemon.push(parse_pokemon_row(row)?);
        }
        Ok(pokemon)
    }

    fn pokemon_exists(&self, id: EntityId) -> RepoResult<bool> {
        row_exists(self.conn, "pokemon", id)
    }

    fn pokemon_rating(&self, id: EntityId) -> RepoResult<Decimal> {
        let mut stmt = self
            .conn
            .prepare("SELECT rating FROM reviews WHERE pokemon_id = ?1;")?;
        let mut rows = stmt.query([id])?;

        let mut sum: i64 = 0;
        let mut count: i64 = 0;
        while let Some(row) = rows.next()? {
            sum += row.get::<_, i64>(0)?;
            count += 1;
        }

        if count == 0 {
            return Ok(Decimal::ZERO);
        }
        Ok(Decimal::from(sum) / Decimal::from(count))
    }
}

fn parse_pokemon_row(row: &Row<'_>) -> RepoResult<Pokemon> {
    Ok(Pokemon {
        id: row.get("id")?,
        name: row.get("name")?,
        birth_date: row.get("birth_date")?,
    })
}
