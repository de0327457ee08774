//! Owner repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the canonical `owners` table.
//! - Answer both directions of the pokemon↔owner association.
//!
//! # Invariants
//! - Creates and updates reject a `country_id` that references no row.
//! - Deleting an owner removes its association rows in the same
//!   transaction; owned pokemon themselves are untouched.

use crate::model::owner::{NewOwner, Owner};
use crate::model::pokemon::Pokemon;
use crate::model::EntityId;
use crate::repo::{
    classify_name_conflict, ensure_connection_ready, name_taken, row_exists, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row, TransactionBehavior};

const OWNER_SELECT_SQL: &str = "SELECT id, first_name, last_name, gate, country_id FROM owners";

/// Repository interface for owner CRUD and association traversals.
pub trait OwnerRepository {
    /// Creates one owner and returns its store-assigned id.
    fn create_owner(&mut self, owner: &NewOwner) -> RepoResult<EntityId>;
    /// Replaces the row identified by `owner.id`.
    fn update_owner(&mut self, owner: &Owner) -> RepoResult<()>;
    /// Deletes one owner and its association rows.
    fn delete_owner(&mut self, id: EntityId) -> RepoResult<()>;
    /// Gets one owner by id.
    fn get_owner(&self, id: EntityId) -> RepoResult<Option<Owner>>;
    /// Lists all owners in ascending id order.
    fn list_owners(&self) -> RepoResult<Vec<Owner>>;
    /// Returns whether an owner row with this id exists.
    fn owner_exists(&self, id: EntityId) -> RepoResult<bool>;
    /// Lists pokemon linked to this owner, ascending pokemon id.
    fn pokemon_by_owner(&self, owner_id: EntityId) -> RepoResult<Vec<Pokemon>>;
    /// Lists owners linked to this pokemon, ascending owner id.
    fn owners_of_pokemon(&self, pokemon_id: EntityId) -> RepoResult<Vec<Owner>>;
}

/// SQLite-backed owner repository.
pub struct SqliteOwnerRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteOwnerRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                (
                    "owners",
                    &["id", "first_name", "last_name", "gate", "country_id"],
                ),
                ("pokemon_owners", &["pokemon_id", "owner_id"]),
            ],
        )?;
        Ok(Self { conn })
    }
}

impl OwnerRepository for SqliteOwnerRepository<'_> {
    fn create_owner(&mut self, owner: &NewOwner) -> RepoResult<EntityId> {
        if name_taken(self.conn, "owners", "first_name", &owner.first_name)? {
            return Err(RepoError::DuplicateName {
                entity: "owner",
                name: owner.first_name.clone(),
            });
        }
        if !row_exists(self.conn, "countries", owner.country_id)? {
            return Err(RepoError::DanglingReference {
                entity: "country",
                id: owner.country_id,
            });
        }

        self.conn
            .execute(
                "INSERT INTO owners (first_name, last_name, gate, country_id)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    owner.first_name.as_str(),
                    owner.last_name.as_str(),
                    owner.gate.as_str(),
                    owner.country_id,
                ],
            )
            .map_err(|err| classify_name_conflict(err, "owner", &owner.first_name))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_owner(&mut self, owner: &Owner) -> RepoResult<()> {
        if !row_exists(self.conn, "owners", owner.id)? {
            return Err(RepoError::NotFound {
                entity: "owner",
                id: owner.id,
            });
        }
        if !row_exists(self.conn, "countries", owner.country_id)? {
            return Err(RepoError::DanglingReference {
                entity: "country",
                id: owner.country_id,
            });
        }

        let changed = self.conn.execute(
            "UPDATE owners
             SET first_name = ?1, last_name = ?2, gate = ?3, country_id = ?4
             WHERE id = ?5;",
            params![
                owner.first_name.as_str(),
                owner.last_name.as_str(),
                owner.gate.as_str(),
                owner.country_id,
                owner.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::PersistenceFailure);
        }
        Ok(())
    }

    fn delete_owner(&mut self, id: EntityId) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if !row_exists(&tx, "owners", id)? {
            return Err(RepoError::NotFound {
                entity: "owner",
                id,
            });
        }

        tx.execute("DELETE FROM pokemon_owners WHERE owner_id = ?1;", [id])?;
        let changed = tx.execute("DELETE FROM owners WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::PersistenceFailure);
        }

        tx.commit()?;
        Ok(())
    }

    fn get_owner(&self, id: EntityId) -> RepoResult<Option<Owner>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{OWNER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_owner_row(row)?));
        }
        Ok(None)
    }

    fn list_owners(&self) -> RepoResult<Vec<Owner>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{OWNER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut owners = Vec::new();
        while let Some(row) = rows.next()? {
            owners.push(parse_owner_row(row)?);
        }
        Ok(owners)
    }

    fn owner_exists(&self, id: EntityId) -> RepoResult<bool> {
        row_exists(self.conn, "owners", id)
    }

    fn pokemon_by_owner(&self, owner_id: EntityId) -> RepoResult<Vec<Pokemon>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.name, p.birth_date
             FROM pokemon_owners po
             INNER JOIN pokemon p ON p.id = po.pokemon_id
             WHERE po.owner_id = ?1
             ORDER BY p.id ASC;",
        )?;
        let mut rows = stmt.query([owner_id])?;
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

    fn owners_of_pokemon(&self, pokemon_id: EntityId) -> RepoResult<Vec<Owner>> {
        let mut stmt = self.conn.prepare(
            "SELECT o.id, o.first_name, o.last_name, o.gate, o.country_id
             FROM pokemon_owners po
             INNER JOIN owners o ON o.id = po.owner_id
             WHERE po.pokemon_id = ?1
             ORDER BY o.id ASC;",
        )?;
        let mut rows = stmt.query([pokemon_id])?;
        let mut owners = Vec::new();
        while let Some(row) = rows.next()? {
            owners.push(parse_owner_row(row)?);
        }
        Ok(owners)
    }
}

fn parse_owner_row(row: &Row<'_>) -> RepoResult<Owner> {
    Ok(Owner {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        gate: row.get("gate")?,
        country_id: row.get("country_id")?,
    })
}
