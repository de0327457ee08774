//! Country repository contract and SQLite implementation.
//!
//! # Invariants
//! - Country names are unique under trim + casefold.
//! - A country with remaining owners cannot be deleted: the FK constraint
//!   blocks the write and surfaces as a database error. Callers must delete
//!   dependent owners first, in line with the explicit-cascade policy.

use crate::model::owner::{Country, Owner};
use crate::model::EntityId;
use crate::repo::{
    classify_name_conflict, ensure_connection_ready, name_taken, row_exists, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

/// Repository interface for country CRUD and owner traversals.
pub trait CountryRepository {
    /// Creates one country and returns its store-assigned id.
    fn create_country(&mut self, name: &str) -> RepoResult<EntityId>;
    /// Replaces the row identified by `country.id`.
    fn update_country(&mut self, country: &Country) -> RepoResult<()>;
    /// Deletes one country. Fails while owners still reference it.
    fn delete_country(&mut self, id: EntityId) -> RepoResult<()>;
    /// Gets one country by id.
    fn get_country(&self, id: EntityId) -> RepoResult<Option<Country>>;
    /// Lists all countries in ascending id order.
    fn list_countries(&self) -> RepoResult<Vec<Country>>;
    /// Returns whether a country row with this id exists.
    fn country_exists(&self, id: EntityId) -> RepoResult<bool>;
    /// Lists owners registered in this country, ascending owner id.
    fn owners_of_country(&self, country_id: EntityId) -> RepoResult<Vec<Owner>>;
    /// Gets the country an owner belongs to.
    fn country_of_owner(&self, owner_id: EntityId) -> RepoResult<Option<Country>>;
}

/// SQLite-backed country repository.
pub struct SqliteCountryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCountryRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                ("countries", &["id", "name"]),
                ("owners", &["id", "country_id"]),
            ],
        )?;
        Ok(Self { conn })
    }
}

impl CountryRepository for SqliteCountryRepository<'_> {
    fn create_country(&mut self, name: &str) -> RepoResult<EntityId> {
        if name_taken(self.conn, "countries", "name", name)? {
            return Err(RepoError::DuplicateName {
                entity: "country",
                name: name.to_string(),
            });
        }

        self.conn
            .execute("INSERT INTO countries (name) VALUES (?1);", [name])
            .map_err(|err| classify_name_conflict(err, "country", name))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_country(&mut self, country: &Country) -> RepoResult<()> {
        if !row_exists(self.conn, "countries", country.id)? {
            return Err(RepoError::NotFound {
                entity: "country",
                id: country.id,
            });
        }

        let changed = self.conn.execute(
            "UPDATE countries SET name = ?1 WHERE id = ?2;",
            params![country.name.as_str(), country.id],
        )?;

        if changed == 0 {
            return Err(RepoError::PersistenceFailure);
        }
        Ok(())
    }

    fn delete_country(&mut self, id: EntityId) -> RepoResult<()> {
        if !row_exists(self.conn, "countries", id)? {
            return Err(RepoError::NotFound {
                entity: "country",
                id,
            });
        }

        let changed = self.conn.execute("DELETE FROM countries WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::PersistenceFailure);
        }
        Ok(())
    }

    fn get_country(&self, id: EntityId) -> RepoResult<Option<Country>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM countries WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_country_row(row)?));
        }
        Ok(None)
    }

    fn list_countries(&self) -> RepoResult<Vec<Country>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM countries ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut countries = Vec::new();
        while let Some(row) = rows.next()? {
            countries.push(parse_country_row(row)?);
        }
        Ok(countries)
    }

    fn country_exists(&self, id: EntityId) -> RepoResult<bool> {
        row_exists(self.conn, "countries", id)
    }

    fn owners_of_country(&self, country_id: EntityId) -> RepoResult<Vec<Owner>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, first_name, last_name, gate, country_id
             FROM owners
             WHERE country_id = ?1
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([country_id])?;
        let mut owners = Vec::new();
        while let Some(row) = rows.next()? {
            owners.push(Owner {
                id: row.get("id")?,
                first_name: row.get("first_name")?,
                last_name: row.get("last_name")?,
                gate: row.get("gate")?,
                country_id: row.get("country_id")?,
            });
        }
        Ok(owners)
    }

    fn country_of_owner(&self, owner_id: EntityId) -> RepoResult<Option<Country>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.name
             FROM owners o
             INNER JOIN countries c ON c.id = o.country_id
             WHERE o.id = ?1;",
        )?;
        let mut rows = stmt.query([owner_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_country_row(row)?));
        }
        Ok(None)
    }
}

fn parse_country_row(row: &Row<'_>) -> RepoResult<Country> {
    Ok(Country {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
