//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts, one per aggregate.
//! - Isolate SQLite query details from service/business orchestration.
//! - Classify every failure into the semantic error taxonomy before it
//!   reaches a caller; raw store errors never escape unclassified writes.
//!
//! # Invariants
//! - Write paths enforce guard checks (duplicate name, dangling reference,
//!   existence) before any SQL mutation; multi-row writes commit as one
//!   transaction.
//! - Read paths reject invalid persisted state instead of masking it.
//! - List queries return rows in ascending id order.

pub mod category_repo;
pub mod country_repo;
pub mod owner_repo;
pub mod pokemon_repo;
pub mod review_repo;
pub mod reviewer_repo;

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::EntityId;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Semantic error taxonomy shared by all repositories.
///
/// The transport collaborator maps each variant to a protocol response;
/// the core's only contract is to report the correct kind.
#[derive(Debug)]
pub enum RepoError {
    /// The referenced id does not exist for the named entity kind.
    NotFound {
        entity: &'static str,
        id: EntityId,
    },
    /// A create would collide with an existing name under trim + casefold.
    DuplicateName {
        entity: &'static str,
        name: String,
    },
    /// An update payload's id does not match the out-of-band target id.
    IdMismatch {
        expected: EntityId,
        actual: EntityId,
    },
    /// A write referenced a foreign id that does not exist.
    DanglingReference {
        entity: &'static str,
        id: EntityId,
    },
    /// A commit affected zero rows or the transaction aborted.
    PersistenceFailure,
    /// Transport-level database failure.
    Db(DbError),
    /// Persisted state failed a read-path sanity check.
    InvalidData(String),
    /// The connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// A table required by this repository is missing.
    MissingRequiredTable(&'static str),
    /// A column required by this repository is missing.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::DuplicateName { entity, name } => {
                write!(f, "{entity} name already exists: `{name}`")
            }
            Self::IdMismatch { expected, actual } => write!(
                f,
                "payload id {actual} does not match target id {expected}"
            ),
            Self::DanglingReference { entity, id } => {
                write!(f, "referenced {entity} does not exist: {id}")
            }
            Self::PersistenceFailure => write!(f, "persistence failure: commit changed no rows"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table missing: {table}"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column missing: {table}.{column}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Normalizes a name for uniqueness comparison: trim both ends, casefold.
///
/// Mirrors the `lower(trim(...))` expression backing the unique indexes.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Maps a unique-index violation on `name` to `DuplicateName`.
///
/// Closes the race window left by the pre-check: if a concurrent create
/// slips past it, the store constraint still reports the semantic error.
pub(crate) fn classify_name_conflict(
    err: rusqlite::Error,
    entity: &'static str,
    name: &str,
) -> RepoError {
    if let rusqlite::Error::SqliteFailure(code, _) = &err {
        if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
            return RepoError::DuplicateName {
                entity,
                name: name.to_string(),
            };
        }
    }
    err.into()
}

/// Verifies that the connection has been migrated and carries the tables
/// and columns a repository depends on. Called from every `try_new`.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    requirements: &[(&'static str, &[&'static str])],
) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for (table, columns) in requirements {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for column in *columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

pub(crate) fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

pub(crate) fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Existence probe shared by guard checks across repositories.
pub(crate) fn row_exists(conn: &Connection, table: &str, id: EntityId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1);"),
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Duplicate-name probe shared by create guards.
///
/// Comparison is symmetric: both the incoming and the stored name are
/// trimmed on both ends and casefolded.
pub(crate) fn name_taken(
    conn: &Connection,
    table: &str,
    column: &str,
    name: &str,
) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!(
            "SELECT EXISTS(
                SELECT 1 FROM {table}
                WHERE lower(trim({column})) = lower(trim(?1))
            );"
        ),
        [name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
