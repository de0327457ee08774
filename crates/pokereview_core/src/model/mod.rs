//! Domain model for the Pokémon review catalogue.
//!
//! # Responsibility
//! - Define canonical entity structs used by repositories and services.
//! - Keep surrogate-key identity explicit in every signature.
//!
//! # Invariants
//! - Every persisted entity is identified by a store-assigned `EntityId`.
//! - Ids are immutable once assigned and never reused for another row.
//!
//! # See also
//! - db/migrations/0001_init.sql

pub mod category;
pub mod owner;
pub mod pokemon;
pub mod review;

/// Store-assigned surrogate key shared by all entity kinds.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EntityId = i64;
