//! Pokémon domain model.
//!
//! # Invariants
//! - `name` is unique across all pokemon under trim + casefold comparison.
//! - A pokemon is always created linked to one owner and one category.

use crate::model::EntityId;
use serde::{Deserialize, Serialize};

/// Persisted pokemon row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    /// Store-assigned surrogate key.
    pub id: EntityId,
    /// Display name, unique under trim + casefold.
    pub name: String,
    /// Birth date in Unix epoch milliseconds.
    pub birth_date: i64,
}

/// Creation payload for a pokemon. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPokemon {
    pub name: String,
    /// Birth date in Unix epoch milliseconds.
    pub birth_date: i64,
}

impl NewPokemon {
    pub fn new(name: impl Into<String>, birth_date: i64) -> Self {
        Self {
            name: name.into(),
            birth_date,
        }
    }
}
