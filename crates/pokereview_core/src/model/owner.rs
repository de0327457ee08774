//! Owner and country domain models.
//!
//! # Invariants
//! - Every owner belongs to exactly one existing country.
//! - `Owner::first_name` and `Country::name` are unique under trim + casefold.

use crate::model::EntityId;
use serde::{Deserialize, Serialize};

/// Persisted country row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Store-assigned surrogate key.
    pub id: EntityId,
    /// Display name, unique under trim + casefold.
    pub name: String,
}

/// Persisted owner row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Store-assigned surrogate key.
    pub id: EntityId,
    /// Unique under trim + casefold.
    pub first_name: String,
    pub last_name: String,
    /// Gate/address line, free-form.
    pub gate: String,
    /// Must reference an existing country row.
    pub country_id: EntityId,
}

/// Creation payload for an owner. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOwner {
    pub first_name: String,
    pub last_name: String,
    pub gate: String,
    pub country_id: EntityId,
}
