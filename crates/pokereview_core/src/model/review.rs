//! Review and reviewer domain models.
//!
//! # Invariants
//! - Every review belongs to exactly one pokemon and one reviewer.
//! - `Review::title` and `Reviewer::last_name` are unique under
//!   trim + casefold.
//! - `rating` is stored as written; the per-pokemon average is derived on
//!   demand and never persisted.

use crate::model::EntityId;
use serde::{Deserialize, Serialize};

/// Persisted reviewer row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    /// Store-assigned surrogate key.
    pub id: EntityId,
    pub first_name: String,
    /// Unique under trim + casefold.
    pub last_name: String,
}

/// Creation payload for a reviewer. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReviewer {
    pub first_name: String,
    pub last_name: String,
}

/// Persisted review row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Store-assigned surrogate key.
    pub id: EntityId,
    /// Unique under trim + casefold.
    pub title: String,
    pub text: String,
    /// Integer rating as submitted by the reviewer.
    pub rating: i64,
    /// Must reference an existing pokemon row.
    pub pokemon_id: EntityId,
    /// Must reference an existing reviewer row.
    pub reviewer_id: EntityId,
}

/// Creation payload for a review. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub title: String,
    pub text: String,
    pub rating: i64,
    pub pokemon_id: EntityId,
    pub reviewer_id: EntityId,
}
