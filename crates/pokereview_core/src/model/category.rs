//! Category domain model.

use crate::model::EntityId;
use serde::{Deserialize, Serialize};

/// Persisted category row.
///
/// Categories link to pokemon through the `pokemon_categories` join table;
/// the row itself carries only its unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned surrogate key.
    pub id: EntityId,
    /// Display name, unique under trim + casefold.
    pub name: String,
}
