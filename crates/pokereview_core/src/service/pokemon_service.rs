//! Pokemon use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for pokemon CRUD and the rating aggregate.
//! - Enforce the target-id/payload-id guard before updates.
//!
//! # Invariants
//! - Service APIs never bypass repository guard/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::pokemon::{NewPokemon, Pokemon};
use crate::model::EntityId;
use crate::repo::pokemon_repo::PokemonRepository;
use crate::repo::{RepoError, RepoResult};
use rust_decimal::Decimal;

/// Use-case service wrapper for pokemon operations.
pub struct PokemonService<R: PokemonRepository> {
    repo: R,
}

impl<R: PokemonRepository> PokemonService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a pokemon linked to an owner and a category in one unit of
    /// work. Returns the store-assigned id.
    pub fn create_pokemon(
        &mut self,
        owner_id: EntityId,
        category_id: EntityId,
        pokemon: &NewPokemon,
    ) -> RepoResult<EntityId> {
        self.repo.create_pokemon(owner_id, category_id, pokemon)
    }

    /// Updates the pokemon identified by `target_id`.
    ///
    /// # Contract
    /// - Rejects with `IdMismatch` when `pokemon.id != target_id`, before
    ///   any repository call.
    pub fn update_pokemon(&mut self, target_id: EntityId, pokemon: &Pokemon) -> RepoResult<()> {
        if pokemon.id != target_id {
            return Err(RepoError::IdMismatch {
                expected: target_id,
                actual: pokemon.id,
            });
        }
        self.repo.update_pokemon(pokemon)
    }

    /// Deletes one pokemon, cascading its reviews and association rows.
    pub fn delete_pokemon(&mut self, id: EntityId) -> RepoResult<()> {
        self.repo.delete_pokemon(id)
    }

    /// Gets one pokemon by id, reporting `NotFound` for absent rows.
    pub fn get_pokemon(&self, id: EntityId) -> RepoResult<Pokemon> {
        self.repo.get_pokemon(id)?.ok_or(RepoError::NotFound {
            entity: "pokemon",
            id,
        })
    }

    /// Gets one pokemon by exact name.
    pub fn get_pokemon_by_name(&self, name: &str) -> RepoResult<Option<Pokemon>> {
        self.repo.get_pokemon_by_name(name)
    }

    /// Lists all pokemon in ascending id order.
    pub fn list_pokemon(&self) -> RepoResult<Vec<Pokemon>> {
        self.repo.list_pokemon()
    }

    /// Returns whether a pokemon with this id exists.
    pub fn pokemon_exists(&self, id: EntityId) -> RepoResult<bool> {
        self.repo.pokemon_exists(id)
    }

    /// Returns the mean review rating of one pokemon.
    ///
    /// # Contract
    /// - `NotFound` when the pokemon id does not exist.
    /// - Exactly zero when the pokemon exists but has no reviews.
    pub fn pokemon_rating(&self, id: EntityId) -> RepoResult<Decimal> {
        if !self.repo.pokemon_exists(id)? {
            return Err(RepoError::NotFound {
                entity: "pokemon",
                id,
            });
        }
        self.repo.pokemon_rating(id)
    }
}
