//! Owner and country use-case services.
//!
//! # Responsibility
//! - Provide stable entry points for owner/country CRUD and the
//!   owner-side association traversals.
//! - Enforce the target-id/payload-id guard before updates.

use crate::model::owner::{Country, NewOwner, Owner};
use crate::model::pokemon::Pokemon;
use crate::model::EntityId;
use crate::repo::country_repo::CountryRepository;
use crate::repo::owner_repo::OwnerRepository;
use crate::repo::{RepoError, RepoResult};

/// Use-case service wrapper for owner operations.
pub struct OwnerService<R: OwnerRepository> {
    repo: R,
}

impl<R: OwnerRepository> OwnerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an owner. The referenced country must exist.
    pub fn create_owner(&mut self, owner: &NewOwner) -> RepoResult<EntityId> {
        self.repo.create_owner(owner)
    }

    /// Updates the owner identified by `target_id`.
    ///
    /// Rejects with `IdMismatch` when `owner.id != target_id`.
    pub fn update_owner(&mut self, target_id: EntityId, owner: &Owner) -> RepoResult<()> {
        if owner.id != target_id {
            return Err(RepoError::IdMismatch {
                expected: target_id,
                actual: owner.id,
            });
        }
        self.repo.update_owner(owner)
    }

    /// Deletes one owner and its association rows.
    pub fn delete_owner(&mut self, id: EntityId) -> RepoResult<()> {
        self.repo.delete_owner(id)
    }

    /// Gets one owner by id, reporting `NotFound` for absent rows.
    pub fn get_owner(&self, id: EntityId) -> RepoResult<Owner> {
        self.repo.get_owner(id)?.ok_or(RepoError::NotFound {
            entity: "owner",
            id,
        })
    }

    /// Lists all owners in ascending id order.
    pub fn list_owners(&self) -> RepoResult<Vec<Owner>> {
        self.repo.list_owners()
    }

    /// Lists pokemon owned by this owner.
    ///
    /// Reports `NotFound` when the owner id does not exist, so callers can
    /// distinguish "unknown owner" from "owner with no pokemon".
    pub fn pokemon_by_owner(&self, owner_id: EntityId) -> RepoResult<Vec<Pokemon>> {
        if !self.repo.owner_exists(owner_id)? {
            return Err(RepoError::NotFound {
                entity: "owner",
                id: owner_id,
            });
        }
        self.repo.pokemon_by_owner(owner_id)
    }

    /// Lists owners of this pokemon, ascending owner id.
    pub fn owners_of_pokemon(&self, pokemon_id: EntityId) -> RepoResult<Vec<Owner>> {
        self.repo.owners_of_pokemon(pokemon_id)
    }
}

/// Use-case service wrapper for country operations.
pub struct CountryService<R: CountryRepository> {
    repo: R,
}

impl<R: CountryRepository> CountryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a country from its unique name.
    pub fn create_country(&mut self, name: &str) -> RepoResult<EntityId> {
        self.repo.create_country(name)
    }

    /// Updates the country identified by `target_id`.
    ///
    /// Rejects with `IdMismatch` when `country.id != target_id`.
    pub fn update_country(&mut self, target_id: EntityId, country: &Country) -> RepoResult<()> {
        if country.id != target_id {
            return Err(RepoError::IdMismatch {
                expected: target_id,
                actual: country.id,
            });
        }
        self.repo.update_country(country)
    }

    /// Deletes one country. Fails while owners still reference it.
    pub fn delete_country(&mut self, id: EntityId) -> RepoResult<()> {
        self.repo.delete_country(id)
    }

    /// Gets one country by id, reporting `NotFound` for absent rows.
    pub fn get_country(&self, id: EntityId) -> RepoResult<Country> {
        self.repo.get_country(id)?.ok_or(RepoError::NotFound {
            entity: "country",
            id,
        })
    }

    /// Lists all countries in ascending id order.
    pub fn list_countries(&self) -> RepoResult<Vec<Country>> {
        self.repo.list_countries()
    }

    /// Lists owners registered in this country.
    pub fn owners_of_country(&self, country_id: EntityId) -> RepoResult<Vec<Owner>> {
        if !self.repo.country_exists(country_id)? {
            return Err(RepoError::NotFound {
                entity: "country",
                id: country_id,
            });
        }
        self.repo.owners_of_country(country_id)
    }

    /// Gets the country an owner belongs to.
    pub fn country_of_owner(&self, owner_id: EntityId) -> RepoResult<Country> {
        self.repo
            .country_of_owner(owner_id)?
            .ok_or(RepoError::NotFound {
                entity: "owner",
                id: owner_id,
            })
    }
}
