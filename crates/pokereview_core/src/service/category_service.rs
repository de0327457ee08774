//! Category use-case service.

use crate::model::category::Category;
use crate::model::pokemon::Pokemon;
use crate::model::EntityId;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::{RepoError, RepoResult};

/// Use-case service wrapper for category operations.
pub struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a category from its unique name.
    pub fn create_category(&mut self, name: &str) -> RepoResult<EntityId> {
        self.repo.create_category(name)
    }

    /// Updates the category identified by `target_id`.
    ///
    /// Rejects with `IdMismatch` when `category.id != target_id`.
    pub fn update_category(&mut self, target_id: EntityId, category: &Category) -> RepoResult<()> {
        if category.id != target_id {
            return Err(RepoError::IdMismatch {
                expected: target_id,
                actual: category.id,
            });
        }
        self.repo.update_category(category)
    }

    /// Deletes one category and its association rows.
    pub fn delete_category(&mut self, id: EntityId) -> RepoResult<()> {
        self.repo.delete_category(id)
    }

    /// Gets one category by id, reporting `NotFound` for absent rows.
    pub fn get_category(&self, id: EntityId) -> RepoResult<Category> {
        self.repo.get_category(id)?.ok_or(RepoError::NotFound {
            entity: "category",
            id,
        })
    }

    /// Lists all categories in ascending id order.
    pub fn list_categories(&self) -> RepoResult<Vec<Category>> {
        self.repo.list_categories()
    }

    /// Lists pokemon linked to this category.
    ///
    /// Reports `NotFound` when the category id does not exist.
    pub fn pokemon_by_category(&self, category_id: EntityId) -> RepoResult<Vec<Pokemon>> {
        if !self.repo.category_exists(category_id)? {
            return Err(RepoError::NotFound {
                entity: "category",
                id: category_id,
            });
        }
        self.repo.pokemon_by_category(category_id)
    }

    /// Lists categories linked to this pokemon, ascending category id.
    pub fn categories_of_pokemon(&self, pokemon_id: EntityId) -> RepoResult<Vec<Category>> {
        self.repo.categories_of_pokemon(pokemon_id)
    }
}
