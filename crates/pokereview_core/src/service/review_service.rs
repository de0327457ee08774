//! Review and reviewer use-case services.
//!
//! # Responsibility
//! - Provide stable entry points for review/reviewer CRUD and the
//!   review-side traversals.
//! - Enforce the target-id/payload-id guard before updates.

use crate::model::review::{NewReview, NewReviewer, Review, Reviewer};
use crate::model::EntityId;
use crate::repo::review_repo::ReviewRepository;
use crate::repo::reviewer_repo::ReviewerRepository;
use crate::repo::{RepoError, RepoResult};

/// Use-case service wrapper for review operations.
pub struct ReviewService<R: ReviewRepository> {
    repo: R,
}

impl<R: ReviewRepository> ReviewService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a review. Both referenced ids must exist.
    pub fn create_review(&mut self, review: &NewReview) -> RepoResult<EntityId> {
        self.repo.create_review(review)
    }

    /// Updates the review identified by `target_id`.
    ///
    /// Rejects with `IdMismatch` when `review.id != target_id`.
    pub fn update_review(&mut self, target_id: EntityId, review: &Review) -> RepoResult<()> {
        if review.id != target_id {
            return Err(RepoError::IdMismatch {
                expected: target_id,
                actual: review.id,
            });
        }
        self.repo.update_review(review)
    }

    /// Deletes one review by id.
    pub fn delete_review(&mut self, id: EntityId) -> RepoResult<()> {
        self.repo.delete_review(id)
    }

    /// Gets one review by id, reporting `NotFound` for absent rows.
    pub fn get_review(&self, id: EntityId) -> RepoResult<Review> {
        self.repo.get_review(id)?.ok_or(RepoError::NotFound {
            entity: "review",
            id,
        })
    }

    /// Lists all reviews in ascending id order.
    pub fn list_reviews(&self) -> RepoResult<Vec<Review>> {
        self.repo.list_reviews()
    }

    /// Lists reviews of one pokemon, ascending review id.
    pub fn reviews_of_pokemon(&self, pokemon_id: EntityId) -> RepoResult<Vec<Review>> {
        self.repo.reviews_of_pokemon(pokemon_id)
    }
}

/// Use-case service wrapper for reviewer operations.
pub struct ReviewerService<R: ReviewerRepository> {
    repo: R,
}

impl<R: ReviewerRepository> ReviewerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a reviewer.
    pub fn create_reviewer(&mut self, reviewer: &NewReviewer) -> RepoResult<EntityId> {
        self.repo.create_reviewer(reviewer)
    }

    /// Updates the reviewer identified by `target_id`.
    ///
    /// Rejects with `IdMismatch` when `reviewer.id != target_id`.
    pub fn update_reviewer(&mut self, target_id: EntityId, reviewer: &Reviewer) -> RepoResult<()> {
        if reviewer.id != target_id {
            return Err(RepoError::IdMismatch {
                expected: target_id,
                actual: reviewer.id,
            });
        }
        self.repo.update_reviewer(reviewer)
    }

    /// Deletes one reviewer and all reviews they wrote.
    pub fn delete_reviewer(&mut self, id: EntityId) -> RepoResult<()> {
        self.repo.delete_reviewer(id)
    }

    /// Gets one reviewer by id, reporting `NotFound` for absent rows.
    pub fn get_reviewer(&self, id: EntityId) -> RepoResult<Reviewer> {
        self.repo.get_reviewer(id)?.ok_or(RepoError::NotFound {
            entity: "reviewer",
            id,
        })
    }

    /// Lists all reviewers in ascending id order.
    pub fn list_reviewers(&self) -> RepoResult<Vec<Reviewer>> {
        self.repo.list_reviewers()
    }

    /// Lists reviews written by this reviewer.
    ///
    /// Reports `NotFound` when the reviewer id does not exist.
    pub fn reviews_by_reviewer(&self, reviewer_id: EntityId) -> RepoResult<Vec<Review>> {
        if !self.repo.reviewer_exists(reviewer_id)? {
            return Err(RepoError::NotFound {
                entity: "reviewer",
                id: reviewer_id,
            });
        }
        self.repo.reviews_by_reviewer(reviewer_id)
    }
}
