//! Core data-access layer for the Pokémon review catalogue.
//! This crate is the single source of truth for persistence invariants:
//! uniqueness-by-name, referential integrity, explicit cascades, and the
//! derived rating aggregate.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::Category;
pub use model::owner::{Country, NewOwner, Owner};
pub use model::pokemon::{NewPokemon, Pokemon};
pub use model::review::{NewReview, NewReviewer, Review, Reviewer};
pub use model::EntityId;
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::country_repo::{CountryRepository, SqliteCountryRepository};
pub use repo::owner_repo::{OwnerRepository, SqliteOwnerRepository};
pub use repo::pokemon_repo::{PokemonRepository, SqlitePokemonRepository};
pub use repo::review_repo::{ReviewRepository, SqliteReviewRepository};
pub use repo::reviewer_repo::{ReviewerRepository, SqliteReviewerRepository};
pub use repo::{normalize_name, RepoError, RepoResult};
pub use service::category_service::CategoryService;
pub use service::owner_service::{CountryService, OwnerService};
pub use service::pokemon_service::PokemonService;
pub use service::review_service::{ReviewService, ReviewerService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
