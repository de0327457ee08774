//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Reconcile out-of-band target ids with payload ids before any write
//!   reaches a repository (`IdMismatch`).
//! - Keep transport layers decoupled from storage details.

pub mod category_service;
pub mod owner_service;
pub mod pokemon_service;
pub mod review_service;
