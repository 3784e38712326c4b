//! Repository trait definitions for the domain layer.
//!
//! The repository abstracts basket storage behind entity-level operations.
//! The implementation lives in `crate::infrastructure::persistence` and combines
//! the codec, the TTL policy and a [`crate::infrastructure::store::BasketStore`].
//!
//! # Available Repositories
//!
//! - [`BasketRepository`] - Basket read, upsert and delete
//!
//! # Testing
//!
//! Mock implementations are auto-generated via `mockall` for unit tests.
//! See integration tests in `tests/repository_basket.rs` for usage examples.

pub mod basket_repository;

pub use basket_repository::{BasketRepository, RepositoryError};

#[cfg(test)]
pub use basket_repository::MockBasketRepository;
