//! # Basket API
//!
//! Shopping basket service for an e-commerce API, built with Axum and Redis.
//!
//! Baskets are transient, session-scoped aggregates: they are written whole on
//! every update, read back by their externally supplied id, and expire through
//! the key-value store's native TTL when nobody writes to them for a while.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Basket entity and repository trait
//! - **Application Layer** ([`application`]) - Validation, defaulting and error translation
//! - **Infrastructure Layer** ([`infrastructure`]) - Codec, store clients, repository implementation
//! - **API Layer** ([`api`]) - REST handlers, transfer contract and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! # Point the service at Redis (optional; an in-memory store is used otherwise)
//! export REDIS_URL="redis://localhost:6379"
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::api::dto::basket::{BasketDto, BasketItemDto};
    pub use crate::application::services::BasketService;
    pub use crate::domain::entities::{BasketItem, CustomerBasket};
    pub use crate::domain::repositories::{BasketRepository, RepositoryError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{BasketStore, InMemoryBasketStore, RedisBasketStore};
    pub use crate::state::AppState;
}
