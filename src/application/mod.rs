//! Application layer services implementing business logic.
//!
//! This layer validates and normalizes incoming baskets, maps between the
//! transfer contract and the entity, and translates repository outcomes into
//! client-facing errors. Services consume repository traits and provide a
//! clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::basket_service::BasketService`] - Basket get, update and delete

pub mod services;
