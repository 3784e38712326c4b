//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for basket storage.
//!
//! # Modules
//!
//! - [`codec`] - Basket byte encoding
//! - [`store`] - Key-value store clients (Redis and in-memory)
//! - [`persistence`] - Repository implementation over a store

pub mod codec;
pub mod persistence;
pub mod store;
