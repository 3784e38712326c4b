//! Domain layer containing the basket entity and its data access contract.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits define contracts implemented by the
//! infrastructure layer.
//!
//! # Architecture
//!
//! - [`entities`] - Basket aggregate and line items
//! - [`repositories`] - Data access trait definitions
//!
//! # Basket Lifecycle
//!
//! 1. First write creates the basket (upsert, no separate "create")
//! 2. Every update replaces the whole basket and renews its TTL
//! 3. Reads never renew the TTL
//! 4. The basket disappears on explicit delete or when the TTL lapses

pub mod entities;
pub mod repositories;
