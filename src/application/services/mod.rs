//! Business logic services for the application layer.

pub mod basket_service;

pub use basket_service::BasketService;
