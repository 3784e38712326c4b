//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod basket;
pub mod health;

pub use basket::{
    delete_basket_by_id_handler, delete_basket_handler, get_basket_by_id_handler,
    get_basket_handler, update_basket_handler,
};
pub use health::health_handler;
