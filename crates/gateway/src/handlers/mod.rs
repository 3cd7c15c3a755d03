//! HTTP request handlers.

pub mod account_handler;
pub mod health_handler;

pub use account_handler::account_routes;
pub use health_handler::health_routes;
