//! HTTP API handlers for wiform-ve

pub mod health;
pub mod validate;

pub use health::health_routes;
pub use validate::validate_routes;
