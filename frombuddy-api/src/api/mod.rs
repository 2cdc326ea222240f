//! HTTP API handlers for frombuddy-api

pub mod explain;
pub mod health;
pub mod root;
pub mod services;

pub use explain::{explain, explain_routes};
pub use health::{health_check, health_routes};
pub use root::{legal_disclaimer, root, root_routes};
pub use services::{get_service, list_services, service_routes};
