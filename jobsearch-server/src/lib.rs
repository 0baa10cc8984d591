pub mod config;
pub mod deletion;
pub mod page;
pub mod query;
pub mod registry;
pub mod routes;
pub mod views;
