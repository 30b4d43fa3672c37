//! Portfolio Server Library
//!
//! Users, the stocks they hold, and the HTTP API over them.

pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod portfolio;
pub mod routes;
pub mod state;
pub mod stock;
pub mod store;
pub mod user;
