pub mod auth;
pub mod budget;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod ledger;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod transactions;
pub mod validation;
