//! Vitrine Kernel Library
//!
//! Product listing engine, its PostgreSQL store, and the HTTP surface.
//! The main entry point for running the server is the `vitrine` binary.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod listing;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
