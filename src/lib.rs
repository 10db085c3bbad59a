//! masxflix - movie search and details pages backed by TMDb
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod server;
pub mod tmdb;
pub mod views;
