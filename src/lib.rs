//! Cart Store Library
//!
//! This library provides a shopping-cart state container with derived totals,
//! served to front-ends over a small HTTP API.

// Domain modules
pub mod cart;
pub mod catalog;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
