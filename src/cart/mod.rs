//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (Product, CartEntry, snapshots, payloads)
//! - The cart store and its derived views
//! - Application state shared with handlers
//! - REST API handlers for the cart view

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod state;
pub mod store;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use state::{AppState, SharedState};
pub use store::CartStore;
