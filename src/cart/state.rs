//! Shopping Cart State Management
//!
//! This module holds the process-wide application state: the single cart
//! store and the product catalog it is filled from.

use super::store::CartStore;
use crate::catalog::Catalog;
use std::sync::Arc;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state, created once at startup
pub struct AppState {
    /// The one cart of this process
    pub cart: CartStore,

    /// Products available for adding by id
    pub catalog: Catalog,
}

impl AppState {
    /// Creates a new AppState with an empty cart over `catalog`
    pub fn new(catalog: Catalog) -> Self {
        if catalog.is_empty() {
            tracing::warn!("catalog is empty, products can only be added by value");
        }
        tracing::info!(products = catalog.len(), "application state initialized");

        Self {
            cart: CartStore::new(),
            catalog,
        }
    }

    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }
}
