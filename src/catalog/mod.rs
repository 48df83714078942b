//! Product Catalog Module
//!
//! The catalog is the read-only product listing shown by the catalog view.
//! Products are supplied by the operator as a JSON array; the service never
//! generates or edits them.

pub mod handlers;

pub use handlers::routes;

use crate::cart::models::Product;
use std::{collections::HashSet, path::Path};
use thiserror::Error;

/// Errors raised while loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Duplicate product id in catalog: {0}")]
    DuplicateId(String),
}

/// An ordered, id-unique list of products
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting duplicate ids.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Reads a JSON array of products from `path`.
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let path_display = path.display().to_string();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path_display.clone(),
                source,
            })?;
        let products: Vec<Product> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path_display.clone(),
                source,
            })?;

        let catalog = Self::from_products(products)?;
        tracing::info!(path = %path_display, products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
