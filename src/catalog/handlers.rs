//! Catalog view handlers

use crate::cart::{models::Product, state::SharedState};
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

/// Creates routes for the catalog view
pub fn routes() -> Router<SharedState> {
    Router::new().route("/", get(list_products))
}

#[derive(Serialize)]
struct CatalogView {
    products: Vec<Product>,
}

/// Endpoint: GET /
/// Lists every product in the catalog.
async fn list_products(State(state): State<SharedState>) -> Json<CatalogView> {
    Json(CatalogView {
        products: state.catalog.products().to_vec(),
    })
}
