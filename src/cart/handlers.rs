//! REST API handlers for the cart view
//!
//! Every mutating endpoint answers with the snapshot its own change
//! installed, so the view never needs a second round trip.

use super::{
    models::{CartSnapshot, CartView, Product, QuantityInput},
    state::SharedState,
};
use crate::error::AppError;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use futures_util::stream::{self, Stream, StreamExt};

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(view_cart).delete(clear_cart))
        .route("/cart/items", post(add_item))
        .route(
            "/cart/items/:id",
            post(add_catalog_item)
                .put(update_quantity)
                .delete(remove_item),
        )
        .route("/cart/events", get(cart_events))
}

fn render(snapshot: &CartSnapshot) -> Json<CartView> {
    Json(CartView::from(snapshot))
}

/// Endpoint: GET /cart
async fn view_cart(State(state): State<SharedState>) -> Json<CartView> {
    render(&state.cart.snapshot())
}

/// Endpoint: DELETE /cart
async fn clear_cart(State(state): State<SharedState>) -> Json<CartView> {
    render(&state.cart.clear_cart())
}

/// Endpoint: POST /cart/items
/// Adds one unit of the product in the body.
async fn add_item(
    State(state): State<SharedState>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<Json<CartView>, AppError> {
    let Json(product) = payload?;
    Ok(render(&state.cart.add_item(product)))
}

/// Endpoint: POST /cart/items/{id}
/// Adds one unit of a catalog product.
async fn add_catalog_item(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CartView>, AppError> {
    let product = state
        .catalog
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(render(&state.cart.add_item(product)))
}

/// Endpoint: PUT /cart/items/{id}
async fn update_quantity(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<QuantityInput>, JsonRejection>,
) -> Result<Json<CartView>, AppError> {
    let Json(input) = payload?;
    Ok(render(&state.cart.update_quantity(&id, input.quantity)))
}

/// Endpoint: DELETE /cart/items/{id}
async fn remove_item(State(state): State<SharedState>, Path(id): Path<String>) -> Json<CartView> {
    render(&state.cart.remove_item(&id))
}

/// Endpoint: GET /cart/events
/// Streams the cart view: once on connect, then after every change.
async fn cart_events(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let rx = state.cart.subscribe();
    let initial = state.cart.snapshot();

    let updates = stream::unfold(rx, |mut rx| async move {
        rx.changed().await.ok()?;
        let event = cart_event(&rx.borrow_and_update());
        Some((event, rx))
    });

    let events = stream::once(async move { cart_event(&initial) }).chain(updates);

    Sse::new(events).keep_alive(KeepAlive::default())
}

fn cart_event(snapshot: &CartSnapshot) -> Result<Event, axum::Error> {
    Event::default()
        .event("cart")
        .json_data(CartView::from(snapshot))
}
