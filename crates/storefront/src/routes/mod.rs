//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - All plants, categories, cart
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /categories/{id}        - Plants in one category (?name= sets the heading)
//! GET  /plants/{id}            - All plants with the detail overlay open
//!
//! # Cart (form posts, 303 back to return_to)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Append a line (name, price)
//! POST /cart/remove            - Remove a line by index
//! ```

pub mod cart;
pub mod catalog;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::home))
        .route("/categories/{id}", get(catalog::category))
        .route("/plants/{id}", get(catalog::plant))
        .nest("/cart", cart_routes())
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
