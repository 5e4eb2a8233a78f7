//! Integration tests for Verdant.
//!
//! Each test starts a fake catalog API and a storefront on ephemeral ports
//! in-process, then drives the storefront over real HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p verdant-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_catalog` - Catalog pages and their failure states
//! - `storefront_cart` - Session cart add/remove/total

use std::collections::HashMap;

use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
use reqwest::Client;
use serde_json::json;
use verdant_storefront::config::StorefrontConfig;
use verdant_storefront::state::AppState;

/// A running storefront and a client with its own cookie jar.
pub struct TestContext {
    pub client: Client,
    pub storefront_url: String,
}

impl TestContext {
    /// Start a storefront backed by `catalog`.
    ///
    /// # Panics
    ///
    /// Panics if a listener cannot be bound or the configuration is invalid.
    pub async fn new(catalog: Router) -> Self {
        let catalog_url = format!("{}/api", serve(catalog).await);

        let vars = HashMap::from([
            ("CATALOG_API_URL", catalog_url),
            ("CATALOG_CACHE_TTL_SECS", "0".to_string()),
        ]);
        let config = StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
            .expect("Failed to build test configuration");

        let storefront_url = serve(verdant_storefront::app(AppState::new(config))).await;

        Self {
            client: new_client(),
            storefront_url,
        }
    }

    /// Absolute URL for a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.storefront_url)
    }

    /// GET a page and return its status and body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn get(&self, path: &str) -> (reqwest::StatusCode, String) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET");
        let status = resp.status();
        (status, resp.text().await.expect("Failed to read response"))
    }

    /// POST a form, follow the redirect, and return the final status and body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> (reqwest::StatusCode, String) {
        let resp = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("Failed to send POST");
        let status = resp.status();
        (status, resp.text().await.expect("Failed to read response"))
    }
}

/// A client with a cookie store, so each one is a separate visitor session.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Serve `router` on an ephemeral port and return its origin.
///
/// # Panics
///
/// Panics if the listener cannot be bound.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}

/// A catalog API whose payloads use a different list key and name field per
/// endpoint, like the public one.
#[must_use]
pub fn fake_catalog() -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(|| async {
                Json(json!({
                    "status": true,
                    "categories": [
                        { "id": 1, "category_name": "Fruit Tree" },
                        { "id": 2, "category_name": "Flowering Plant" }
                    ]
                }))
            }),
        )
        .route(
            "/api/plants",
            get(|| async {
                Json(json!({
                    "status": true,
                    "plants": [
                        {
                            "id": 1,
                            "name": "Mango Tree",
                            "image": "https://img.example.org/mango.png",
                            "price": 500,
                            "description": "Sweet fruit"
                        },
                        { "id": 2, "plant_name": "Rose", "cost": "50" },
                        { "id": 3, "title": "Tulip", "price": "70" }
                    ]
                }))
            }),
        )
        .route(
            "/api/category/{id}",
            get(|Path(id): Path<String>| async move {
                if id == "2" {
                    Json(json!({ "data": [
                        { "id": 2, "plant_name": "Rose", "cost": "50" },
                        { "id": 3, "title": "Tulip", "price": "70" }
                    ] }))
                } else {
                    Json(json!({ "status": false, "data": [] }))
                }
            }),
        )
        .route(
            "/api/plant/{id}",
            get(|Path(id): Path<String>| async move {
                if id == "1" {
                    (
                        StatusCode::OK,
                        Json(json!({ "data": {
                            "id": 1,
                            "name": "Mango Tree",
                            "price": 500,
                            "description": "Sweet fruit"
                        } })),
                    )
                } else {
                    (StatusCode::NOT_FOUND, Json(json!({ "status": false })))
                }
            }),
        )
}

/// A catalog API that fails every request.
#[must_use]
pub fn failing_catalog() -> Router {
    Router::new().fallback(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") })
}

/// A catalog API with categories but a broken plant listing.
#[must_use]
pub fn half_broken_catalog() -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(|| async { Json(json!({ "categories": [{ "id": 1, "category_name": "Cactus" }] })) }),
        )
        .route("/api/plants", get(|| async { "<html>not json</html>" }))
}
