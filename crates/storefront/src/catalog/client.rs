//! Catalog API client implementation.
//!
//! Uses `reqwest` for HTTP and caches decoded payloads using `moka`.

use std::sync::Arc;

use moka::future::Cache;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, instrument};
use verdant_core::normalize::{self, keys};
use verdant_core::{CatalogEntity, CategoryId, PlantId};

use super::{CacheKey, CatalogError};
use crate::config::CatalogConfig;

/// Upper bound on cached payloads; there are only a handful of endpoints
/// plus one entry per category and viewed plant.
const CACHE_CAPACITY: u64 = 256;

/// Characters of an error body kept for logs and errors.
const ERROR_BODY_LIMIT: usize = 200;

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the remote plant catalog.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Option<Cache<CacheKey, Arc<Value>>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = config.cache_ttl.map(|ttl| {
            Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(ttl)
                .build()
        });

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    /// Base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Fetch a payload, serving it from cache when possible.
    #[instrument(skip(self), fields(endpoint = %key))]
    async fn fetch(&self, key: CacheKey) -> Result<Arc<Value>, CatalogError> {
        if let Some(cache) = &self.inner.cache
            && let Some(payload) = cache.get(&key).await
        {
            debug!("Cache hit for catalog payload");
            return Ok(payload);
        }

        let url = format!("{}/{}", self.inner.base_url, key.path());
        let response = self
            .inner
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();

        // Read as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            let body = response_text.chars().take(ERROR_BODY_LIMIT).collect::<String>();
            tracing::error!(
                status = %status,
                body = %body,
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status { status, body });
        }

        let payload: Value = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(ERROR_BODY_LIMIT).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })?;

        let payload = Arc::new(payload);
        if let Some(cache) = &self.inner.cache {
            cache.insert(key, Arc::clone(&payload)).await;
        }

        Ok(payload)
    }

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON. A body
    /// without a recognizable list is not an error; it yields no categories.
    pub async fn categories(&self) -> Result<Vec<CatalogEntity>, CatalogError> {
        let payload = self.fetch(CacheKey::Categories).await?;
        Ok(normalize_entities(&payload, keys::CATEGORY_LIST))
    }

    /// List all plants.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn plants(&self) -> Result<Vec<CatalogEntity>, CatalogError> {
        let payload = self.fetch(CacheKey::Plants).await?;
        Ok(normalize_entities(&payload, keys::PLANT_LIST))
    }

    /// List the plants in one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn plants_in_category(
        &self,
        category: &CategoryId,
    ) -> Result<Vec<CatalogEntity>, CatalogError> {
        let payload = self.fetch(CacheKey::Category(category.clone())).await?;
        Ok(normalize_entities(&payload, keys::PLANT_LIST))
    }

    /// Fetch one plant by ID.
    ///
    /// Returns `Ok(None)` when the API answers 404 or the body holds no record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn plant(&self, id: &PlantId) -> Result<Option<CatalogEntity>, CatalogError> {
        let payload = match self.fetch(CacheKey::Plant(id.clone())).await {
            Ok(payload) => payload,
            Err(CatalogError::Status { status, .. }) if status == reqwest::StatusCode::NOT_FOUND => {
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let entity =
            normalize::extract_record(&payload, keys::PLANT_RECORD).map(CatalogEntity::from_value);
        if let Some(entity) = &entity {
            warn_if_malformed(entity);
        }
        Ok(entity)
    }
}

/// Normalize a list payload, logging records whose price could not be read.
fn normalize_entities(payload: &Value, candidates: &[&str]) -> Vec<CatalogEntity> {
    let entities = normalize::normalize_list(payload, candidates);
    for entity in &entities {
        warn_if_malformed(entity);
    }
    entities
}

fn warn_if_malformed(entity: &CatalogEntity) {
    if entity.price_malformed {
        tracing::warn!(
            id = %entity.id,
            name = %entity.name,
            "Catalog record has an unreadable price, showing 0"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
    use serde_json::json;

    use super::*;

    /// Serve `router` on an ephemeral port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/api")
    }

    fn fake_catalog(hits: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/api/categories",
                get(move || {
                    let hits = Arc::clone(&hits);
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        Json(json!({
                            "status": true,
                            "categories": [
                                { "id": 1, "category_name": "Fruit Tree" },
                                { "id": 2, "category_name": "Flowering Plant" }
                            ]
                        }))
                    }
                }),
            )
            .route(
                "/api/plants",
                get(|| async {
                    Json(json!({
                        "plants": [
                            { "id": 1, "name": "Mango", "price": 500 },
                            { "id": 2, "name": "Rose", "price": "oops" }
                        ]
                    }))
                }),
            )
            .route(
                "/api/category/{id}",
                get(|Path(id): Path<String>| async move {
                    if id == "2" {
                        Json(json!({ "data": [{ "id": 2, "name": "Rose", "price": 50 }] }))
                    } else {
                        Json(json!({ "status": false, "message": "no plants" }))
                    }
                }),
            )
            .route(
                "/api/plant/{id}",
                get(|Path(id): Path<String>| async move {
                    if id == "7" {
                        (StatusCode::OK, Json(json!({ "plants": { "id": 7, "name": "Fern", "price": "30" } })))
                    } else {
                        (StatusCode::NOT_FOUND, Json(json!({ "message": "missing" })))
                    }
                }),
            )
    }

    #[tokio::test]
    async fn test_categories_are_normalized_and_cached() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = serve(fake_catalog(Arc::clone(&hits))).await;
        let client = CatalogClient::new(&CatalogConfig::new(&base, 60));

        let first = client.categories().await.unwrap();
        let second = client.categories().await.unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(first[0].name, "Fruit Tree");
        assert_eq!(first[1].id, "2");
        assert_eq!(first, second);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_cache() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = serve(fake_catalog(Arc::clone(&hits))).await;
        let client = CatalogClient::new(&CatalogConfig::new(&base, 0));

        client.categories().await.unwrap();
        client.categories().await.unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_malformed_price_reads_as_zero() {
        let base = serve(fake_catalog(Arc::new(AtomicUsize::new(0)))).await;
        let client = CatalogClient::new(&CatalogConfig::new(&base, 0));

        let plants = client.plants().await.unwrap();
        assert_eq!(plants[0].price, 500.0);
        assert_eq!(plants[1].price, 0.0);
        assert!(plants[1].price_malformed);
    }

    #[tokio::test]
    async fn test_category_without_list_is_empty() {
        let base = serve(fake_catalog(Arc::new(AtomicUsize::new(0)))).await;
        let client = CatalogClient::new(&CatalogConfig::new(&base, 0));

        let roses = client.plants_in_category(&CategoryId::new("2")).await.unwrap();
        assert_eq!(roses.len(), 1);

        let none = client.plants_in_category(&CategoryId::new("9")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_plant_detail() {
        let base = serve(fake_catalog(Arc::new(AtomicUsize::new(0)))).await;
        let client = CatalogClient::new(&CatalogConfig::new(&base, 0));

        let fern = client.plant(&PlantId::new("7")).await.unwrap().unwrap();
        assert_eq!(fern.name, "Fern");
        assert_eq!(fern.price, 30.0);

        assert!(client.plant(&PlantId::new("8")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_endpoint_is_status_error() {
        let base = serve(Router::new()).await;
        let client = CatalogClient::new(&CatalogConfig::new(&base, 0));

        let err = client.plants().await.unwrap_err();
        assert!(matches!(err, CatalogError::Status { status, .. } if status == reqwest::StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_non_json_body_is_parse_error() {
        let router = Router::new().route("/api/plants", get(|| async { "<html>down</html>" }));
        let base = serve(router).await;
        let client = CatalogClient::new(&CatalogConfig::new(&base, 0));

        let err = client.plants().await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        // Bind then drop to get a port with nothing listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = CatalogClient::new(&CatalogConfig::new(&format!("http://{addr}/api"), 0));
        let err = client.categories().await.unwrap_err();
        assert!(matches!(err, CatalogError::Http(_)));
    }
}
