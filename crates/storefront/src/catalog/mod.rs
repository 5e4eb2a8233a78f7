//! Catalog API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP GET with `reqwest`
//! - The remote API is the source of truth - no local sync
//! - In-memory caching via `moka` for raw payloads (TTL from configuration)
//! - Payload shapes vary by endpoint; every response goes through
//!   [`verdant_core::normalize`] rather than a fixed schema
//!
//! # Endpoints
//!
//! ```text
//! GET {base}/categories        all categories
//! GET {base}/plants            all plants
//! GET {base}/category/{id}     plants in one category
//! GET {base}/plant/{id}        one plant
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use verdant_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//! let plants = client.plants().await?;
//! ```

mod cache;
mod client;

pub use cache::CacheKey;
pub use client::CatalogClient;

use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connect, read, or body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Catalog API returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The body was not valid JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = CatalogError::Status {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: "maintenance".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Catalog API returned status 503 Service Unavailable: maintenance"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let err: CatalogError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.to_string().starts_with("JSON parse error:"));
    }
}
