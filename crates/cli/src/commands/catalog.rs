//! Catalog listing commands.
//!
//! # Usage
//!
//! ```bash
//! # List categories
//! verdant categories
//!
//! # List every plant, or the plants in one category
//! verdant plants
//! verdant plants --category 1
//!
//! # Show one plant
//! verdant plant 3
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_API_URL` - Catalog API base URL (overridden by `--api-url`)
//! - `CATALOG_CACHE_TTL_SECS` - Response cache TTL (irrelevant for one-shot commands)

use thiserror::Error;
use verdant_core::{CatalogEntity, CategoryId, IdError, PlantId};
use verdant_storefront::catalog::{CatalogClient, CatalogError};
use verdant_storefront::config::{CatalogConfig, ConfigError};

/// Errors that can occur while running a catalog command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Catalog configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The catalog API request failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A category or plant ID could not be used in a request path.
    #[error("Invalid id: {0}")]
    InvalidId(#[from] IdError),

    /// The catalog has no plant with this ID.
    #[error("Plant not found: {0}")]
    PlantNotFound(String),
}

/// Build a catalog client from the environment, optionally pointing it at
/// another API.
///
/// # Errors
///
/// Returns an error if the configured or overriding URL is invalid.
pub fn client(api_url: Option<&str>) -> Result<CatalogClient, CommandError> {
    let mut config = CatalogConfig::from_env()?;
    if let Some(url) = api_url {
        config = config.with_base_url(url)?;
    }

    let client = CatalogClient::new(&config);
    tracing::debug!(api = %client.base_url(), "Using catalog API");
    Ok(client)
}

/// One listing line: `name (price)`.
fn describe(entity: &CatalogEntity) -> String {
    format!("{} ({})", entity.name, entity.price())
}

/// List all categories. Returns how many were listed.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
pub async fn categories(client: &CatalogClient) -> Result<usize, CommandError> {
    let categories = client.categories().await?;

    if categories.is_empty() {
        tracing::info!("No categories found");
    }
    for category in &categories {
        tracing::info!(id = %category.id, "{}", category.name);
    }

    Ok(categories.len())
}

/// List plants, optionally restricted to one category. Returns how many
/// were listed.
///
/// # Errors
///
/// Returns an error if the category ID is invalid or the request fails.
pub async fn plants(client: &CatalogClient, category: Option<&str>) -> Result<usize, CommandError> {
    let plants = match category {
        Some(raw) => {
            let id: CategoryId = raw.parse()?;
            client.plants_in_category(&id).await?
        }
        None => client.plants().await?,
    };

    if plants.is_empty() {
        tracing::info!("No plants found");
    }
    for plant in &plants {
        tracing::info!(id = %plant.id, "{}", describe(plant));
    }

    Ok(plants.len())
}

/// Show one plant's details.
///
/// # Errors
///
/// Returns an error if the ID is invalid, the request fails, or the catalog
/// has no such plant.
pub async fn plant(client: &CatalogClient, id: &str) -> Result<(), CommandError> {
    let id: PlantId = id.parse()?;
    let plant = client
        .plant(&id)
        .await?
        .ok_or_else(|| CommandError::PlantNotFound(id.to_string()))?;

    tracing::info!(id = %plant.id, "{}", describe(&plant));
    tracing::info!("{}", plant.description);
    if plant.has_image() {
        tracing::info!(image = %plant.image, "Image");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let plant = CatalogEntity::from_value(&serde_json::json!({
            "id": 7,
            "plant_name": "Money Plant",
            "price": "45"
        }));
        assert_eq!(describe(&plant), "Money Plant (৳45)");
    }

    #[test]
    fn test_client_rejects_bad_api_url() {
        let err = client(Some("not a url")).err();
        assert!(matches!(err, Some(CommandError::Config(_))));
    }

    #[test]
    fn test_client_uses_api_url_override() {
        let client = client(Some("http://127.0.0.1:9000/api/")).ok();
        assert_eq!(
            client.as_ref().map(CatalogClient::base_url),
            Some("http://127.0.0.1:9000/api")
        );
    }

    #[tokio::test]
    async fn test_plant_rejects_bad_id() {
        let client = CatalogClient::new(&CatalogConfig::default());
        let err = plant(&client, "../etc").await.err();
        assert!(matches!(err, Some(CommandError::InvalidId(_))));
    }
}
