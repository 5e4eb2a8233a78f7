//! Normalized catalog records.

use serde::Serialize;
use serde_json::Value;

use crate::normalize::{self, DEFAULT_DESCRIPTION, DEFAULT_NAME, keys};
use crate::types::Price;

/// A category or plant as read from the catalog API.
///
/// Built fresh from every response and never mutated. Each field is resolved
/// through the normalizer's candidate lists, so a record with none of the
/// expected keys still yields a fully-populated value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntity {
    /// Identifier as text; empty when the record carries none.
    pub id: String,
    pub name: String,
    /// Image URL; empty when absent.
    pub image: String,
    pub price: f64,
    pub description: String,
    /// A price field was present but unreadable.
    #[serde(skip)]
    pub price_malformed: bool,
}

impl CatalogEntity {
    /// Normalize a raw JSON record.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let price = normalize::resolve_price(value);
        Self {
            id: normalize::get_text(value, keys::ID, ""),
            name: normalize::get_text(value, keys::NAME, DEFAULT_NAME),
            image: normalize::get_text(value, keys::IMAGE, ""),
            price: price.value,
            description: normalize::get_text(value, keys::DESCRIPTION, DEFAULT_DESCRIPTION),
            price_malformed: price.malformed,
        }
    }

    /// Price in the catalog currency.
    #[must_use]
    pub fn price(&self) -> Price {
        Price::from_amount(self.price)
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}
