//! Response normalizer for the catalog API.
//!
//! The upstream API is inconsistent about field names across endpoints and
//! versions. Instead of branching per endpoint, each logical field has an
//! ordered list of candidate keys and the first one present wins.
//!
//! Every function here is total: missing or oddly-typed data degrades to a
//! default value, never to an error.
//!
//! ```rust
//! use serde_json::json;
//! use verdant_core::normalize::{extract_list, get_price, keys};
//!
//! let payload = json!({ "status": true, "plants": [{ "name": "Rose", "price": "50" }] });
//! let plants = extract_list(&payload, keys::PLANT_LIST);
//! assert_eq!(plants.len(), 1);
//! assert!((get_price(&plants[0]) - 50.0).abs() < f64::EPSILON);
//! ```

use serde_json::Value;

use crate::entity::CatalogEntity;

/// Candidate key lists, in priority order.
pub mod keys {
    /// Top-level keys that may hold the category array.
    pub const CATEGORY_LIST: &[&str] = &["data", "categories", "results"];
    /// Top-level keys that may hold a plant array (all plants or one category).
    pub const PLANT_LIST: &[&str] = &["data", "plants"];
    /// Top-level keys that may hold a single plant record.
    pub const PLANT_RECORD: &[&str] = &["data", "plants", "plant"];

    pub const ID: &[&str] = &["id", "plantId", "_id", "plant_id", "category_id", "cat_id"];
    pub const NAME: &[&str] = &["name", "title", "plant_name", "category", "category_name"];
    pub const IMAGE: &[&str] = &["image", "img", "thumbnail", "picture", "photo", "image_url"];
    pub const PRICE: &[&str] = &["price", "cost", "amount", "price_bd"];
    pub const DESCRIPTION: &[&str] = &["description", "desc", "about"];
}

/// Name used when no name candidate is present.
pub const DEFAULT_NAME: &str = "Unknown";

/// Description used when no description candidate is present.
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// Returns the elements of the first candidate field whose value is an array.
///
/// A payload that is not an object, or has no array-valued candidate, yields
/// an empty slice. Callers render that as an empty state, not a failure.
#[must_use]
pub fn extract_list<'a>(payload: &'a Value, candidates: &[&str]) -> &'a [Value] {
    candidates
        .iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Extracts and normalizes every entity of a list payload.
#[must_use]
pub fn normalize_list(payload: &Value, candidates: &[&str]) -> Vec<CatalogEntity> {
    extract_list(payload, candidates)
        .iter()
        .map(CatalogEntity::from_value)
        .collect()
}

/// Returns the first candidate field holding a single record.
///
/// An object-valued candidate is taken as-is; an array-valued candidate
/// contributes its first element. Candidates are still probed in order.
#[must_use]
pub fn extract_record<'a>(payload: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|key| payload.get(*key))
        .find_map(|value| match value {
            Value::Object(_) => Some(value),
            Value::Array(items) => items.first(),
            _ => None,
        })
}

/// Returns the first candidate key present on `entity` with a non-null value.
#[must_use]
pub fn first_present<'a>(entity: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    let object = entity.as_object()?;
    candidates
        .iter()
        .find_map(|key| object.get(*key).filter(|value| !value.is_null()))
}

/// Returns the first present candidate value, or `default`.
///
/// Later candidates are ignored once an earlier one matches, even if they
/// are also present.
#[must_use]
pub fn get_field<'a>(entity: &'a Value, candidates: &[&str], default: &'a Value) -> &'a Value {
    first_present(entity, candidates).unwrap_or(default)
}

/// Like [`get_field`], rendering the value as display text.
#[must_use]
pub fn get_text(entity: &Value, candidates: &[&str], default: &str) -> String {
    first_present(entity, candidates).map_or_else(|| default.to_string(), value_to_text)
}

/// Display text for a JSON value.
///
/// Strings are taken verbatim, numbers and booleans use their display form,
/// and anything else is rendered as compact JSON.
#[must_use]
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Outcome of reading a price field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceResolution {
    /// Coerced amount, `0.0` when missing or malformed.
    pub value: f64,
    /// A price field was present but could not be read as a finite number.
    pub malformed: bool,
}

/// Reads the price candidates and coerces the result to a number.
#[must_use]
pub fn resolve_price(entity: &Value) -> PriceResolution {
    match first_present(entity, keys::PRICE) {
        None => PriceResolution {
            value: 0.0,
            malformed: false,
        },
        Some(raw) => coerce_number(raw).map_or(
            PriceResolution {
                value: 0.0,
                malformed: true,
            },
            |value| PriceResolution {
                value,
                malformed: false,
            },
        ),
    }
}

/// Price of an entity; missing or non-numeric prices read as `0`.
#[must_use]
pub fn get_price(entity: &Value) -> f64 {
    resolve_price(entity).value
}

/// Coerces a JSON value to a finite number.
///
/// Returns `None` for values that have no numeric reading (non-numeric
/// strings, arrays, objects) or that would be NaN or infinite.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        Value::Array(_) | Value::Object(_) => None,
    }?;

    // Collapse negative zero so it renders as "0".
    number
        .is_finite()
        .then_some(if number == 0.0 { 0.0 } else { number })
}

/// Parses numeric text the way a browser coerces form values.
///
/// Surrounding whitespace is ignored, blank text is zero, and `0x`/`0o`/`0b`
/// prefixes are read as unsigned integers in that radix.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        #[allow(clippy::cast_precision_loss)] // Prices never approach 2^53
        return u64::from_str_radix(trimmed.get(2..)?, radix)
            .ok()
            .map(|n| n as f64);
    }

    // `f64::from_str` also accepts "inf"/"nan" spellings; those are rejected
    // by the finiteness check in `coerce_number`.
    trimmed.parse::<f64>().ok()
}
