//! Newtype IDs for type-safe catalog references.
//!
//! The catalog API hands out identifiers as either strings or numbers, so
//! every ID here wraps the textual form. Use the `define_id!` macro to create
//! wrappers that prevent mixing category and plant IDs.

use thiserror::Error;

/// Error parsing an identifier from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// The identifier was empty or whitespace only.
    #[error("identifier must not be empty")]
    Empty,
    /// The identifier contains a character that cannot appear in a URL path segment.
    #[error("identifier contains invalid character {0:?}")]
    InvalidChar(char),
}

/// Macro to define a type-safe catalog ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `new()`, `as_str()`, `Display`, and a validating `FromStr`
///
/// # Example
///
/// ```rust
/// # use verdant_core::define_id;
/// define_id!(ShelfId);
/// define_id!(PotId);
///
/// let shelf: ShelfId = "7".parse().unwrap();
/// assert_eq!(shelf.as_str(), "7");
///
/// // These are different types, so this won't compile:
/// // let _: PotId = shelf;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID without validation.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying identifier text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err($crate::types::IdError::Empty);
                }
                if let Some(c) = trimmed
                    .chars()
                    .find(|c| matches!(c, '/' | '?' | '#') || c.is_control())
                {
                    return Err($crate::types::IdError::InvalidChar(c));
                }
                if trimmed.chars().all(|c| c == '.') && trimmed.len() <= 2 {
                    return Err($crate::types::IdError::InvalidChar('.'));
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(CategoryId);
define_id!(PlantId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let id: CategoryId = "  3 ".parse().unwrap();
        assert_eq!(id.as_str(), "3");
        assert_eq!(id.to_string(), "3");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!("".parse::<PlantId>(), Err(IdError::Empty));
        assert_eq!("   ".parse::<PlantId>(), Err(IdError::Empty));
    }

    #[test]
    fn test_parse_rejects_path_separators() {
        assert_eq!(
            "1/../admin".parse::<PlantId>(),
            Err(IdError::InvalidChar('/'))
        );
        assert_eq!("1?x=2".parse::<PlantId>(), Err(IdError::InvalidChar('?')));
        assert_eq!("..".parse::<PlantId>(), Err(IdError::InvalidChar('.')));
        assert!("1.5".parse::<PlantId>().is_ok());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = PlantId::new("42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
        let back: PlantId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(back, id);
    }
}
