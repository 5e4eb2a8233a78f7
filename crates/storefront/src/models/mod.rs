//! Domain models for storefront.
//!
//! Catalog and cart types live in `verdant-core`; this module only holds
//! what is specific to serving them over HTTP.

pub mod session;

pub use session::keys as session_keys;
