//! Session-related types.
//!
//! The cart is stored in the session as a serialized [`verdant_core::Cart`].

/// Session keys.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";
}
