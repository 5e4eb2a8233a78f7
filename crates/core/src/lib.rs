//! Verdant Core - Shared types library.
//!
//! This crate provides the types shared by all Verdant components:
//! - `storefront` - Server-rendered plant shop
//! - `cli` - Command-line catalog browser
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`normalize`] - Candidate-key resolution over loosely-shaped catalog JSON
//! - [`entity`] - [`CatalogEntity`], the normalized category/plant record
//! - [`cart`] - Session cart with positional removal and a recomputed total
//! - [`types`] - Newtype wrappers for catalog IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod entity;
pub mod normalize;
pub mod types;

pub use cart::{Cart, CartLine};
pub use entity::CatalogEntity;
pub use types::*;
