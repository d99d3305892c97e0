//! Tifo Core - Shared types library.
//!
//! This crate provides common types used across all Tifo components:
//! - `storefront` - Headless Mini App storefront engine
//! - `cli` - Terminal storefront client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
