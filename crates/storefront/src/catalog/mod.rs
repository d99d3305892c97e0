//! Catalog browsing: the race-safe product query pipeline and the pure
//! filter/sort engine layered on its results.
//!
//! # Architecture
//!
//! - [`feed::ProductFeed`] turns search/category intent into a single
//!   authoritative product list: debounced fetches, a replace-on-submit
//!   cancellation token, and a sequence guard against out-of-order
//!   completions.
//! - [`envelope`] decodes the backend's loosely pinned response envelope
//!   into a product list, falling back to empty on anything unexpected.
//! - [`filter`] derives the rendered list from the raw list plus the
//!   current filter/sort selection - a pure function, recomputed on every
//!   input change.
//! - [`window`] is the render-side chunked pagination over the filtered
//!   list.

pub mod cancel;
pub mod envelope;
pub mod feed;
pub mod filter;
pub mod window;

pub use cancel::{CancelHandle, CancelToken, cancel_pair};
pub use feed::ProductFeed;
pub use filter::{CatalogFilter, SortOrder};
pub use window::VisibleWindow;
