//! Record store collaborator.
//!
//! The live tracking session never owns route data. It reads routes and
//! trips once and follows track objects and the timetable as live
//! collections through the [`RouteStore`] trait, injected at construction.
//!
//! # Components
//!
//! - [`RouteStore`] - the collaborator contract (one-shot reads + live collections)
//! - [`MemoryRouteStore`] - thread-safe in-memory implementation
//! - [`RouteBundle`] - JSON route bundle for import and export

mod bundle;
mod memory;
mod traits;

pub use bundle::{BundleError, RouteBundle, BUNDLE_VERSION};
pub use memory::MemoryRouteStore;
pub use traits::RouteStore;

use thiserror::Error;

/// Errors surfaced by a [`RouteStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or read.
    #[error("Route store unavailable: {0}")]
    Unavailable(String),

    /// A route bundle could not be read or written.
    #[error("Route bundle error: {0}")]
    Bundle(#[from] BundleError),
}
