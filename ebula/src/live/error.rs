//! Live tracking errors.

use thiserror::Error;

use crate::model::TripId;
use crate::store::StoreError;

/// Rejected controller operations.
#[derive(Debug, Error)]
pub enum LiveError {
    /// The session was disposed; no operation is valid any more.
    #[error("Tracking session has been disposed")]
    Disposed,

    /// The operation needs a loaded trip.
    #[error("No trip loaded")]
    NotLoaded,

    /// A trip is already loaded into this session.
    #[error("A trip is already loaded; start a new session instead")]
    AlreadyLoaded,

    #[error("Trip {0} not found")]
    TripNotFound(TripId),

    #[error(transparent)]
    Store(#[from] StoreError),
}
