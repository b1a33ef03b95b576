//! Shared error types for the services crate.

use thiserror::Error;

use examtrack_core::milestones::ClaimError;
use examtrack_core::model::{LibraryError, ProfileError, RequestError};
use examtrack_core::tracker::TrackerError;

/// Errors emitted by `AppService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("no user is signed in")]
    NotLoggedIn,
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Library(#[from] LibraryError),
    #[error(transparent)]
    Claim(#[from] ClaimError),
}

/// Errors emitted by `RewardRequestService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RequestServiceError {
    #[error(transparent)]
    Request(#[from] RequestError),
}
