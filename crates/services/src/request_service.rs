use examtrack_core::model::{AmaRequest, MerchRequest, MerchSize, RequestId};
use storage::Stores;

use crate::Clock;
use crate::error::RequestServiceError;

/// Takes reward-gated requests and appends them to their logs.
///
/// The logs are deliberately independent of the app-state snapshot, so a
/// sign-out or reset never loses a submitted request.
#[derive(Clone)]
pub struct RewardRequestService {
    clock: Clock,
    stores: Stores,
}

impl RewardRequestService {
    #[must_use]
    pub fn new(stores: Stores, clock: Clock) -> Self {
        Self { clock, stores }
    }

    /// Submits an Ask-Me-Anything question.
    ///
    /// # Errors
    ///
    /// Returns `RequestServiceError::Request` if the email or question is
    /// empty.
    pub fn submit_ama(
        &self,
        email: &str,
        question: &str,
    ) -> Result<AmaRequest, RequestServiceError> {
        let request = AmaRequest::new(
            RequestId::new(self.clock.timestamp_millis()),
            email,
            question,
        )?;
        tracing::debug!("ama request {} logged", request.id());
        self.stores.requests.push_ama(&request);
        Ok(request)
    }

    /// Submits a merch shipping request.
    ///
    /// # Errors
    ///
    /// Returns `RequestServiceError::Request` if the name or address is
    /// empty.
    pub fn submit_merch(
        &self,
        name: &str,
        address: &str,
        size: MerchSize,
    ) -> Result<MerchRequest, RequestServiceError> {
        let request = MerchRequest::new(
            RequestId::new(self.clock.timestamp_millis()),
            name,
            address,
            size,
        )?;
        tracing::debug!("merch request {} logged", request.id());
        self.stores.requests.push_merch(&request);
        Ok(request)
    }

    /// Submitted AMA requests, oldest first.
    #[must_use]
    pub fn ama_requests(&self) -> Vec<AmaRequest> {
        self.stores.requests.ama_requests()
    }

    /// Submitted merch requests, oldest first.
    #[must_use]
    pub fn merch_requests(&self) -> Vec<MerchRequest> {
        self.stores.requests.merch_requests()
    }
}
