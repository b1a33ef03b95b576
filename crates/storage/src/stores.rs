//! Typed stores over the raw key-value backend.
//!
//! Loads never fail: a missing, unreadable or invalid payload falls back to
//! a usable default and the problem is logged. Saves report success as a
//! plain `bool`, so callers can carry on with in-memory state when the
//! backend is down.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use examtrack_core::model::{AmaRequest, MerchRequest, Milestone, default_milestones};

use crate::records::{AmaRequestRecord, AppStateRecord, MerchRequestRecord, MilestoneRecord};
use crate::store::{KeyValueStore, MemoryStore};

/// Key holding the app-state snapshot.
pub const APP_STATE_KEY: &str = "examPrepApp";
/// Key holding the reward ladder.
pub const MILESTONES_KEY: &str = "examPrepMilestones";
/// Key holding the AMA request log.
pub const AMA_REQUESTS_KEY: &str = "amaRequests";
/// Key holding the merch request log.
pub const MERCH_REQUESTS_KEY: &str = "merchRequests";

fn read_raw(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!("could not read {key}: {e}");
            None
        }
    }
}

fn write_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> bool {
    let payload = match serde_json::to_string(value) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("could not encode {key}: {e}");
            return false;
        }
    };
    match store.set(key, &payload) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("could not persist {key}: {e}");
            false
        }
    }
}

fn remove_key(store: &dyn KeyValueStore, key: &str) -> bool {
    match store.remove(key) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("could not clear {key}: {e}");
            false
        }
    }
}

/// Typed access to the app-state snapshot.
#[derive(Clone)]
pub struct AppStateStore {
    store: Arc<dyn KeyValueStore>,
}

impl AppStateStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored snapshot, or a default one when missing or unreadable.
    #[must_use]
    pub fn load(&self) -> AppStateRecord {
        let Some(raw) = read_raw(self.store.as_ref(), APP_STATE_KEY) else {
            return AppStateRecord::default();
        };
        match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("stored app state is unreadable, starting fresh: {e}");
                AppStateRecord::default()
            }
        }
    }

    /// Persist the snapshot. Answers false if the write failed.
    pub fn save(&self, record: &AppStateRecord) -> bool {
        write_json(self.store.as_ref(), APP_STATE_KEY, record)
    }

    /// Drop the snapshot, as sign-out does.
    pub fn clear(&self) -> bool {
        remove_key(self.store.as_ref(), APP_STATE_KEY)
    }
}

/// Typed access to the reward ladder.
#[derive(Clone)]
pub struct MilestoneStore {
    store: Arc<dyn KeyValueStore>,
}

impl MilestoneStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored ladder.
    ///
    /// Any unreadable payload or invalid rung swaps the whole ladder for
    /// the built-in default, so claim bookkeeping is never applied to a
    /// half-parsed list.
    #[must_use]
    pub fn load(&self) -> Vec<Milestone> {
        let Some(raw) = read_raw(self.store.as_ref(), MILESTONES_KEY) else {
            return default_milestones();
        };
        let records: Vec<MilestoneRecord> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("stored milestones are unreadable, using the default ladder: {e}");
                return default_milestones();
            }
        };
        let mut ladder = Vec::with_capacity(records.len());
        for record in records {
            match record.into_milestone() {
                Ok(milestone) => ladder.push(milestone),
                Err(e) => {
                    tracing::warn!("stored milestone is invalid, using the default ladder: {e}");
                    return default_milestones();
                }
            }
        }
        ladder
    }

    /// Persist the ladder. Answers false if the write failed.
    pub fn save(&self, milestones: &[Milestone]) -> bool {
        let records: Vec<MilestoneRecord> = milestones
            .iter()
            .map(MilestoneRecord::from_milestone)
            .collect();
        write_json(self.store.as_ref(), MILESTONES_KEY, &records)
    }

    /// Drop the stored ladder.
    pub fn clear(&self) -> bool {
        remove_key(self.store.as_ref(), MILESTONES_KEY)
    }
}

/// Append-only logs for AMA and merch requests.
#[derive(Clone)]
pub struct RequestStore {
    store: Arc<dyn KeyValueStore>,
}

impl RequestStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Valid AMA requests in submission order.
    #[must_use]
    pub fn ama_requests(&self) -> Vec<AmaRequest> {
        self.load_list::<AmaRequestRecord>(AMA_REQUESTS_KEY)
            .into_iter()
            .filter_map(|record| match record.into_request() {
                Ok(request) => Some(request),
                Err(e) => {
                    tracing::debug!("dropping stored ama request: {e}");
                    None
                }
            })
            .collect()
    }

    /// Valid merch requests in submission order.
    #[must_use]
    pub fn merch_requests(&self) -> Vec<MerchRequest> {
        self.load_list::<MerchRequestRecord>(MERCH_REQUESTS_KEY)
            .into_iter()
            .filter_map(|record| match record.into_request() {
                Ok(request) => Some(request),
                Err(e) => {
                    tracing::debug!("dropping stored merch request: {e}");
                    None
                }
            })
            .collect()
    }

    /// Append an AMA request to its log. Answers false if the write failed.
    pub fn push_ama(&self, request: &AmaRequest) -> bool {
        let mut records: Vec<AmaRequestRecord> = self.load_list(AMA_REQUESTS_KEY);
        records.push(AmaRequestRecord::from_request(request));
        write_json(self.store.as_ref(), AMA_REQUESTS_KEY, &records)
    }

    /// Append a merch request to its log. Answers false if the write failed.
    pub fn push_merch(&self, request: &MerchRequest) -> bool {
        let mut records: Vec<MerchRequestRecord> = self.load_list(MERCH_REQUESTS_KEY);
        records.push(MerchRequestRecord::from_request(request));
        write_json(self.store.as_ref(), MERCH_REQUESTS_KEY, &records)
    }

    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(raw) = read_raw(self.store.as_ref(), key) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("stored {key} log is unreadable, starting fresh: {e}");
                Vec::new()
            }
        }
    }
}

/// Aggregates the typed stores behind one shared backend for easy swapping.
#[derive(Clone)]
pub struct Stores {
    pub app_state: AppStateStore,
    pub milestones: MilestoneStore,
    pub requests: RequestStore,
}

impl Stores {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            app_state: AppStateStore::new(Arc::clone(&store)),
            milestones: MilestoneStore::new(Arc::clone(&store)),
            requests: RequestStore::new(store),
        }
    }

    /// Everything backed by one in-memory store, for tests and prototyping.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use examtrack_core::model::{MerchSize, RequestId};

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Io("backend down".to_owned()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io("backend down".to_owned()))
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Io("backend down".to_owned()))
        }
    }

    #[test]
    fn app_state_defaults_when_missing_or_malformed() {
        let stores = Stores::in_memory();
        assert_eq!(stores.app_state.load(), AppStateRecord::default());

        let backend = MemoryStore::new();
        backend.set(APP_STATE_KEY, "{not json").unwrap();
        let stores = Stores::new(Arc::new(backend));
        assert_eq!(stores.app_state.load(), AppStateRecord::default());
    }

    #[test]
    fn app_state_survives_save_reload_and_clear() {
        let stores = Stores::in_memory();
        let record = AppStateRecord {
            is_logged_in: true,
            chapter_progress: 40.0,
            ..AppStateRecord::default()
        };
        assert!(stores.app_state.save(&record));
        assert_eq!(stores.app_state.load(), record);
        assert!(stores.app_state.clear());
        assert_eq!(stores.app_state.load(), AppStateRecord::default());
    }

    #[test]
    fn milestones_default_when_any_rung_is_invalid() {
        let backend = MemoryStore::new();
        backend
            .set(
                MILESTONES_KEY,
                r#"[{"id": "m1", "title": "Starter", "description": "d"}]"#,
            )
            .unwrap();
        let stores = Stores::new(Arc::new(backend));
        assert_eq!(stores.milestones.load(), default_milestones());
    }

    #[test]
    fn milestone_ladder_round_trips() {
        let stores = Stores::in_memory();
        let ladder = default_milestones();
        assert!(stores.milestones.save(&ladder));
        assert_eq!(stores.milestones.load(), ladder);
    }

    #[test]
    fn request_logs_append_in_order() {
        let stores = Stores::in_memory();
        let first = AmaRequest::new(RequestId::new(1), "a@b.c", "Q1").unwrap();
        let second = AmaRequest::new(RequestId::new(2), "a@b.c", "Q2").unwrap();
        assert!(stores.requests.push_ama(&first));
        assert!(stores.requests.push_ama(&second));
        assert_eq!(stores.requests.ama_requests(), vec![first, second]);

        let merch =
            MerchRequest::new(RequestId::new(3), "Jo", "12 Hill Road", MerchSize::M).unwrap();
        assert!(stores.requests.push_merch(&merch));
        assert_eq!(stores.requests.merch_requests(), vec![merch]);
    }

    #[test]
    fn a_failing_backend_degrades_to_defaults() {
        let stores = Stores::new(Arc::new(FailingStore));
        assert_eq!(stores.app_state.load(), AppStateRecord::default());
        assert_eq!(stores.milestones.load(), default_milestones());
        assert!(stores.requests.ama_requests().is_empty());
        assert!(!stores.app_state.save(&AppStateRecord::default()));
        assert!(!stores.app_state.clear());
    }
}
