#![forbid(unsafe_code)]

pub mod json_file;
pub mod records;
pub mod store;
pub mod stores;

pub use json_file::JsonFileStore;
pub use records::{
    AmaRequestRecord, AppStateRecord, GoalRecord, MerchRequestRecord, MilestoneRecord,
    RewardRecord, UserRecord,
};
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use stores::{
    AMA_REQUESTS_KEY, APP_STATE_KEY, AppStateStore, MERCH_REQUESTS_KEY, MILESTONES_KEY,
    MilestoneStore, RequestStore, Stores,
};
