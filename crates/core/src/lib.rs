#![forbid(unsafe_code)]

pub mod date;
pub mod milestones;
pub mod model;
pub mod time;
pub mod tracker;
pub mod visits;

pub use date::{CalendarDate, DateError};
pub use milestones::{ClaimError, ClaimOutcome, MilestoneLedger};
pub use time::{fixed_clock, fixed_now, Clock, FIXED_TEST_TIMESTAMP};
pub use tracker::{GoalAdded, GoalToggle, ProgressTracker, TrackerError};
pub use visits::{VisitLedger, VisitToggle, WeekDay};

pub use model::{
    default_catalog, default_milestones, AmaRequest, ContentId, ContentItem, ContentKind, Goal,
    GoalError, GoalId, Library, LibraryError, MerchRequest, MerchSize, Milestone, MilestoneError,
    MilestoneId, Profile, ProfileError, Progress, ProgressChange, RequestError, RequestId,
    RewardSpec,
};
