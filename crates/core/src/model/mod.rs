mod content;
mod goal;
mod ids;
mod library;
mod milestone;
mod profile;
mod progress;
mod request;

pub use content::{default_catalog, ContentItem, ContentKind};
pub use ids::{ContentId, GoalId, ParseIdError, RequestId};

pub use goal::{Goal, GoalError};
pub use library::{Library, LibraryError};
pub use milestone::{default_milestones, Milestone, MilestoneError, MilestoneId, RewardSpec};
pub use profile::{Profile, ProfileError};
pub use progress::{Progress, ProgressChange};
pub use request::{AmaRequest, MerchRequest, MerchSize, RequestError};
