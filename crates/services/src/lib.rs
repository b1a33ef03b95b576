#![forbid(unsafe_code)]

pub mod app_service;
pub mod dashboard_view;
pub mod error;
pub mod request_service;

pub use examtrack_core::Clock;

pub use error::{AppError, RequestServiceError};

pub use app_service::{AppService, ContentCard, GoalUpdate};
pub use dashboard_view::{DashboardView, Greeting, WeekOverview, motivation_message};
pub use request_service::RewardRequestService;
