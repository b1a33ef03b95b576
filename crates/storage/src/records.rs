//! Persisted record shapes.
//!
//! Field names follow the JSON layout the browser build of the app kept in
//! `localStorage`, so an exported snapshot from that build loads unchanged.
//! Conversions back into domain types validate each entry and let callers
//! decide what to do with rejects.

use serde::{Deserialize, Serialize};

use examtrack_core::date::CalendarDate;
use examtrack_core::model::{
    AmaRequest, ContentId, Goal, GoalError, GoalId, Library, MerchRequest, Milestone,
    MilestoneError, MilestoneId, Profile, Progress, RequestError, RequestId, RewardSpec,
};
use examtrack_core::tracker::ProgressTracker;
use examtrack_core::visits::VisitLedger;

/// Persisted shape of the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub email: String,
}

/// Persisted shape of a weekly goal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl GoalRecord {
    #[must_use]
    pub fn from_goal(goal: &Goal) -> Self {
        Self {
            id: goal.id().value(),
            text: goal.text().to_owned(),
            completed: goal.is_completed(),
        }
    }

    /// Convert the record back into a domain `Goal`.
    ///
    /// # Errors
    ///
    /// Returns `GoalError` if the stored text fails validation.
    pub fn into_goal(self) -> Result<Goal, GoalError> {
        Goal::from_persisted(GoalId::new(self.id), self.text, self.completed)
    }
}

/// Persisted snapshot of the whole app state.
///
/// Every field has a wire default, so a partial or empty payload still
/// loads; entry-level validation happens in the `restore_*` accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppStateRecord {
    pub is_logged_in: bool,
    pub user: Option<UserRecord>,
    pub chapter_progress: f64,
    pub goals: Vec<GoalRecord>,
    pub saved_content: Vec<ContentId>,
    pub liked_content: Vec<ContentId>,
    pub visits: Vec<String>,
}

impl AppStateRecord {
    /// Assembles the snapshot from live domain state.
    #[must_use]
    pub fn from_domain(
        profile: Option<&Profile>,
        tracker: &ProgressTracker,
        library: &Library,
        visits: &VisitLedger,
    ) -> Self {
        Self {
            is_logged_in: profile.is_some(),
            user: profile.map(|p| UserRecord {
                email: p.email().to_owned(),
            }),
            chapter_progress: tracker.progress().percent(),
            goals: tracker.goals().iter().map(GoalRecord::from_goal).collect(),
            saved_content: library.saved_ids(),
            liked_content: library.liked_ids(),
            visits: visits.iter().map(|day| day.to_string()).collect(),
        }
    }

    /// The stored profile, or `None` when signed out.
    ///
    /// The `isLoggedIn` flag wins over a lingering `user` entry, and a user
    /// whose email fails validation is treated as signed out.
    #[must_use]
    pub fn restore_profile(&self) -> Option<Profile> {
        if !self.is_logged_in {
            return None;
        }
        let user = self.user.as_ref()?;
        match Profile::new(user.email.clone()) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::debug!("dropping stored user: {e}");
                None
            }
        }
    }

    /// Goals that pass validation, in stored order.
    #[must_use]
    pub fn restore_goals(&self) -> Vec<Goal> {
        self.goals
            .iter()
            .filter_map(|record| match record.clone().into_goal() {
                Ok(goal) => Some(goal),
                Err(e) => {
                    tracing::debug!("dropping stored goal {}: {e}", record.id);
                    None
                }
            })
            .collect()
    }

    /// The stored high-water progress, clamped to a valid percentage.
    #[must_use]
    pub fn restore_progress(&self) -> Progress {
        Progress::from_percent(self.chapter_progress)
    }

    /// Saved and liked flags applied to the built-in catalog.
    ///
    /// Ids that no longer exist in the catalog are dropped silently.
    #[must_use]
    pub fn restore_library(&self) -> Library {
        Library::from_flags(
            self.saved_content.iter().copied(),
            self.liked_content.iter().copied(),
        )
    }

    /// Visit days that parse as calendar dates.
    #[must_use]
    pub fn restore_visits(&self) -> VisitLedger {
        VisitLedger::from_days(self.visits.iter().filter_map(|raw| {
            match raw.parse::<CalendarDate>() {
                Ok(day) => Some(day),
                Err(e) => {
                    tracing::debug!("dropping stored visit {raw:?}: {e}");
                    None
                }
            }
        }))
    }
}

/// Persisted shape of a milestone reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RewardRecord {
    Planner {
        #[serde(default)]
        title: String,
        #[serde(default)]
        desc: String,
        #[serde(default = "default_planner_href")]
        href: String,
    },
    Community {
        #[serde(default)]
        title: String,
        #[serde(default)]
        desc: String,
    },
    Merch {
        #[serde(default)]
        title: String,
        #[serde(default)]
        desc: String,
    },
}

fn default_planner_href() -> String {
    "study_planner.html".to_owned()
}

impl RewardRecord {
    #[must_use]
    pub fn from_reward(reward: &RewardSpec) -> Self {
        match reward {
            RewardSpec::Planner {
                title,
                detail,
                href,
            } => RewardRecord::Planner {
                title: title.clone(),
                desc: detail.clone(),
                href: href.clone(),
            },
            RewardSpec::Community { title, detail } => RewardRecord::Community {
                title: title.clone(),
                desc: detail.clone(),
            },
            RewardSpec::Merch { title, detail } => RewardRecord::Merch {
                title: title.clone(),
                desc: detail.clone(),
            },
        }
    }

    #[must_use]
    pub fn into_reward(self) -> RewardSpec {
        match self {
            RewardRecord::Planner { title, desc, href } => RewardSpec::Planner {
                title,
                detail: desc,
                href,
            },
            RewardRecord::Community { title, desc } => RewardSpec::Community {
                title,
                detail: desc,
            },
            RewardRecord::Merch { title, desc } => RewardSpec::Merch {
                title,
                detail: desc,
            },
        }
    }
}

/// Persisted shape of one reward-ladder rung.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_progress: f64,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub claimed: bool,
    pub reward: Option<RewardRecord>,
}

impl MilestoneRecord {
    #[must_use]
    pub fn from_milestone(milestone: &Milestone) -> Self {
        Self {
            id: milestone.id().as_str().to_owned(),
            title: milestone.title().to_owned(),
            description: milestone.description().to_owned(),
            required_progress: milestone.required_progress(),
            unlocked: milestone.is_unlocked(),
            claimed: milestone.is_claimed(),
            reward: Some(RewardRecord::from_reward(milestone.reward())),
        }
    }

    /// Convert the record back into a domain `Milestone`.
    ///
    /// # Errors
    ///
    /// Returns `MilestoneError` if the id, title or threshold fail
    /// validation, or the reward is missing.
    pub fn into_milestone(self) -> Result<Milestone, MilestoneError> {
        let reward = self.reward.ok_or(MilestoneError::MissingReward)?;
        Milestone::from_persisted(
            MilestoneId::new(self.id)?,
            self.title,
            self.description,
            self.required_progress,
            reward.into_reward(),
            self.unlocked,
            self.claimed,
        )
    }
}

/// Persisted shape of an AMA request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmaRequestRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub q: String,
}

impl AmaRequestRecord {
    #[must_use]
    pub fn from_request(request: &AmaRequest) -> Self {
        Self {
            id: request.id().value(),
            email: request.email().to_owned(),
            q: request.question().to_owned(),
        }
    }

    /// Convert the record back into a domain `AmaRequest`.
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if the email or the question is empty.
    pub fn into_request(self) -> Result<AmaRequest, RequestError> {
        AmaRequest::new(RequestId::new(self.id), self.email, self.q)
    }
}

/// Persisted shape of a merch request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchRequestRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub addr: String,
    #[serde(default)]
    pub size: String,
}

impl MerchRequestRecord {
    #[must_use]
    pub fn from_request(request: &MerchRequest) -> Self {
        Self {
            id: request.id().value(),
            name: request.name().to_owned(),
            addr: request.address().to_owned(),
            size: request.size().label().to_owned(),
        }
    }

    /// Convert the record back into a domain `MerchRequest`.
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if a field is empty or the size label is
    /// unknown.
    pub fn into_request(self) -> Result<MerchRequest, RequestError> {
        let size = self.size.parse()?;
        MerchRequest::new(RequestId::new(self.id), self.name, self.addr, size)
    }
}
