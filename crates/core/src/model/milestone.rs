use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MilestoneError {
    #[error("milestone id cannot be empty")]
    EmptyId,

    #[error("milestone title cannot be empty")]
    EmptyTitle,

    #[error("required progress must be a percentage in 0..=100")]
    InvalidThreshold,

    #[error("milestone has no reward attached")]
    MissingReward,
}

//
// ─── MILESTONE ID ──────────────────────────────────────────────────────────────
//

/// Identifier of a reward-ladder rung, unique within the ladder.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MilestoneId(String);

impl MilestoneId {
    /// Creates a milestone id from a non-empty string.
    ///
    /// # Errors
    ///
    /// Returns `MilestoneError::EmptyId` if the trimmed id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, MilestoneError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(MilestoneError::EmptyId);
        }
        Ok(Self(id.trim().to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MilestoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MilestoneId({})", self.0)
    }
}

impl fmt::Display for MilestoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MilestoneId {
    type Err = MilestoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

//
// ─── REWARD ────────────────────────────────────────────────────────────────────
//

/// What the learner receives when a milestone is claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardSpec {
    /// A printable planner reachable at `href`.
    Planner {
        title: String,
        detail: String,
        href: String,
    },
    /// Access to the community channel plus AMA requests.
    Community { title: String, detail: String },
    /// Physical merchandise, requested through a shipping form.
    Merch { title: String, detail: String },
}

impl RewardSpec {
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            RewardSpec::Planner { title, .. }
            | RewardSpec::Community { title, .. }
            | RewardSpec::Merch { title, .. } => title,
        }
    }

    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            RewardSpec::Planner { detail, .. }
            | RewardSpec::Community { detail, .. }
            | RewardSpec::Merch { detail, .. } => detail,
        }
    }
}

//
// ─── MILESTONE ─────────────────────────────────────────────────────────────────
//

/// One rung of the reward ladder.
///
/// `unlocked` flips once the chapter progress reaches `required_progress`
/// and never flips back; `claimed` flips once when the reward is handed out.
#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    id: MilestoneId,
    title: String,
    description: String,
    required_progress: f64,
    reward: RewardSpec,
    unlocked: bool,
    claimed: bool,
}

impl Milestone {
    /// Creates a locked, unclaimed milestone.
    ///
    /// # Errors
    ///
    /// Returns `MilestoneError` if the title is empty or the threshold is not
    /// a percentage in `0..=100`.
    pub fn new(
        id: MilestoneId,
        title: impl Into<String>,
        description: impl Into<String>,
        required_progress: f64,
        reward: RewardSpec,
    ) -> Result<Self, MilestoneError> {
        Self::from_persisted(id, title, description, required_progress, reward, false, false)
    }

    /// Rehydrates a milestone from its stored fields.
    ///
    /// A claimed milestone is always treated as unlocked.
    ///
    /// # Errors
    ///
    /// Returns `MilestoneError` if the title is empty or the threshold is not
    /// a percentage in `0..=100`.
    pub fn from_persisted(
        id: MilestoneId,
        title: impl Into<String>,
        description: impl Into<String>,
        required_progress: f64,
        reward: RewardSpec,
        unlocked: bool,
        claimed: bool,
    ) -> Result<Self, MilestoneError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(MilestoneError::EmptyTitle);
        }
        if !required_progress.is_finite() || !(0.0..=100.0).contains(&required_progress) {
            return Err(MilestoneError::InvalidThreshold);
        }

        let description = description.into();
        Ok(Self {
            id,
            title: title.trim().to_owned(),
            description: description.trim().to_owned(),
            required_progress,
            reward,
            unlocked: unlocked || claimed,
            claimed,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> &MilestoneId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn required_progress(&self) -> f64 {
        self.required_progress
    }

    #[must_use]
    pub fn reward(&self) -> &RewardSpec {
        &self.reward
    }

    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    #[must_use]
    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    pub(crate) fn unlock(&mut self) {
        self.unlocked = true;
    }

    pub(crate) fn mark_claimed(&mut self) {
        self.claimed = true;
    }
}

/// The built-in three-rung reward ladder, all rungs locked.
#[must_use]
pub fn default_milestones() -> Vec<Milestone> {
    vec![
        Milestone {
            id: MilestoneId("m1".to_owned()),
            title: "Starter Planner".to_owned(),
            description: "Reach 25% progress".to_owned(),
            required_progress: 25.0,
            reward: RewardSpec::Planner {
                title: "Exclusive Study Planner".to_owned(),
                detail: "Printable high-quality study planner (A4).".to_owned(),
                href: "study_planner.html".to_owned(),
            },
            unlocked: false,
            claimed: false,
        },
        Milestone {
            id: MilestoneId("m2".to_owned()),
            title: "Pre-Doubts Access".to_owned(),
            description: "Reach 50% progress".to_owned(),
            required_progress: 50.0,
            reward: RewardSpec::Community {
                title: "Pre-Doubts Telegram / AMA".to_owned(),
                detail: "Join our pre-doubts Telegram group or request an Ask-Me-Anything session."
                    .to_owned(),
            },
            unlocked: false,
            claimed: false,
        },
        Milestone {
            id: MilestoneId("m3".to_owned()),
            title: "Champion Pack".to_owned(),
            description: "Reach 100% progress".to_owned(),
            required_progress: 100.0,
            reward: RewardSpec::Merch {
                title: "Brand Merchandise".to_owned(),
                detail: "Request branded T-shirt + diary pack (limited).".to_owned(),
            },
            unlocked: false,
            claimed: false,
        },
    ]
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_rejects_empty_strings() {
        assert_eq!(MilestoneId::new("  ").unwrap_err(), MilestoneError::EmptyId);
        assert_eq!("m1".parse::<MilestoneId>().unwrap().as_str(), "m1");
    }

    #[test]
    fn from_persisted_rejects_empty_title() {
        let err = Milestone::from_persisted(
            MilestoneId::new("m9").unwrap(),
            " ",
            "desc",
            10.0,
            RewardSpec::Community {
                title: "t".into(),
                detail: "d".into(),
            },
            false,
            false,
        )
        .unwrap_err();
        assert_eq!(err, MilestoneError::EmptyTitle);
    }

    #[test]
    fn from_persisted_rejects_bad_thresholds() {
        for bad in [-1.0, 100.5, f64::NAN, f64::INFINITY] {
            let err = Milestone::new(
                MilestoneId::new("m9").unwrap(),
                "title",
                "desc",
                bad,
                RewardSpec::Merch {
                    title: "t".into(),
                    detail: "d".into(),
                },
            )
            .unwrap_err();
            assert_eq!(err, MilestoneError::InvalidThreshold);
        }
    }

    #[test]
    fn claimed_implies_unlocked() {
        let milestone = Milestone::from_persisted(
            MilestoneId::new("m1").unwrap(),
            "title",
            "desc",
            25.0,
            RewardSpec::Community {
                title: "t".into(),
                detail: "d".into(),
            },
            false,
            true,
        )
        .unwrap();
        assert!(milestone.is_unlocked());
        assert!(milestone.is_claimed());
    }

    #[test]
    fn default_ladder_shape() {
        let ladder = default_milestones();
        assert_eq!(ladder.len(), 3);
        let thresholds: Vec<f64> = ladder.iter().map(Milestone::required_progress).collect();
        assert_eq!(thresholds, vec![25.0, 50.0, 100.0]);
        assert!(ladder.iter().all(|m| !m.is_unlocked() && !m.is_claimed()));
        assert!(matches!(
            ladder[0].reward(),
            RewardSpec::Planner { href, .. } if href == "study_planner.html"
        ));
    }
}
