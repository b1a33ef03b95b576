use thiserror::Error;

use crate::model::{default_milestones, Milestone, MilestoneId, Progress, RewardSpec};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClaimError {
    #[error("no milestone with id {0}")]
    UnknownMilestone(MilestoneId),

    #[error("milestone {0} is still locked")]
    StillLocked(MilestoneId),
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// What a claim call did.
///
/// A repeat claim is a no-op, not a failure, so it lands here rather than
/// in `ClaimError`.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimOutcome {
    /// The rung was claimed just now; the reward goes to the caller.
    Granted(RewardSpec),
    /// The rung had been claimed earlier; nothing changed.
    AlreadyClaimed,
}

//
// ─── LEDGER ────────────────────────────────────────────────────────────────────
//

/// The reward ladder with unlock and claim state.
///
/// Unlocks are one-way: once a rung is reached it stays unlocked, even if a
/// lower progress value is rehydrated later. Claims happen at most once per
/// rung.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneLedger {
    milestones: Vec<Milestone>,
}

impl Default for MilestoneLedger {
    fn default() -> Self {
        Self::default_ladder()
    }
}

impl MilestoneLedger {
    /// Creates the ledger with the built-in ladder, all rungs locked.
    #[must_use]
    pub fn default_ladder() -> Self {
        Self {
            milestones: default_milestones(),
        }
    }

    /// Rehydrates the ledger from stored milestones.
    #[must_use]
    pub fn from_milestones(milestones: Vec<Milestone>) -> Self {
        Self { milestones }
    }

    /// Unlocks every rung whose threshold the given progress has reached.
    ///
    /// Returns the ids that flipped from locked to unlocked, in ladder order.
    pub fn refresh_unlocks(&mut self, progress: Progress) -> Vec<MilestoneId> {
        let mut newly = Vec::new();
        for milestone in &mut self.milestones {
            if !milestone.is_unlocked() && progress.percent() >= milestone.required_progress() {
                milestone.unlock();
                newly.push(milestone.id().clone());
            }
        }
        newly
    }

    /// Claims an unlocked rung and hands out its reward.
    ///
    /// Claiming is idempotent: a rung that was already claimed answers
    /// `ClaimOutcome::AlreadyClaimed` and stays untouched.
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::UnknownMilestone` for ids outside the ladder and
    /// `ClaimError::StillLocked` when the rung has not been reached yet.
    pub fn claim(&mut self, id: &MilestoneId) -> Result<ClaimOutcome, ClaimError> {
        let milestone = self
            .milestones
            .iter_mut()
            .find(|m| m.id() == id)
            .ok_or_else(|| ClaimError::UnknownMilestone(id.clone()))?;

        if milestone.is_claimed() {
            return Ok(ClaimOutcome::AlreadyClaimed);
        }
        if !milestone.is_unlocked() {
            return Err(ClaimError::StillLocked(id.clone()));
        }

        milestone.mark_claimed();
        Ok(ClaimOutcome::Granted(milestone.reward().clone()))
    }

    /// Rungs that are unlocked but not yet claimed.
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.milestones
            .iter()
            .filter(|m| m.is_unlocked() && !m.is_claimed())
            .count()
    }

    #[must_use]
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    #[must_use]
    pub fn get(&self, id: &MilestoneId) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id() == id)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
