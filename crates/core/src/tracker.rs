use thiserror::Error;

use crate::model::{Goal, GoalError, GoalId, Progress, ProgressChange};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrackerError {
    #[error(transparent)]
    InvalidGoal(#[from] GoalError),

    #[error("no goal with id {0}")]
    UnknownGoal(GoalId),
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Result of adding a goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalAdded {
    /// The id actually assigned, which may be later than the requested one.
    pub id: GoalId,
    pub progress: ProgressChange,
}

/// Result of toggling a goal's checkbox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalToggle {
    pub id: GoalId,
    /// The goal's completion flag after the toggle.
    pub completed: bool,
    pub progress: ProgressChange,
}

//
// ─── TRACKER ───────────────────────────────────────────────────────────────────
//

/// Weekly goals and the chapter progress derived from them.
///
/// Progress is a ratchet: checking goals can raise it, while unchecking
/// goals or adding new ones leaves the high-water mark in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressTracker {
    goals: Vec<Goal>,
    progress: Progress,
}

impl ProgressTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrates the tracker from stored goals and percentage.
    #[must_use]
    pub fn from_persisted(goals: Vec<Goal>, progress: Progress) -> Self {
        Self { goals, progress }
    }

    /// Adds a goal, assigning an id at or after `requested`.
    ///
    /// Ids are millisecond timestamps in practice; when two goals arrive
    /// within the same clock tick the new id is bumped past the newest
    /// existing one so ids stay unique.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidGoal` if the text fails validation.
    pub fn add_goal(
        &mut self,
        requested: GoalId,
        text: impl Into<String>,
    ) -> Result<GoalAdded, TrackerError> {
        let id = self.allocate_id(requested);
        let goal = Goal::new(id, text)?;
        self.goals.push(goal);
        let progress = self.recompute_progress();
        Ok(GoalAdded { id, progress })
    }

    /// Flips a goal's checkbox and recomputes progress.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownGoal` if no goal has the given id.
    pub fn toggle_goal(&mut self, id: GoalId) -> Result<GoalToggle, TrackerError> {
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id() == id)
            .ok_or(TrackerError::UnknownGoal(id))?;
        let completed = goal.toggle();
        let progress = self.recompute_progress();
        Ok(GoalToggle {
            id,
            completed,
            progress,
        })
    }

    /// Re-derives the chapter percentage from the current goal counts.
    pub fn recompute_progress(&mut self) -> ProgressChange {
        let completed = self.completed_count();
        self.progress.recompute(completed, self.goals.len())
    }

    // Accessors
    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.goals.iter().filter(|g| g.is_completed()).count()
    }

    /// True once at least one goal exists and every goal is checked.
    #[must_use]
    pub fn all_goals_complete(&self) -> bool {
        !self.goals.is_empty() && self.goals.iter().all(Goal::is_completed)
    }

    fn allocate_id(&self, requested: GoalId) -> GoalId {
        let floor = self
            .goals
            .iter()
            .map(|g| g.id().value())
            .max()
            .map_or(i64::MIN, |newest| newest.saturating_add(1));
        GoalId::new(requested.value().max(floor))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
