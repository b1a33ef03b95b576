use thiserror::Error;

use crate::model::ids::GoalId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GoalError {
    #[error("goal text cannot be empty")]
    EmptyText,
}

//
// ─── GOAL ──────────────────────────────────────────────────────────────────────
//

/// A single weekly study goal with a completion checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    id: GoalId,
    text: String,
    completed: bool,
}

impl Goal {
    /// Creates a new, not-yet-completed goal.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::EmptyText` if the text is empty or whitespace-only.
    pub fn new(id: GoalId, text: impl Into<String>) -> Result<Self, GoalError> {
        Self::from_persisted(id, text, false)
    }

    /// Rehydrates a goal from its stored fields.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::EmptyText` if the text is empty or whitespace-only.
    pub fn from_persisted(
        id: GoalId,
        text: impl Into<String>,
        completed: bool,
    ) -> Result<Self, GoalError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(GoalError::EmptyText);
        }

        Ok(Self {
            id,
            text: text.trim().to_owned(),
            completed,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> GoalId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Flips the completion checkbox and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
