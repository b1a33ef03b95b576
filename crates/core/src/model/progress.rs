//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// Chapter completion percentage that only moves forward.
///
/// Recomputing from goal counts keeps the previous high-water mark, so
/// unchecking a goal or adding new ones never lowers the shown value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Progress(f64);

impl Progress {
    /// Starts at zero percent.
    #[must_use]
    pub fn new() -> Self {
        Self(0.0)
    }

    /// Rehydrates a stored percentage, clamping to `0.0..=100.0`.
    ///
    /// Non-finite values reset to zero.
    #[must_use]
    pub fn from_percent(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 100.0))
        } else {
            Self(0.0)
        }
    }

    #[must_use]
    pub fn percent(&self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0 >= 100.0
    }

    /// Re-derives the percentage from goal counts.
    ///
    /// The value never decreases and never exceeds 100. A total of zero
    /// leaves the current value untouched.
    #[allow(clippy::cast_precision_loss)]
    pub fn recompute(&mut self, completed: usize, total: usize) -> ProgressChange {
        let from = self.0;
        if total > 0 {
            let fresh = (completed as f64 / total as f64) * 100.0;
            self.0 = fresh.max(self.0).min(100.0);
        }
        ProgressChange { from, to: self.0 }
    }
}

/// Outcome of a progress recomputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressChange {
    pub from: f64,
    pub to: f64,
}

impl ProgressChange {
    /// Returns true if the percentage moved forward.
    #[must_use]
    pub fn advanced(&self) -> bool {
        self.to > self.from
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
