use std::sync::Arc;

use examtrack_core::date::CalendarDate;
use examtrack_core::milestones::{ClaimOutcome, MilestoneLedger};
use examtrack_core::model::{
    ContentId, ContentKind, Goal, GoalId, Library, Milestone, MilestoneId, Profile, Progress,
};
use examtrack_core::tracker::{GoalAdded, GoalToggle, ProgressTracker};
use examtrack_core::visits::{VisitLedger, VisitToggle};
use storage::{AppStateRecord, KeyValueStore, Stores};

use crate::Clock;
use crate::dashboard_view::{DashboardView, WeekOverview};
use crate::error::AppError;

/// Outcome of toggling a goal.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalUpdate {
    pub toggle: GoalToggle,
    /// Rungs that crossed their threshold on this recompute.
    pub newly_unlocked: Vec<MilestoneId>,
    /// Every goal done, or chapter progress at the cap.
    pub celebration: bool,
}

/// One catalog entry with its saved and liked flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentCard {
    pub id: ContentId,
    pub title: String,
    pub kind: ContentKind,
    pub saved: bool,
    pub liked: bool,
}

/// Orchestrates the whole tracker: profile, goals, visits, library and
/// rewards, with every mutation pushed through the shared stores.
///
/// Persistence is fire-and-forget. A failing backend never blocks a
/// mutation; in-memory state stays authoritative for the session.
pub struct AppService {
    clock: Clock,
    stores: Stores,
    profile: Option<Profile>,
    tracker: ProgressTracker,
    visits: VisitLedger,
    library: Library,
    milestones: MilestoneLedger,
}

impl AppService {
    /// Rehydrates state from the stores and, for a signed-in user, runs
    /// the startup sweep over the reward ladder.
    #[must_use]
    pub fn new(stores: Stores, clock: Clock) -> Self {
        let record = stores.app_state.load();
        let tracker =
            ProgressTracker::from_persisted(record.restore_goals(), record.restore_progress());
        let milestones = MilestoneLedger::from_milestones(stores.milestones.load());

        let mut service = Self {
            clock,
            stores,
            profile: record.restore_profile(),
            tracker,
            visits: record.restore_visits(),
            library: record.restore_library(),
            milestones,
        };
        if service.profile.is_some() {
            service.refresh_milestones();
        }
        service
    }

    /// Service over a throwaway in-memory backend, for tests and demos.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(Stores::in_memory(), clock)
    }

    /// Service over an arbitrary key-value backend.
    #[must_use]
    pub fn with_store(store: Arc<dyn KeyValueStore>, clock: Clock) -> Self {
        Self::new(Stores::new(store), clock)
    }

    /// Signs the user in and persists the session.
    ///
    /// The tracker is single-user and local, so signing in just records
    /// the email.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Profile` if the email fails validation.
    pub fn login(&mut self, email: &str) -> Result<(), AppError> {
        let profile = Profile::new(email)?;
        tracing::debug!("signing in {}", profile.first_name());
        self.profile = Some(profile);
        self.persist_state();
        Ok(())
    }

    /// Signs out and drops the stored session.
    ///
    /// Goals, visits and library flags reset with it; the reward ladder
    /// survives, claims included.
    pub fn logout(&mut self) {
        tracing::debug!("signing out");
        self.profile = None;
        self.tracker = ProgressTracker::new();
        self.visits = VisitLedger::new();
        self.library = Library::new();
        self.stores.app_state.clear();
    }

    /// Opens the dashboard: marks today's visit, sweeps the reward ladder
    /// and assembles everything one render needs.
    ///
    /// Nothing is written unless the visit or an unlock is new.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotLoggedIn` without a signed-in profile.
    pub fn open_dashboard(&mut self) -> Result<DashboardView, AppError> {
        if self.profile.is_none() {
            return Err(AppError::NotLoggedIn);
        }
        let today = self.clock.today();
        if self.visits.mark(today) {
            self.persist_state();
        }
        self.refresh_milestones();
        Ok(DashboardView::assemble(
            self.profile.as_ref(),
            &self.tracker,
            &self.visits,
            &self.library,
            &self.milestones,
            today,
        ))
    }

    /// Adds a goal under a fresh timestamp id and persists the list.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Tracker` if the text fails validation.
    pub fn add_goal(&mut self, text: &str) -> Result<GoalAdded, AppError> {
        let requested = GoalId::new(self.clock.timestamp_millis());
        let added = self.tracker.add_goal(requested, text)?;
        self.persist_state();
        Ok(added)
    }

    /// Flips a goal, re-ratchets progress and sweeps the reward ladder.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Tracker` for an unknown goal id.
    pub fn toggle_goal(&mut self, id: GoalId) -> Result<GoalUpdate, AppError> {
        let toggle = self.tracker.toggle_goal(id)?;
        self.persist_state();
        let newly_unlocked = self.refresh_milestones();
        Ok(GoalUpdate {
            toggle,
            newly_unlocked,
            celebration: self.tracker.all_goals_complete()
                || self.tracker.progress().is_complete(),
        })
    }

    /// Re-checks every rung against current progress, persisting the
    /// ladder only when something newly unlocked.
    pub fn refresh_milestones(&mut self) -> Vec<MilestoneId> {
        let newly_unlocked = self.milestones.refresh_unlocks(self.tracker.progress());
        if !newly_unlocked.is_empty() {
            tracing::debug!("unlocked {} milestone(s)", newly_unlocked.len());
            self.stores.milestones.save(self.milestones.milestones());
        }
        newly_unlocked
    }

    /// Claims an unlocked rung, persisting the ladder when the claim lands.
    ///
    /// A repeat claim answers `ClaimOutcome::AlreadyClaimed` and writes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Claim` when the rung is unknown or still locked.
    pub fn claim_milestone(&mut self, id: &MilestoneId) -> Result<ClaimOutcome, AppError> {
        let outcome = self.milestones.claim(id)?;
        if matches!(outcome, ClaimOutcome::Granted(_)) {
            tracing::debug!("claimed milestone {id}");
            self.stores.milestones.save(self.milestones.milestones());
        }
        Ok(outcome)
    }

    /// Flips the saved flag on a catalog entry. Answers the new state.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Library` for an id outside the catalog.
    pub fn toggle_saved(&mut self, id: ContentId) -> Result<bool, AppError> {
        let now_saved = self.library.toggle_saved(id)?;
        self.persist_state();
        Ok(now_saved)
    }

    /// Flips the liked flag on a catalog entry. Answers the new state.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Library` for an id outside the catalog.
    pub fn toggle_liked(&mut self, id: ContentId) -> Result<bool, AppError> {
        let now_liked = self.library.toggle_liked(id)?;
        self.persist_state();
        Ok(now_liked)
    }

    /// Flips a visit day by hand, the way the calendar strip allows.
    pub fn toggle_visit(&mut self, date: CalendarDate) -> VisitToggle {
        let toggle = self.visits.toggle(date);
        self.persist_state();
        toggle
    }

    /// The Monday-first strip around today.
    #[must_use]
    pub fn week_overview(&self) -> WeekOverview {
        WeekOverview::assemble(&self.visits, self.clock.today())
    }

    /// Catalog entries with their saved and liked flags.
    #[must_use]
    pub fn content_overview(&self) -> Vec<ContentCard> {
        self.library
            .items()
            .iter()
            .map(|item| ContentCard {
                id: item.id(),
                title: item.title().to_owned(),
                kind: item.kind(),
                saved: self.library.is_saved(item.id()),
                liked: self.library.is_liked(item.id()),
            })
            .collect()
    }

    /// Wipes tracker state and the reward ladder back to factory
    /// defaults. Request logs are left alone.
    pub fn reset(&mut self) {
        tracing::debug!("resetting all stored state");
        self.profile = None;
        self.tracker = ProgressTracker::new();
        self.visits = VisitLedger::new();
        self.library = Library::new();
        self.milestones = MilestoneLedger::default_ladder();
        self.stores.app_state.clear();
        self.stores.milestones.clear();
    }

    // Accessors
    #[must_use]
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        self.tracker.goals()
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.tracker.progress()
    }

    #[must_use]
    pub fn milestones(&self) -> &[Milestone] {
        self.milestones.milestones()
    }

    /// Unlocked rungs still waiting to be claimed.
    #[must_use]
    pub fn available_milestones(&self) -> usize {
        self.milestones.available_count()
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.visits.streak(self.clock.today())
    }

    #[must_use]
    pub fn total_visits(&self) -> usize {
        self.visits.len()
    }

    fn persist_state(&self) {
        let record = AppStateRecord::from_domain(
            self.profile.as_ref(),
            &self.tracker,
            &self.library,
            &self.visits,
        );
        self.stores.app_state.save(&record);
    }
}
