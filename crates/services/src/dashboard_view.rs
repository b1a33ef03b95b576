use examtrack_core::date::CalendarDate;
use examtrack_core::milestones::MilestoneLedger;
use examtrack_core::model::{Library, Profile, Progress};
use examtrack_core::tracker::ProgressTracker;
use examtrack_core::visits::{VisitLedger, WeekDay};

/// Greeting block for the dashboard hero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    /// `Welcome, {name}` with a signed-in profile, the plain page title
    /// otherwise.
    pub title: String,
    /// Visit count and streak line; `None` without a profile.
    pub subtitle: Option<String>,
    /// First name for the arrival toast, `Learner` when unknown.
    pub display_name: String,
    /// A streak of three or more days earns the celebratory toast emoji.
    pub celebratory: bool,
}

impl Greeting {
    #[must_use]
    pub fn assemble(profile: Option<&Profile>, total_visits: usize, streak: u32) -> Self {
        let name = profile.map(Profile::first_name);
        Self {
            title: name.map_or_else(
                || "Motivation Dashboard".to_owned(),
                |name| format!("Welcome, {name}"),
            ),
            subtitle: name.map(|_| {
                format!(
                    "You've visited {total_visits} {}, current streak {streak} {}",
                    days_word(total_visits),
                    days_word(streak as usize),
                )
            }),
            display_name: name.unwrap_or("Learner").to_owned(),
            celebratory: streak >= 3,
        }
    }
}

fn days_word(count: usize) -> &'static str {
    if count == 1 { "day" } else { "days" }
}

/// Monday-first week strip with today highlighted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekOverview {
    pub days: [WeekDay; 7],
    /// Index of today within `days`, always in `0..7`.
    pub today_index: usize,
}

impl WeekOverview {
    #[must_use]
    pub fn assemble(visits: &VisitLedger, today: CalendarDate) -> Self {
        Self {
            days: visits.week_of(today),
            today_index: today.weekday_index(),
        }
    }
}

/// Short encouragement for the current progress band.
///
/// Bands are 25 points wide; the second one quotes the rounded
/// percentage back at the learner.
#[must_use]
pub fn motivation_message(progress: Progress) -> String {
    match progress.percent() {
        p if p < 25.0 => "You're getting there!".to_owned(),
        p if p < 50.0 => format!("You're {p:.0}% closer to your goal"),
        p if p < 75.0 => "Great progress! Keep momentum.".to_owned(),
        p if p < 100.0 => "Almost there! You're doing amazing.".to_owned(),
        _ => "Incredible work! Finish strong.".to_owned(),
    }
}

/// Everything the dashboard needs for one render.
///
/// This is intentionally **not** a UI view-model: percentages stay
/// numeric and nothing is localized. The front end formats as it likes.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub greeting: Greeting,
    pub progress_percent: f64,
    pub motivation: String,

    pub total_visits: usize,
    pub streak: u32,
    pub week: WeekOverview,

    pub saved_items: usize,
    pub liked_items: usize,
    pub available_rewards: usize,

    /// Every goal done, or chapter progress at the cap.
    pub celebration: bool,
}

impl DashboardView {
    #[must_use]
    pub fn assemble(
        profile: Option<&Profile>,
        tracker: &ProgressTracker,
        visits: &VisitLedger,
        library: &Library,
        milestones: &MilestoneLedger,
        today: CalendarDate,
    ) -> Self {
        let streak = visits.streak(today);
        let progress = tracker.progress();
        Self {
            greeting: Greeting::assemble(profile, visits.len(), streak),
            progress_percent: progress.percent(),
            motivation: motivation_message(progress),
            total_visits: visits.len(),
            streak,
            week: WeekOverview::assemble(visits, today),
            saved_items: library.saved_count(),
            liked_items: library.liked_count(),
            available_rewards: milestones.available_count(),
            celebration: tracker.all_goals_complete() || progress.is_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn greeting_uses_the_first_name_and_counts() {
        let profile = Profile::new("amir.k@example.com").unwrap();
        let greeting = Greeting::assemble(Some(&profile), 5, 2);
        assert_eq!(greeting.title, "Welcome, Amir");
        assert_eq!(
            greeting.subtitle.as_deref(),
            Some("You've visited 5 days, current streak 2 days")
        );
        assert_eq!(greeting.display_name, "Amir");
        assert!(!greeting.celebratory);
    }

    #[test]
    fn greeting_singular_forms_at_one() {
        let profile = Profile::new("jo@example.com").unwrap();
        let greeting = Greeting::assemble(Some(&profile), 1, 1);
        assert_eq!(
            greeting.subtitle.as_deref(),
            Some("You've visited 1 day, current streak 1 day")
        );
    }

    #[test]
    fn greeting_falls_back_without_a_profile() {
        let greeting = Greeting::assemble(None, 9, 9);
        assert_eq!(greeting.title, "Motivation Dashboard");
        assert_eq!(greeting.subtitle, None);
        assert_eq!(greeting.display_name, "Learner");
    }

    #[test]
    fn a_three_day_streak_turns_celebratory() {
        let profile = Profile::new("jo@example.com").unwrap();
        assert!(Greeting::assemble(Some(&profile), 3, 3).celebratory);
        assert!(!Greeting::assemble(Some(&profile), 3, 2).celebratory);
    }

    #[test]
    fn motivation_bands_step_every_25_points() {
        assert_eq!(
            motivation_message(Progress::from_percent(0.0)),
            "You're getting there!"
        );
        assert_eq!(
            motivation_message(Progress::from_percent(33.3)),
            "You're 33% closer to your goal"
        );
        assert_eq!(
            motivation_message(Progress::from_percent(50.0)),
            "Great progress! Keep momentum."
        );
        assert_eq!(
            motivation_message(Progress::from_percent(75.0)),
            "Almost there! You're doing amazing."
        );
        assert_eq!(
            motivation_message(Progress::from_percent(100.0)),
            "Incredible work! Finish strong."
        );
    }

    #[test]
    fn week_overview_flags_visits_and_today() {
        let visits = VisitLedger::from_days([day("2023-11-13"), day("2023-11-14")]);
        let week = WeekOverview::assemble(&visits, day("2023-11-14"));
        assert_eq!(week.today_index, 1);
        assert!(week.days[0].visited);
        assert!(week.days[1].visited);
        assert!(!week.days[2].visited);
        assert_eq!(week.days[0].date, day("2023-11-13"));
        assert_eq!(week.days[6].date, day("2023-11-19"));
    }
}
