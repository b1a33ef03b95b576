use std::sync::Arc;

use examtrack_core::model::ContentId;
use examtrack_core::{FIXED_TEST_TIMESTAMP, fixed_clock};
use services::{AppError, AppService};
use storage::{APP_STATE_KEY, KeyValueStore, MemoryStore, StoreError};

struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Io("backend down".to_owned()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io("backend down".to_owned()))
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Io("backend down".to_owned()))
    }
}

#[test]
fn dashboard_requires_a_signed_in_user() {
    let mut service = AppService::in_memory(fixed_clock());
    assert!(matches!(
        service.open_dashboard(),
        Err(AppError::NotLoggedIn)
    ));
}

#[test]
fn login_then_dashboard_marks_todays_visit() {
    // The fixed clock lands on Tuesday 2023-11-14.
    let mut service = AppService::in_memory(fixed_clock());
    service.login("amir.k@example.com").unwrap();

    let view = service.open_dashboard().unwrap();
    assert_eq!(view.greeting.title, "Welcome, Amir");
    assert_eq!(view.total_visits, 1);
    assert_eq!(view.streak, 1);
    assert_eq!(view.week.today_index, 1);
    assert!(view.week.days[1].visited);
    assert!(!view.week.days[0].visited);
    assert_eq!(view.progress_percent, 0.0);
    assert!(!view.celebration);
}

#[test]
fn repeat_dashboard_visits_write_nothing_new() {
    let backend = MemoryStore::new();
    let mut service = AppService::with_store(Arc::new(backend.clone()), fixed_clock());
    service.login("amir.k@example.com").unwrap();
    service.open_dashboard().unwrap();

    let writes_after_first_open = backend.write_count();
    service.open_dashboard().unwrap();
    service.open_dashboard().unwrap();
    assert_eq!(backend.write_count(), writes_after_first_open);
}

#[test]
fn goal_flow_persists_across_restart() {
    let backend = MemoryStore::new();
    let mut service = AppService::with_store(Arc::new(backend.clone()), fixed_clock());
    service.login("amir.k@example.com").unwrap();

    let first = service.add_goal("Revise optics").unwrap();
    service.add_goal("Mock test").unwrap();
    let update = service.toggle_goal(first.id).unwrap();
    assert!(update.toggle.completed);
    assert_eq!(service.progress().percent(), 50.0);

    let reopened = AppService::with_store(Arc::new(backend), fixed_clock());
    assert_eq!(reopened.goals().len(), 2);
    assert!(reopened.goals()[0].is_completed());
    assert!(!reopened.goals()[1].is_completed());
    assert_eq!(reopened.progress().percent(), 50.0);
    assert_eq!(reopened.profile().unwrap().email(), "amir.k@example.com");
}

#[test]
fn adding_goals_never_lowers_stored_progress() {
    let backend = MemoryStore::new();
    let mut service = AppService::with_store(Arc::new(backend.clone()), fixed_clock());
    service.login("amir.k@example.com").unwrap();

    let only = service.add_goal("Revise optics").unwrap();
    service.toggle_goal(only.id).unwrap();
    assert_eq!(service.progress().percent(), 100.0);

    service.add_goal("Mock test").unwrap();
    assert_eq!(service.progress().percent(), 100.0);

    let reopened = AppService::with_store(Arc::new(backend), fixed_clock());
    assert_eq!(reopened.progress().percent(), 100.0);
}

#[test]
fn logout_drops_the_session_but_not_the_ladder() {
    let backend = MemoryStore::new();
    let mut service = AppService::with_store(Arc::new(backend.clone()), fixed_clock());
    service.login("amir.k@example.com").unwrap();
    let goal = service.add_goal("Revise optics").unwrap();
    service.toggle_goal(goal.id).unwrap();
    assert_eq!(service.available_milestones(), 3);

    service.logout();
    assert!(service.profile().is_none());
    assert!(service.goals().is_empty());
    assert_eq!(backend.get(APP_STATE_KEY).unwrap(), None);
    assert_eq!(service.available_milestones(), 3);

    let reopened = AppService::with_store(Arc::new(backend), fixed_clock());
    assert!(reopened.profile().is_none());
    assert!(reopened.goals().is_empty());
    assert_eq!(reopened.available_milestones(), 3);
}

#[test]
fn saved_and_liked_flags_round_trip() {
    let backend = MemoryStore::new();
    let mut service = AppService::with_store(Arc::new(backend.clone()), fixed_clock());
    service.login("amir.k@example.com").unwrap();

    assert!(service.toggle_saved(ContentId::new(1)).unwrap());
    assert!(service.toggle_liked(ContentId::new(2)).unwrap());
    assert!(!service.toggle_saved(ContentId::new(1)).unwrap());
    assert!(matches!(
        service.toggle_saved(ContentId::new(99)),
        Err(AppError::Library(_))
    ));

    let cards = service.content_overview();
    assert_eq!(cards.len(), 6);
    assert!(!cards[0].saved);
    assert!(cards[1].liked);

    let reopened = AppService::with_store(Arc::new(backend), fixed_clock());
    let cards = reopened.content_overview();
    assert!(cards[1].liked);
    assert!(!cards[0].saved);
}

#[test]
fn visit_toggle_round_trips() {
    use examtrack_core::visits::VisitToggle;

    let mut service = AppService::in_memory(fixed_clock());
    service.login("amir.k@example.com").unwrap();
    let monday = "2023-11-13".parse().unwrap();

    assert_eq!(service.toggle_visit(monday), VisitToggle::Marked);
    assert_eq!(service.total_visits(), 1);
    assert_eq!(service.toggle_visit(monday), VisitToggle::Cleared);
    assert_eq!(service.total_visits(), 0);
}

#[test]
fn persisted_payload_keeps_the_wire_layout() {
    let backend = MemoryStore::new();
    let mut service = AppService::with_store(Arc::new(backend.clone()), fixed_clock());
    service.login("amir.k@example.com").unwrap();
    service.add_goal("Revise optics").unwrap();
    service.open_dashboard().unwrap();

    let raw = backend.get(APP_STATE_KEY).unwrap().unwrap();
    let payload: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(payload["isLoggedIn"], true);
    assert_eq!(payload["user"]["email"], "amir.k@example.com");
    assert_eq!(payload["chapterProgress"], 0.0);
    assert_eq!(
        payload["goals"][0]["id"].as_i64().unwrap(),
        FIXED_TEST_TIMESTAMP * 1000
    );
    assert_eq!(payload["goals"][0]["completed"], false);
    assert_eq!(payload["visits"][0], "2023-11-14");
}

#[test]
fn a_failing_backend_never_blocks_mutations() {
    let mut service = AppService::with_store(Arc::new(FailingStore), fixed_clock());
    service.login("amir.k@example.com").unwrap();
    let goal = service.add_goal("Revise optics").unwrap();
    let update = service.toggle_goal(goal.id).unwrap();
    assert!(update.toggle.completed);
    assert_eq!(service.progress().percent(), 100.0);

    let view = service.open_dashboard().unwrap();
    assert_eq!(view.streak, 1);
    assert_eq!(view.available_rewards, 3);
}
