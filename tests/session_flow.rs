//! End-to-end session scenarios driven through the core logic layer,
//! exactly as the WebSocket loop drives it.

use ascope_backend::catalog::Catalog;
use ascope_backend::config::Prompts;
use ascope_backend::domain::{ProblemStatus, Role};
use ascope_backend::gemini::FALLBACK_TEXT;
use ascope_backend::logic::{run_workspace_assist, submit_code};
use ascope_backend::session::Session;
use ascope_backend::state::AppState;
use ascope_backend::store::SessionBlobStore;

fn test_state(dir: &tempfile::TempDir) -> AppState {
    AppState {
        catalog: Catalog::build(&[]),
        prompts: Prompts::default(),
        gemini: None,
        store: SessionBlobStore::new(dir.path().join("session.json")),
    }
}

#[test]
fn student_submission_flow_awards_once_and_closes_the_workspace() {
    let dir = tempfile::TempDir::new().unwrap();
    let state = test_state(&dir);
    let mut session = Session::new(state.store.clone());

    session.login(Role::Student);
    assert_eq!(session.active_tab(), "dashboard");
    assert_eq!(session.user().unwrap().points, 1250);

    // Open an unsolved problem and submit code for it.
    session.open_problem(state.catalog.problem("p3").unwrap().clone());
    let awarded = submit_code(&mut session, "fn solve() { /* dp */ }".into());
    assert_eq!(awarded, Some(true));

    let user = session.user().unwrap();
    assert_eq!(user.points, 1350);
    assert!(user.solved.iter().any(|id| id == "p3"));
    assert!(session.workspace.is_none());

    // Resubmitting the same problem does not double-award.
    session.open_problem(state.catalog.problem("p3").unwrap().clone());
    let awarded = submit_code(&mut session, "fn solve() {}".into());
    assert_eq!(awarded, Some(false));
    assert_eq!(session.user().unwrap().points, 1350);
}

#[test]
fn submission_survives_a_restart_through_the_persisted_blob() {
    let dir = tempfile::TempDir::new().unwrap();
    let state = test_state(&dir);

    {
        let mut session = Session::new(state.store.clone());
        session.login(Role::Student);
        session.open_problem(state.catalog.problem("p4").unwrap().clone());
        submit_code(&mut session, "two pointers".into());
    }

    // Fresh connection, same blob.
    let mut session = Session::new(state.store.clone());
    assert!(session.restore());
    let user = session.user().unwrap();
    assert_eq!(user.points, 1350);
    assert_eq!(user.status_of("p4"), ProblemStatus::Solved);
    assert!(session.workspace.is_none());
}

#[test]
fn admin_lands_on_the_admin_dashboard_and_cannot_reach_student_tabs() {
    let dir = tempfile::TempDir::new().unwrap();
    let state = test_state(&dir);
    let mut session = Session::new(state.store.clone());

    session.login(Role::Admin);
    assert_eq!(session.active_tab(), "admin-dashboard");

    for tab in ["dashboard", "problems", "projects", "events", "rewards", "profile"] {
        session.set_active_tab(tab);
        assert_eq!(session.active_tab(), "admin-dashboard", "student tab {tab} must be unreachable");
    }

    session.set_active_tab("manage-problems");
    assert_eq!(session.active_tab(), "manage-problems");
}

#[tokio::test]
async fn assist_resolves_to_the_fallback_without_a_configured_client() {
    let dir = tempfile::TempDir::new().unwrap();
    let state = test_state(&dir);
    let mut session = Session::new(state.store.clone());

    session.login(Role::Student);
    session.open_problem(state.catalog.problem("p1").unwrap().clone());

    // Recognized and unrecognized kinds both resolve without raising.
    run_workspace_assist(&state, &mut session, "hint").await;
    assert_eq!(
        session.workspace.as_ref().unwrap().analysis.as_deref(),
        Some(FALLBACK_TEXT)
    );
    run_workspace_assist(&state, &mut session, "definitely-not-a-kind").await;
    assert_eq!(
        session.workspace.as_ref().unwrap().analysis.as_deref(),
        Some(FALLBACK_TEXT)
    );
    assert!(!session.workspace.as_ref().unwrap().loading);
}

#[test]
fn logout_clears_the_blob_and_relogin_restores_the_fixed_profile() {
    let dir = tempfile::TempDir::new().unwrap();
    let state = test_state(&dir);
    let mut session = Session::new(state.store.clone());

    session.login(Role::Student);
    session.open_problem(state.catalog.problem("p2").unwrap().clone());
    submit_code(&mut session, "in-order check".into());
    session.logout();

    // The blob is gone: a fresh session restores nothing.
    let mut fresh = Session::new(state.store.clone());
    assert!(!fresh.restore());

    fresh.login(Role::Student);
    let user = fresh.user().unwrap();
    assert_eq!(user.points, 1250);
    assert_eq!(user.solved, vec!["p1".to_string(), "p5".to_string()]);
    assert!(fresh.workspace.is_none());
}
