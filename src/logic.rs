//! Core behaviors shared by the WebSocket loop and tests.
//!
//! This includes:
//!   - Dispatching workspace assistance requests (with the fallback path)
//!   - Resume generation and project review (session-level assist kinds)
//!   - Code submission (delegates to the session contract)
//!   - Catalog views through the session lens

use tracing::{info, instrument, warn};

use crate::gemini::{analyze, AssistKind, AssistRequest, FALLBACK_TEXT};
use crate::protocol::{problem_to_out, ProblemOut};
use crate::session::Session;
use crate::state::AppState;

/// Outcome of a workspace assist dispatch.
#[derive(Debug, PartialEq, Eq)]
pub enum AssistOutcome {
  /// Analysis text updated (success and fallback look the same).
  Applied,
  /// A request of this action was already in flight, or there is no open
  /// workspace; nothing changed.
  Suppressed,
}

/// Run an assistance action for the open workspace. The kind arrives as a
/// plain wire string; unrecognized kinds resolve to the fallback text
/// rather than raising. The loading sub-state is cleared on every path.
#[instrument(level = "info", skip(state, session))]
pub async fn run_workspace_assist(state: &AppState, session: &mut Session, kind: &str) -> AssistOutcome {
  let Some(ws) = session.workspace.as_mut() else {
    warn!(target: "workspace", %kind, "Assist requested with no open workspace");
    return AssistOutcome::Suppressed;
  };

  let req = match AssistKind::parse(kind) {
    Some(k) => match ws.begin_assist(k) {
      Some(req) => req,
      None => return AssistOutcome::Suppressed,
    },
    None => {
      // Still resolves: the fallback becomes the displayed analysis.
      warn!(target: "workspace", %kind, "Unrecognized assist kind; resolving to fallback");
      ws.finish_assist(FALLBACK_TEXT.to_string());
      return AssistOutcome::Applied;
    }
  };

  let text = analyze(state.gemini.as_ref(), &state.prompts, &req).await;

  // The workspace may have been replaced while the call was outstanding;
  // whoever is open now displays the result (last writer wins).
  if let Some(ws) = session.workspace.as_mut() {
    ws.finish_assist(text);
    AssistOutcome::Applied
  } else {
    info!(target: "workspace", %kind, "Workspace closed while assist was in flight; result discarded");
    AssistOutcome::Suppressed
  }
}

/// Build the resume-generation request from the user's solved topics and
/// declared skills, then run it. None while logged out.
#[instrument(level = "info", skip(state, session))]
pub async fn generate_resume(state: &AppState, session: &Session) -> Option<String> {
  let user = session.user()?;

  let mut topics: Vec<String> = Vec::new();
  for id in &user.solved {
    if let Some(p) = state.catalog.problem(id) {
      if !topics.contains(&p.topic) {
        topics.push(p.topic.clone());
      }
    }
  }

  let req = AssistRequest::ResumeGeneration {
    name: user.name.clone(),
    topics,
    skills: user.skills.clone(),
  };
  Some(analyze(state.gemini.as_ref(), &state.prompts, &req).await)
}

/// Run a project review. Needs no session state beyond being an action the
/// projects tab offers.
pub async fn review_project(
  state: &AppState,
  name: String,
  tech_stack: String,
  description: String,
) -> String {
  let req = AssistRequest::ProjectReview {
    project_name: name,
    tech_stack,
    description,
  };
  analyze(state.gemini.as_ref(), &state.prompts, &req).await
}

/// Submit the given code for the open problem: the text lands in the
/// active buffer, the session contract records the solve, the workspace
/// closes. Returns Some(awarded) when a workspace was open.
#[instrument(level = "info", skip(session, code), fields(code_len = code.len()))]
pub fn submit_code(session: &mut Session, code: String) -> Option<bool> {
  let problem_id = {
    let ws = session.workspace.as_mut()?;
    ws.edit_active(code);
    ws.problem.id.clone()
  };
  Some(session.submit_problem(&problem_id))
}

/// The problem catalog with each entry's per-user derived status.
pub fn problems_for(state: &AppState, session: &Session) -> Vec<ProblemOut> {
  state
    .catalog
    .problems
    .iter()
    .map(|p| problem_to_out(p, session.user()))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{ProblemStatus, Role};
  use crate::gemini::UNAVAILABLE_TEXT;
  use crate::session::Session;
  use crate::store::SessionBlobStore;

  fn test_state() -> AppState {
    AppState {
      catalog: crate::catalog::Catalog::build(&[]),
      prompts: crate::config::Prompts::default(),
      gemini: None, // every assist resolves to the fallback
      store: SessionBlobStore::new("/nonexistent/never-written.json"),
    }
  }

  fn student_session(dir: &tempfile::TempDir) -> Session {
    let store = SessionBlobStore::new(dir.path().join("session.json"));
    let mut s = Session::new(store);
    s.login(Role::Student);
    s
  }

  #[tokio::test]
  async fn unrecognized_assist_kind_resolves_to_fallback() {
    let state = test_state();
    let dir = tempfile::TempDir::new().unwrap();
    let mut session = student_session(&dir);
    session.open_problem(state.catalog.problem("p1").unwrap().clone());

    let outcome = run_workspace_assist(&state, &mut session, "unknown").await;
    assert_eq!(outcome, AssistOutcome::Applied);
    let ws = session.workspace.as_ref().unwrap();
    assert_eq!(ws.analysis.as_deref(), Some(FALLBACK_TEXT));
    assert!(!ws.loading);
  }

  #[tokio::test]
  async fn assist_without_open_workspace_is_suppressed() {
    let state = test_state();
    let dir = tempfile::TempDir::new().unwrap();
    let mut session = student_session(&dir);
    let outcome = run_workspace_assist(&state, &mut session, "hint").await;
    assert_eq!(outcome, AssistOutcome::Suppressed);
  }

  #[tokio::test]
  async fn hint_without_client_still_lands_in_the_analysis_panel() {
    let state = test_state();
    let dir = tempfile::TempDir::new().unwrap();
    let mut session = student_session(&dir);
    session.open_problem(state.catalog.problem("p2").unwrap().clone());

    let outcome = run_workspace_assist(&state, &mut session, "hint").await;
    assert_eq!(outcome, AssistOutcome::Applied);
    let ws = session.workspace.as_ref().unwrap();
    assert_eq!(ws.analysis.as_deref(), Some(FALLBACK_TEXT));
    assert_eq!(ws.active_panel, crate::domain::PanelKind::Analysis);
    assert_ne!(ws.analysis.as_deref(), Some(UNAVAILABLE_TEXT));
  }

  #[tokio::test]
  async fn resume_generation_requires_a_session() {
    let state = test_state();
    let dir = tempfile::TempDir::new().unwrap();
    let store = SessionBlobStore::new(dir.path().join("session.json"));
    let session = Session::new(store);
    assert!(generate_resume(&state, &session).await.is_none());
  }

  #[test]
  fn submit_code_records_the_open_problem() {
    let state = test_state();
    let dir = tempfile::TempDir::new().unwrap();
    let mut session = student_session(&dir);
    session.open_problem(state.catalog.problem("p3").unwrap().clone());

    let awarded = submit_code(&mut session, "solution text".into());
    assert_eq!(awarded, Some(true));
    assert!(session.workspace.is_none());
    assert_eq!(session.user().unwrap().points, 1350);

    // No workspace open: nothing to submit.
    assert_eq!(submit_code(&mut session, "again".into()), None);
  }

  #[test]
  fn problems_view_carries_derived_statuses() {
    let state = test_state();
    let dir = tempfile::TempDir::new().unwrap();
    let session = student_session(&dir);

    let out = problems_for(&state, &session);
    assert_eq!(out.len(), 5);
    let status_of = |id: &str| {
      out.iter().find(|p| p.problem.id == id).map(|p| p.status).unwrap()
    };
    assert_eq!(status_of("p1"), ProblemStatus::Solved);
    assert_eq!(status_of("p2"), ProblemStatus::Attempted);
    assert_eq!(status_of("p3"), ProblemStatus::Unsolved);
  }
}
