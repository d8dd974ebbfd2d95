//! The owned session context threaded through the view layer: current
//! user, active tab, and the optional open workspace.
//!
//! There is no ambient global — each connection owns one `Session` and the
//! handlers receive it explicitly. Authentication sits behind the
//! `ProfileProvider` seam; the only implementation selects one of the two
//! fixed profiles.

use tracing::{info, instrument, warn};

use crate::catalog::{admin_profile, student_profile, POINT_AWARD};
use crate::domain::{Problem, ProblemStatus, Role, User};
use crate::store::SessionBlobStore;
use crate::workspace::Workspace;

/// Maps a role to the profile it logs in as. Login has no failure path:
/// every role resolves to a profile.
pub trait ProfileProvider: Send + Sync {
  fn profile(&self, role: Role) -> User;
}

/// The two fixed profiles (student, admin).
pub struct FixedProfiles;

impl ProfileProvider for FixedProfiles {
  fn profile(&self, role: Role) -> User {
    match role {
      Role::Student => student_profile(),
      Role::Admin => admin_profile(),
    }
  }
}

pub struct Session {
  user: Option<User>,
  active_tab: String,
  pub workspace: Option<Workspace>,
  store: SessionBlobStore,
  profiles: Box<dyn ProfileProvider>,
}

impl Session {
  pub fn new(store: SessionBlobStore) -> Self {
    Self::with_provider(store, Box::new(FixedProfiles))
  }

  pub fn with_provider(store: SessionBlobStore, profiles: Box<dyn ProfileProvider>) -> Self {
    Self {
      user: None,
      active_tab: String::new(),
      workspace: None,
      store,
      profiles,
    }
  }

  pub fn user(&self) -> Option<&User> {
    self.user.as_ref()
  }

  pub fn active_tab(&self) -> &str {
    &self.active_tab
  }

  /// Read the persisted blob once, at client startup. Missing or corrupt
  /// blobs leave the session logged out.
  #[instrument(level = "info", skip(self))]
  pub fn restore(&mut self) -> bool {
    match self.store.load() {
      Some(user) => {
        self.active_tab = user.role.landing_tab().to_string();
        self.user = Some(user);
        true
      }
      None => false,
    }
  }

  /// Select the fixed profile for `role`, persist it, and land on the
  /// role's default tab. Replaces any previous session state.
  #[instrument(level = "info", skip(self))]
  pub fn login(&mut self, role: Role) {
    let user = self.profiles.profile(role);
    self.store.save(&user);
    self.active_tab = role.landing_tab().to_string();
    self.workspace = None;
    info!(target: "session", user = %user.id, ?role, "Logged in");
    self.user = Some(user);
  }

  /// Clear the session and the persisted blob. No-op when logged out.
  #[instrument(level = "info", skip(self))]
  pub fn logout(&mut self) {
    if self.user.is_none() {
      return;
    }
    self.user = None;
    self.active_tab.clear();
    self.workspace = None;
    self.store.clear();
    info!(target: "session", "Logged out");
  }

  /// Switch the active tab. Only ids in the role's navigation set are
  /// accepted; anything else (including while logged out) is a no-op.
  /// Switching never touches the open workspace.
  pub fn set_active_tab(&mut self, tab: &str) {
    match &self.user {
      Some(user) if user.role.nav_tabs().contains(&tab) => {
        self.active_tab = tab.to_string();
      }
      Some(user) => {
        warn!(target: "session", %tab, role = ?user.role, "Ignoring unreachable tab");
      }
      None => {
        warn!(target: "session", %tab, "Ignoring tab switch while logged out");
      }
    }
  }

  /// Open the workspace on `problem`. An already open workspace is
  /// implicitly replaced; at most one exists at a time.
  pub fn open_problem(&mut self, problem: Problem) {
    self.workspace = Some(Workspace::open(problem));
  }

  pub fn close_workspace(&mut self) {
    self.workspace = None;
  }

  /// Record a submission for `problem_id`: first solve gains the id and a
  /// fixed point award and re-persists the full blob; resubmission leaves
  /// the user unchanged. The open workspace closes either way.
  /// Returns whether new credit was granted.
  #[instrument(level = "info", skip(self))]
  pub fn submit_problem(&mut self, problem_id: &str) -> bool {
    let awarded = match &mut self.user {
      Some(user) if !user.has_solved(problem_id) => {
        user.solved.push(problem_id.to_string());
        user.points += POINT_AWARD;
        self.store.save(user);
        info!(target: "session", %problem_id, points = user.points, "Submission credited");
        true
      }
      Some(_) => {
        info!(target: "session", %problem_id, "Already solved; no new credit");
        false
      }
      None => false,
    };
    self.workspace = None;
    awarded
  }

  /// Derived status for a catalog problem; logged out means unsolved.
  pub fn problem_status(&self, problem_id: &str) -> ProblemStatus {
    self
      .user
      .as_ref()
      .map(|u| u.status_of(problem_id))
      .unwrap_or(ProblemStatus::Unsolved)
  }
}
