//! Domain models: users, problems, solutions, phases, events, and the
//! small enumerations shared by the session and workspace layers.

use serde::{Deserialize, Serialize};

/// Who is logged in? Role determines the reachable navigation tabs.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
  Student,
  Admin,
}

impl Role {
  /// Navigation tab ids legal for this role. The two menus are disjoint.
  pub fn nav_tabs(&self) -> &'static [&'static str] {
    match self {
      Role::Student => &["dashboard", "problems", "projects", "events", "rewards", "profile"],
      Role::Admin => &["admin-dashboard", "manage-problems", "student-roster"],
    }
  }

  /// Tab selected right after login.
  pub fn landing_tab(&self) -> &'static str {
    match self {
      Role::Student => "dashboard",
      Role::Admin => "admin-dashboard",
    }
  }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

/// Derived per problem from the user's solved/attempted sets; never stored.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProblemStatus {
  Unsolved,
  Attempted,
  Solved,
}

impl ProblemStatus {
  /// Solved takes precedence when an id sits in both sets.
  pub fn derive(problem_id: &str, solved: &[String], attempted: &[String]) -> Self {
    if solved.iter().any(|id| id == problem_id) {
      ProblemStatus::Solved
    } else if attempted.iter().any(|id| id == problem_id) {
      ProblemStatus::Attempted
    } else {
      ProblemStatus::Unsolved
    }
  }
}

/// Which illustrative visualization the workspace shows for a problem.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisualizationKind {
  Array,
  Tree,
  Graph,
  DpTable,
}

/// A worked example shipped with a problem statement.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkedExample {
  pub input: String,
  pub output: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub explanation: Option<String>,
}

/// Static catalog entry. Immutable for the session lifetime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Problem {
  pub id: String,
  pub title: String,
  pub description: String,
  pub topic: String,
  pub difficulty: Difficulty,
  pub week: u32,
  pub constraints: Vec<String>,
  pub examples: Vec<WorkedExample>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub visualization: Option<VisualizationKind>,
}

/// A fixed weekly curriculum unit. Locking is static content policy,
/// not derived from progress.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Phase {
  pub week: u32,
  pub topic: String,
  pub description: String,
  pub locked: bool,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventCategory {
  Hackathon,
  Ideathon,
  Codathon,
  Hiring,
}

/// A fixed external event listing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserEvent {
  pub id: String,
  pub category: EventCategory,
  pub title: String,
  pub date: String,
  pub organizer: String,
  pub prize: String,
}

/// The logged-in user. Persisted as one serialized blob; `solved` and
/// `attempted` may both contain the same id (display precedence: solved).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
  pub id: String,
  pub name: String,
  pub email: String,
  pub role: Role,
  pub semester: u32,
  pub streak: u32,
  pub points: u32,
  #[serde(default)]
  pub solved: Vec<String>,
  #[serde(default)]
  pub attempted: Vec<String>,
  #[serde(default)]
  pub skills: Vec<String>,
}

impl User {
  pub fn has_solved(&self, problem_id: &str) -> bool {
    self.solved.iter().any(|id| id == problem_id)
  }

  pub fn status_of(&self, problem_id: &str) -> ProblemStatus {
    ProblemStatus::derive(problem_id, &self.solved, &self.attempted)
  }
}

/// A named, user-authored code buffer tied to the open problem.
/// Multiple forks may coexist; exactly one is active at a time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Solution {
  pub id: String,
  pub name: String,
  pub code: String,
  pub language: String,
}

/// Ephemeral panel selection inside the open workspace.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
  Trace,
  Visualize,
  Analysis,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_prefers_solved_over_attempted() {
    let solved = vec!["p2".to_string()];
    let attempted = vec!["p2".to_string()];
    assert_eq!(ProblemStatus::derive("p2", &solved, &attempted), ProblemStatus::Solved);
  }

  #[test]
  fn status_falls_back_to_attempted_then_unsolved() {
    let solved = vec!["p1".to_string()];
    let attempted = vec!["p2".to_string()];
    assert_eq!(ProblemStatus::derive("p2", &solved, &attempted), ProblemStatus::Attempted);
    assert_eq!(ProblemStatus::derive("p9", &solved, &attempted), ProblemStatus::Unsolved);
  }

  #[test]
  fn role_menus_are_disjoint() {
    for t in Role::Student.nav_tabs() {
      assert!(!Role::Admin.nav_tabs().contains(t));
    }
  }
}
