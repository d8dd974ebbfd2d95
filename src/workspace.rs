//! The problem workspace: per-open-problem editable code buffers, panel
//! selection, and the illustrative execution trace.
//!
//! Lifecycle is closed → open → closed; at most one workspace exists per
//! session, and opening a second problem replaces the first. While open,
//! the workspace keeps at least one solution and exactly one active one.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::domain::{PanelKind, Problem, Solution};
use crate::gemini::{AssistKind, AssistRequest};

/// The synthetic diagnostic attached to failure-analysis requests.
/// There is no real executor; this stands in for a runtime report.
const SYNTHETIC_DIAGNOSTIC: &str =
  "Runtime Performance Alert: Complexity threshold exceeded on large datasets";

const SEED_PRIMARY: &str = "// Optimized Approach: Hash Map mapping for O(N)\nfunction solve(nums, target) {\n  const map = new Map();\n  for (let i = 0; i < nums.length; i++) {\n    const complement = target - nums[i];\n    if (map.has(complement)) return [map.get(complement), i];\n    map.set(nums[i], i);\n  }\n}";

const SEED_SECONDARY: &str = "// Brute Force: Iterative checking O(N^2)\nfunction solve(nums, target) {\n  for(let i=0; i<nums.length; i++) {\n    for(let j=i+1; j<nums.length; j++) {\n       if(nums[i] + nums[j] === target) return [i, j];\n    }\n  }\n}";

/// One illustrative step on the execution timeline panel.
#[derive(Clone, Debug, Serialize)]
pub struct TraceStep {
  pub id: String,
  pub at_ms: u32,
  pub line: u32,
  pub scope: String,
}

pub struct Workspace {
  pub problem: Problem,
  solutions: Vec<Solution>,
  active_id: String,
  pub active_panel: PanelKind,
  pub loading: bool,
  pub analysis: Option<String>,
  pub trace: Vec<TraceStep>,
}

impl Workspace {
  /// Open a workspace for `problem`, seeded with the two illustrative
  /// solutions. The primary buffer starts active.
  #[instrument(level = "info", skip(problem), fields(problem = %problem.id))]
  pub fn open(problem: Problem) -> Self {
    let solutions = vec![
      Solution {
        id: "sol-1".into(),
        name: "Primary Logic".into(),
        code: SEED_PRIMARY.into(),
        language: "javascript".into(),
      },
      Solution {
        id: "sol-2".into(),
        name: "Secondary Approach".into(),
        code: SEED_SECONDARY.into(),
        language: "javascript".into(),
      },
    ];
    let trace = illustrative_trace();
    info!(target: "workspace", problem = %problem.id, "Workspace opened");
    Self {
      problem,
      solutions,
      active_id: "sol-1".into(),
      active_panel: PanelKind::Trace,
      loading: false,
      analysis: None,
      trace,
    }
  }

  pub fn solutions(&self) -> &[Solution] {
    &self.solutions
  }

  pub fn active_solution(&self) -> &Solution {
    // Invariant: active_id always names an element of solutions.
    self
      .solutions
      .iter()
      .find(|s| s.id == self.active_id)
      .unwrap_or(&self.solutions[0])
  }

  /// Change which solution is active. Unknown ids are a silent no-op.
  #[instrument(level = "debug", skip(self))]
  pub fn switch_active(&mut self, id: &str) {
    if self.solutions.iter().any(|s| s.id == id) {
      self.active_id = id.to_string();
    } else {
      warn!(target: "workspace", %id, "Ignoring switch to unknown solution");
    }
  }

  /// Replace the active solution's source text.
  pub fn edit_active(&mut self, code: String) {
    let id = self.active_id.clone();
    if let Some(sol) = self.solutions.iter_mut().find(|s| s.id == id) {
      sol.code = code;
    }
  }

  /// Create a new solution seeded with the active buffer's current text,
  /// name it by running count, and make it active.
  #[instrument(level = "info", skip(self))]
  pub fn fork(&mut self) -> &Solution {
    let id = format!("sol-{}", self.solutions.len() + 1);
    let name = format!("Fork {}", self.solutions.len());
    let src = self.active_solution();
    let forked = Solution {
      id: id.clone(),
      name,
      code: src.code.clone(),
      language: src.language.clone(),
    };
    self.solutions.push(forked);
    self.active_id = id;
    debug!(target: "workspace", total = self.solutions.len(), "Forked active solution");
    self.active_solution()
  }

  pub fn set_panel(&mut self, panel: PanelKind) {
    self.active_panel = panel;
  }

  /// Start an assistance request of the given kind. Returns the request to
  /// dispatch, or None when one is already outstanding (duplicate
  /// suppressed) or the kind is not a workspace action.
  #[instrument(level = "info", skip(self), fields(problem = %self.problem.id))]
  pub fn begin_assist(&mut self, kind: AssistKind) -> Option<AssistRequest> {
    if self.loading {
      warn!(target: "workspace", ?kind, "Assist already in flight; suppressing duplicate");
      return None;
    }
    let req = match kind {
      AssistKind::Hint => AssistRequest::Hint {
        title: self.problem.title.clone(),
        description: self.problem.description.clone(),
        code: self.active_solution().code.clone(),
      },
      AssistKind::FailureAnalysis => AssistRequest::FailureAnalysis {
        description: self.problem.description.clone(),
        code: self.active_solution().code.clone(),
        error: SYNTHETIC_DIAGNOSTIC.into(),
      },
      AssistKind::ComplexityReview => AssistRequest::ComplexityReview {
        title: self.problem.title.clone(),
        code: self.active_solution().code.clone(),
      },
      _ => {
        warn!(target: "workspace", ?kind, "Kind is not a workspace action");
        return None;
      }
    };
    self.loading = true;
    Some(req)
  }

  /// Apply the gateway's response: the text (success or fallback alike)
  /// becomes the displayed analysis, the analysis panel is auto-selected,
  /// and the loading sub-state always clears. Last writer wins.
  pub fn finish_assist(&mut self, text: String) {
    self.analysis = Some(text);
    self.active_panel = PanelKind::Analysis;
    self.loading = false;
  }
}

/// Hardcoded/random illustrative timeline, regenerated per open.
/// Not a real interpreter: figures are decorative.
fn illustrative_trace() -> Vec<TraceStep> {
  let mut rng = rand::thread_rng();
  (1..=5u32)
    .map(|step| TraceStep {
      id: format!("t{}", step),
      at_ms: step * rng.gen_range(1..=3),
      line: step + 2,
      scope: format!("map[{}] = {}", rng.gen_range(0..=9), step - 1),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::seed_problems;

  fn open_p1() -> Workspace {
    let problem = seed_problems().into_iter().next().expect("p1 seeded");
    Workspace::open(problem)
  }

  #[test]
  fn opens_with_two_seeded_solutions_and_primary_active() {
    let ws = open_p1();
    assert_eq!(ws.solutions().len(), 2);
    assert_eq!(ws.active_solution().id, "sol-1");
    assert_eq!(ws.active_panel, PanelKind::Trace);
  }

  #[test]
  fn fork_copies_the_active_text_at_the_moment_of_forking() {
    let mut ws = open_p1();
    ws.edit_active("let answer = 42;".into());
    let before = ws.solutions().len();
    let forked_id = ws.fork().id.clone();
    assert_eq!(ws.solutions().len(), before + 1);
    assert_eq!(ws.active_solution().id, forked_id);
    assert_eq!(ws.active_solution().code, "let answer = 42;");
    assert_eq!(ws.active_solution().name, "Fork 2");
  }

  #[test]
  fn switch_to_unknown_solution_is_a_no_op() {
    let mut ws = open_p1();
    ws.switch_active("sol-2");
    assert_eq!(ws.active_solution().id, "sol-2");
    ws.switch_active("sol-99");
    assert_eq!(ws.active_solution().id, "sol-2");
  }

  #[test]
  fn edit_replaces_only_the_active_buffer() {
    let mut ws = open_p1();
    ws.edit_active("changed".into());
    assert_eq!(ws.active_solution().code, "changed");
    ws.switch_active("sol-2");
    assert!(ws.active_solution().code.contains("Brute Force"));
  }

  #[test]
  fn duplicate_assist_is_suppressed_while_loading() {
    let mut ws = open_p1();
    assert!(ws.begin_assist(AssistKind::Hint).is_some());
    assert!(ws.loading);
    assert!(ws.begin_assist(AssistKind::Hint).is_none());
    ws.finish_assist("done".into());
    assert!(!ws.loading);
    assert_eq!(ws.active_panel, PanelKind::Analysis);
    assert_eq!(ws.analysis.as_deref(), Some("done"));
    // Cleared loading means a new request goes out again.
    assert!(ws.begin_assist(AssistKind::Hint).is_some());
  }

  #[test]
  fn failure_analysis_carries_the_synthetic_diagnostic() {
    let mut ws = open_p1();
    match ws.begin_assist(AssistKind::FailureAnalysis) {
      Some(AssistRequest::FailureAnalysis { error, .. }) => {
        assert!(error.contains("Complexity threshold exceeded"));
      }
      other => panic!("unexpected request: {:?}", other),
    }
  }
}
