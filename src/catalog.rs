//! Seed data and the read-only catalog built from it.
//!
//! The built-in problems, phases, events, and the two fixed profiles keep
//! the app useful without any external config. Config-bank problems (TOML)
//! are appended after the seeds without overwriting existing ids.

use std::collections::HashMap;

use tracing::{error, info};
use uuid::Uuid;

use crate::config::ProblemCfg;
use crate::domain::{
  Difficulty, EventCategory, Phase, Problem, Role, User, UserEvent, VisualizationKind,
  WorkedExample,
};

/// Points granted the first time a problem is solved.
pub const POINT_AWARD: u32 = 100;

/// Minimal set of built-in practice problems.
pub fn seed_problems() -> Vec<Problem> {
  vec![
    Problem {
      id: "p1".into(),
      title: "Two Sum".into(),
      description: "Find indices of two numbers adding up to a target.".into(),
      topic: "Arrays".into(),
      difficulty: Difficulty::Easy,
      week: 1,
      constraints: vec!["2 <= nums.length <= 10^4".into()],
      examples: vec![WorkedExample {
        input: "nums = [2,7,11,15], target = 9".into(),
        output: "[0,1]".into(),
        explanation: None,
      }],
      visualization: Some(VisualizationKind::Array),
    },
    Problem {
      id: "p2".into(),
      title: "Validate BST".into(),
      description: "Determine if a binary tree is a valid Binary Search Tree (BST).".into(),
      topic: "Trees".into(),
      difficulty: Difficulty::Medium,
      week: 4,
      constraints: vec!["The number of nodes is in range [1, 10^4]".into()],
      examples: vec![WorkedExample {
        input: "root = [2,1,3]".into(),
        output: "true".into(),
        explanation: None,
      }],
      visualization: Some(VisualizationKind::Tree),
    },
    Problem {
      id: "p3".into(),
      title: "Edit Distance".into(),
      description: "Calculate minimum operations to convert word1 to word2.".into(),
      topic: "Dynamic Programming".into(),
      difficulty: Difficulty::Hard,
      week: 5,
      constraints: vec!["0 <= word1.length <= 500".into()],
      examples: vec![WorkedExample {
        input: "word1 = \"horse\", word2 = \"ros\"".into(),
        output: "3".into(),
        explanation: None,
      }],
      visualization: Some(VisualizationKind::DpTable),
    },
    Problem {
      id: "p4".into(),
      title: "Trapping Rain Water".into(),
      description: "Compute how much water can be trapped after raining.".into(),
      topic: "Arrays".into(),
      difficulty: Difficulty::Hard,
      week: 2,
      constraints: vec!["n == height.length".into(), "1 <= n <= 2 * 10^4".into()],
      examples: vec![WorkedExample {
        input: "height = [0,1,0,2,1,0,1,3,2,1,2,1]".into(),
        output: "6".into(),
        explanation: None,
      }],
      visualization: Some(VisualizationKind::Array),
    },
    Problem {
      id: "p5".into(),
      title: "Linked List Cycle".into(),
      description: "Determine if a linked list has a cycle in it.".into(),
      topic: "Linked Lists".into(),
      difficulty: Difficulty::Easy,
      week: 2,
      constraints: vec!["Number of nodes is [0, 10^4]".into()],
      examples: vec![WorkedExample {
        input: "head = [3,2,0,-4], pos = 1".into(),
        output: "true".into(),
        explanation: None,
      }],
      visualization: Some(VisualizationKind::Array),
    },
  ]
}

/// The fixed weekly curriculum. Week 5 ships locked.
pub fn seed_phases() -> Vec<Phase> {
  vec![
    Phase {
      week: 1,
      topic: "Sequential Structures".into(),
      description: "Arrays, Strings, and Sliding Window optimizations.".into(),
      locked: false,
    },
    Phase {
      week: 2,
      topic: "Non-linear Nodes".into(),
      description: "Linked Lists and Pointer-based manipulations.".into(),
      locked: false,
    },
    Phase {
      week: 3,
      topic: "Linear Constraints".into(),
      description: "Stacks, Queues, and Monotonic variants.".into(),
      locked: false,
    },
    Phase {
      week: 4,
      topic: "Hierarchy & Paths".into(),
      description: "Trees, Graphs, and Topological Sorts.".into(),
      locked: false,
    },
    Phase {
      week: 5,
      topic: "State Optimization".into(),
      description: "Dynamic Programming and Bitmask techniques.".into(),
      locked: true,
    },
  ]
}

/// The fixed external event listings.
pub fn seed_events() -> Vec<UserEvent> {
  vec![
    UserEvent {
      id: "e1".into(),
      category: EventCategory::Hackathon,
      title: "CodeSymphony 2025".into(),
      date: "March 15-17".into(),
      organizer: "TechCorp".into(),
      prize: "$5,000".into(),
    },
    UserEvent {
      id: "e2".into(),
      category: EventCategory::Hiring,
      title: "Data Structures Sprint".into(),
      date: "April 2".into(),
      organizer: "GlobalSoft".into(),
      prize: "Interview Call".into(),
    },
    UserEvent {
      id: "e3".into(),
      category: EventCategory::Codathon,
      title: "Binary Battle".into(),
      date: "March 22".into(),
      organizer: "College CS Dept".into(),
      prize: "Premium Dev Kit".into(),
    },
  ]
}

/// The fixed student profile selected by `login(Student)`.
pub fn student_profile() -> User {
  User {
    id: "u1".into(),
    name: "user".into(),
    email: "user@college.edu".into(),
    role: Role::Student,
    semester: 4,
    streak: 14,
    points: 1250,
    solved: vec!["p1".into(), "p5".into()],
    attempted: vec!["p2".into()],
    skills: vec![
      "Array Optimization".into(),
      "Logic Mapping".into(),
      "Swift Diagnostics".into(),
    ],
  }
}

/// The fixed admin profile selected by `login(Admin)`.
pub fn admin_profile() -> User {
  User {
    id: "u2".into(),
    name: "Dr. Sarah Smith".into(),
    email: "s.smith@college.edu".into(),
    role: Role::Admin,
    semester: 0,
    streak: 0,
    points: 0,
    solved: vec![],
    attempted: vec![],
    skills: vec![],
  }
}

/// Read-only catalogs shared by every session.
pub struct Catalog {
  pub problems: Vec<Problem>,
  by_id: HashMap<String, usize>,
  pub phases: Vec<Phase>,
  pub events: Vec<UserEvent>,
}

impl Catalog {
  /// Build from the built-in seeds plus any config-bank problems.
  /// Bank entries never overwrite a seeded id.
  pub fn build(bank: &[ProblemCfg]) -> Self {
    let mut problems = seed_problems();

    for cfg in bank {
      let id = cfg.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
      if problems.iter().any(|p| p.id == id) {
        error!(target: "ascope_backend", %id, "Skipping bank problem: id already seeded.");
        continue;
      }
      let title = match &cfg.title {
        Some(t) if !t.is_empty() => t.clone(),
        _ => {
          error!(target: "ascope_backend", %id, "Skipping bank problem: missing title.");
          continue;
        }
      };
      problems.push(Problem {
        id,
        title,
        description: cfg.description.clone().unwrap_or_default(),
        topic: cfg.topic.clone().unwrap_or_else(|| "General".into()),
        difficulty: cfg.difficulty.unwrap_or(Difficulty::Easy),
        week: cfg.week.unwrap_or(1),
        constraints: cfg.constraints.clone().unwrap_or_default(),
        examples: vec![],
        visualization: cfg.visualization,
      });
    }

    let by_id = problems
      .iter()
      .enumerate()
      .map(|(i, p)| (p.id.clone(), i))
      .collect();

    let cat = Self {
      problems,
      by_id,
      phases: seed_phases(),
      events: seed_events(),
    };
    info!(
      target: "ascope_backend",
      problems = cat.problems.len(),
      phases = cat.phases.len(),
      events = cat.events.len(),
      "Startup catalog inventory"
    );
    cat
  }

  pub fn problem(&self, id: &str) -> Option<&Problem> {
    self.by_id.get(id).map(|&i| &self.problems[i])
  }
}
