//! Presentational view builders: pure functions of (user, catalogs,
//! transient sort keys) → DTOs. No durable state lives here.
//!
//! Figures on the admin side are fixed mock analytics; there is no real
//! roster or submission log behind them.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::{Phase, User};

/// Student landing view: headline counters plus the curriculum roadmap.
#[derive(Clone, Debug, Serialize)]
pub struct StudentOverview {
  pub level: u32,
  pub streak: u32,
  pub resolved: usize,
  pub points: u32,
  pub phases: Vec<Phase>,
}

pub fn student_overview(user: &User, catalog: &Catalog) -> StudentOverview {
  StudentOverview {
    level: user.points / 500,
    streak: user.streak,
    resolved: user.solved.len(),
    points: user.points,
    phases: catalog.phases.clone(),
  }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardKey {
  Resolved,
  Streak,
}

#[derive(Clone, Debug, Serialize)]
pub struct LeaderboardEntry {
  pub rank: usize,
  pub name: String,
  pub resolved: usize,
  pub streak: u32,
  pub is_me: bool,
}

// The rewards boards rank the current user against a fixed peer set.
const PEERS: [(&str, usize, u32); 3] = [
  ("Sarah Chen", 142, 45),
  ("Marcus Aurelius", 128, 12),
  ("Emily White", 95, 30),
];

pub fn leaderboard(user: &User, key: LeaderboardKey) -> Vec<LeaderboardEntry> {
  let mut rows: Vec<(String, usize, u32, bool)> = PEERS
    .iter()
    .map(|(name, resolved, streak)| (name.to_string(), *resolved, *streak, false))
    .collect();
  rows.push(("You".to_string(), user.solved.len(), user.streak, true));

  match key {
    LeaderboardKey::Resolved => rows.sort_by(|a, b| b.1.cmp(&a.1)),
    LeaderboardKey::Streak => rows.sort_by(|a, b| b.2.cmp(&a.2)),
  }

  rows
    .into_iter()
    .enumerate()
    .map(|(i, (name, resolved, streak, is_me))| LeaderboardEntry {
      rank: i + 1,
      name,
      resolved,
      streak,
      is_me,
    })
    .collect()
}

#[derive(Clone, Debug, Serialize)]
pub struct WeekActivity {
  pub week: String,
  pub submissions: u32,
  pub completions: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct TopicShare {
  pub name: String,
  pub value: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct TopStudent {
  pub name: String,
  pub semester: u32,
  pub solved: u32,
  pub success_rate: String,
  pub last_active: String,
}

/// Admin analytics hub, served as plain data for the charting widgets.
#[derive(Clone, Debug, Serialize)]
pub struct AdminOverview {
  pub total_students: u32,
  pub week_submissions: u32,
  pub avg_success_rate: u32,
  pub active_phase: String,
  pub weekly_activity: Vec<WeekActivity>,
  pub topic_distribution: Vec<TopicShare>,
  pub top_students: Vec<TopStudent>,
}

pub fn admin_overview() -> AdminOverview {
  let week = |w: &str, s: u32, c: u32| WeekActivity {
    week: w.into(),
    submissions: s,
    completions: c,
  };
  let topic = |n: &str, v: u32| TopicShare { name: n.into(), value: v };
  let student = |n: &str, sem: u32, solved: u32, rate: &str, last: &str| TopStudent {
    name: n.into(),
    semester: sem,
    solved,
    success_rate: rate.into(),
    last_active: last.into(),
  };

  AdminOverview {
    total_students: 1248,
    week_submissions: 8421,
    avg_success_rate: 74,
    active_phase: "Phase 3".into(),
    weekly_activity: vec![
      week("W1", 450, 380),
      week("W2", 520, 410),
      week("W3", 310, 290),
      week("W4", 0, 0),
    ],
    topic_distribution: vec![
      topic("Arrays", 400),
      topic("Strings", 300),
      topic("Linked Lists", 200),
      topic("Stacks", 150),
    ],
    top_students: vec![
      student("John Doe", 4, 18, "92%", "2h ago"),
      student("Emily Chen", 6, 22, "88%", "5m ago"),
      student("Marcus Aurelius", 4, 15, "95%", "1d ago"),
      student("Sarah Connor", 6, 25, "79%", "12m ago"),
    ],
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::student_profile;

  #[test]
  fn overview_derives_level_from_points() {
    let cat = Catalog::build(&[]);
    let view = student_overview(&student_profile(), &cat);
    assert_eq!(view.level, 2); // 1250 / 500
    assert_eq!(view.resolved, 2);
    assert_eq!(view.phases.len(), 5);
  }

  #[test]
  fn leaderboard_ranks_by_requested_key_and_includes_me() {
    let user = student_profile();

    let by_resolved = leaderboard(&user, LeaderboardKey::Resolved);
    assert_eq!(by_resolved[0].name, "Sarah Chen");
    assert_eq!(by_resolved.last().map(|e| e.is_me), Some(true));
    assert!(by_resolved.windows(2).all(|w| w[0].resolved >= w[1].resolved));

    let by_streak = leaderboard(&user, LeaderboardKey::Streak);
    assert_eq!(by_streak[0].name, "Sarah Chen"); // 45-day streak leads
    assert!(by_streak.windows(2).all(|w| w[0].streak >= w[1].streak));
    // The 14-day student outranks the 12-day peer on this board.
    let me = by_streak.iter().position(|e| e.is_me).unwrap();
    let marcus = by_streak.iter().position(|e| e.name == "Marcus Aurelius").unwrap();
    assert!(me < marcus);
  }

  #[test]
  fn admin_overview_is_stable_mock_data() {
    let view = admin_overview();
    assert_eq!(view.total_students, 1248);
    assert_eq!(view.weekly_activity.len(), 4);
    assert_eq!(view.topic_distribution.len(), 4);
    assert_eq!(view.top_students.len(), 4);
  }
}
