//! Loading application configuration (prompt templates + optional problem
//! bank) from TOML.
//!
//! See `AppConfig` and `Prompts` for the expected schema.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{Difficulty, VisualizationKind};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub problems: Vec<ProblemCfg>,
}

/// Problem entry accepted in TOML configuration. Everything except the
/// title is optional; worked examples are seed-only content.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct ProblemCfg {
  #[serde(default)] pub id: Option<String>,
  #[serde(default)] pub title: Option<String>,
  #[serde(default)] pub description: Option<String>,
  #[serde(default)] pub topic: Option<String>,
  #[serde(default)] pub difficulty: Option<Difficulty>,
  #[serde(default)] pub week: Option<u32>,
  #[serde(default)] pub constraints: Option<Vec<String>>,
  #[serde(default)] pub visualization: Option<VisualizationKind>,
}

/// Prompt templates used by the AI gateway, one per request kind.
/// Defaults match the coach persona; override in TOML to tune tone.
/// Placeholders are filled with `util::fill_template`.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub hint_template: String,
  pub failure_template: String,
  pub complexity_template: String,
  pub resume_template: String,
  pub project_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      hint_template: "Act as a senior CP coach. Give a subtle hint for \"{title}\". Problem: {description}. Current code: {code}.".into(),
      failure_template: "Analyze why this code failed. Error: {error}. Code: {code}. Problem: {description}.".into(),
      complexity_template: "Review the time and space complexity of this solution to \"{title}\". Code: {code}. State the dominant term and one concrete improvement.".into(),
      resume_template: "Create a professional 'Technical Analyst Profile' for a student named {name}. They have solved problems in topics: {topics}. Their skills include: {skills}. Write a compelling 2-sentence summary and a bulleted list of technical achievements based on these DSA skills.".into(),
      project_template: "Evaluate this student project: Name: {project_name}, Stack: {tech_stack}. Description: {description}. Provide a 'Structural Score' (1-100) and 3 bullet points of critical diagnostic feedback for improvement.".into(),
    }
  }
}

/// Attempt to load `AppConfig` from ASCOPE_CONFIG_PATH. On any parsing/IO
/// error, returns None and the caller falls back to defaults.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("ASCOPE_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "ascope_backend", %path, "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "ascope_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "ascope_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn prompts_parse_partially_from_toml() {
    let cfg: AppConfig = toml::from_str(
      r#"
      [[problems]]
      title = "Matrix Rotation"
      topic = "Arrays"
      week = 3
      "#,
    )
    .expect("valid toml");
    assert_eq!(cfg.problems.len(), 1);
    assert_eq!(cfg.problems[0].title.as_deref(), Some("Matrix Rotation"));
    // Untouched prompt sections fall back to defaults.
    assert!(cfg.prompts.hint_template.contains("senior CP coach"));
  }
}
