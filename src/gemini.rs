//! Minimal Gemini client for our use-cases.
//!
//! We only call `generateContent` and request plain text. Calls are
//! instrumented and log model names, latencies, and response sizes (not
//! contents).
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::Prompts;
use crate::util::{fill_template, trunc_for_log};

/// The one user-visible string every gateway fault collapses into.
/// Indistinguishable in shape from a successful response.
pub const FALLBACK_TEXT: &str = "Error connecting to AI Coach.";

/// Returned when the service answers with an empty candidate list.
pub const UNAVAILABLE_TEXT: &str = "Analysis unavailable.";

/// The five assistance kinds recognized on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssistKind {
  Hint,
  FailureAnalysis,
  ComplexityReview,
  ResumeGeneration,
  ProjectReview,
}

impl AssistKind {
  /// Parse the wire identifier. Unknown kinds yield None; the caller
  /// resolves those to the fallback rather than raising.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "hint" => Some(AssistKind::Hint),
      "failure-analysis" => Some(AssistKind::FailureAnalysis),
      "complexity-review" => Some(AssistKind::ComplexityReview),
      "resume-generation" => Some(AssistKind::ResumeGeneration),
      "project-review" => Some(AssistKind::ProjectReview),
      _ => None,
    }
  }
}

/// One variant per request kind; each builds its prompt deterministically
/// from the carried context fields and nothing else.
#[derive(Clone, Debug)]
pub enum AssistRequest {
  Hint {
    title: String,
    description: String,
    code: String,
  },
  FailureAnalysis {
    description: String,
    code: String,
    error: String,
  },
  ComplexityReview {
    title: String,
    code: String,
  },
  ResumeGeneration {
    name: String,
    topics: Vec<String>,
    skills: Vec<String>,
  },
  ProjectReview {
    project_name: String,
    tech_stack: String,
    description: String,
  },
}

impl AssistRequest {
  pub fn kind(&self) -> AssistKind {
    match self {
      AssistRequest::Hint { .. } => AssistKind::Hint,
      AssistRequest::FailureAnalysis { .. } => AssistKind::FailureAnalysis,
      AssistRequest::ComplexityReview { .. } => AssistKind::ComplexityReview,
      AssistRequest::ResumeGeneration { .. } => AssistKind::ResumeGeneration,
      AssistRequest::ProjectReview { .. } => AssistKind::ProjectReview,
    }
  }

  /// Fill the configured template for this kind.
  pub fn prompt(&self, prompts: &Prompts) -> String {
    match self {
      AssistRequest::Hint { title, description, code } => fill_template(
        &prompts.hint_template,
        &[("title", title), ("description", description), ("code", code)],
      ),
      AssistRequest::FailureAnalysis { description, code, error } => fill_template(
        &prompts.failure_template,
        &[("error", error), ("code", code), ("description", description)],
      ),
      AssistRequest::ComplexityReview { title, code } => fill_template(
        &prompts.complexity_template,
        &[("title", title), ("code", code)],
      ),
      AssistRequest::ResumeGeneration { name, topics, skills } => fill_template(
        &prompts.resume_template,
        &[
          ("name", name),
          ("topics", &topics.join(", ")),
          ("skills", &skills.join(", ")),
        ],
      ),
      AssistRequest::ProjectReview { project_name, tech_stack, description } => fill_template(
        &prompts.project_template,
        &[
          ("project_name", project_name),
          ("tech_stack", tech_stack),
          ("description", description),
        ],
      ),
    }
  }
}

#[derive(Clone)]
pub struct Gemini {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl Gemini {
  /// Construct the client if we find GEMINI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("GEMINI_API_KEY").ok()?;
    let base_url = std::env::var("GEMINI_BASE_URL")
      .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into());
    let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-3-flash-preview".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, model })
  }

  /// The request URL. The API key travels in the `x-goog-api-key` header,
  /// never here: reqwest errors embed the URL in their Display output and
  /// those strings end up in the error log.
  fn endpoint(&self) -> String {
    format!("{}/models/{}:generateContent", self.base_url, self.model)
  }

  /// Plain-text generation. One request, no retries, no streaming.
  #[instrument(level = "info", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
  pub async fn generate(&self, prompt: &str) -> Result<String, String> {
    let req = GenerateContentRequest {
      contents: vec![Content { parts: vec![Part { text: prompt.to_string() }] }],
    };

    let start = std::time::Instant::now();
    let res = self
      .client
      .post(self.endpoint())
      .header(USER_AGENT, "ascope-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header("x-goog-api-key", &self.api_key)
      .json(&req)
      .send()
      .await
      .map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_gemini_error(&body).unwrap_or(body);
      return Err(format!("Gemini HTTP {}: {}", status, trunc_for_log(&msg, 300)));
    }

    let body: GenerateContentResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage_metadata {
      info!(
        prompt_tokens = ?usage.prompt_token_count,
        candidate_tokens = ?usage.candidates_token_count,
        total_tokens = ?usage.total_token_count,
        "Gemini usage"
      );
    }

    let text = body
      .candidates
      .into_iter()
      .next()
      .and_then(|c| c.content)
      .map(|c| {
        c.parts
          .into_iter()
          .filter_map(|p| p.text)
          .collect::<Vec<_>>()
          .join("")
      })
      .unwrap_or_default()
      .trim()
      .to_string();

    info!(elapsed = ?start.elapsed(), response_len = text.len(), "Gemini response received");
    Ok(text)
  }
}

/// The gateway boundary: (request, context) → text, always.
///
/// Any fault — missing client, network, auth, malformed response — collapses
/// into `FALLBACK_TEXT`; an empty candidate list becomes `UNAVAILABLE_TEXT`.
/// Callers never need an error branch.
#[instrument(level = "info", skip(gemini, prompts, req), fields(kind = ?req.kind()))]
pub async fn analyze(gemini: Option<&Gemini>, prompts: &Prompts, req: &AssistRequest) -> String {
  let Some(client) = gemini else {
    error!(target: "ascope_backend", kind = ?req.kind(), "GEMINI_API_KEY not set; returning fallback text");
    return FALLBACK_TEXT.to_string();
  };

  let prompt = req.prompt(prompts);
  match client.generate(&prompt).await {
    Ok(text) if text.is_empty() => UNAVAILABLE_TEXT.to_string(),
    Ok(text) => text,
    Err(e) => {
      error!(target: "ascope_backend", kind = ?req.kind(), error = %e, "Gemini call failed; returning fallback text");
      FALLBACK_TEXT.to_string()
    }
  }
}

// --- Wire DTOs ---

#[derive(Serialize)]
struct GenerateContentRequest {
  contents: Vec<Content>,
}
#[derive(Serialize)]
struct Content {
  parts: Vec<Part>,
}
#[derive(Serialize)]
struct Part {
  text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
  #[serde(default)]
  usage_metadata: Option<UsageMetadata>,
}
#[derive(Deserialize)]
struct Candidate {
  #[serde(default)]
  content: Option<CandidateContent>,
}
#[derive(Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<CandidatePart>,
}
#[derive(Deserialize)]
struct CandidatePart {
  #[serde(default)]
  text: Option<String>,
}
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
  #[serde(default)]
  prompt_token_count: Option<u32>,
  #[serde(default)]
  candidates_token_count: Option<u32>,
  #[serde(default)]
  total_token_count: Option<u32>,
}

/// Try to extract a clean error message from a Gemini error body.
fn extract_gemini_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap {
    error: EObj,
  }
  #[derive(Deserialize)]
  struct EObj {
    message: String,
  }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn assist_kind_parses_all_five_wire_names() {
    assert_eq!(AssistKind::parse("hint"), Some(AssistKind::Hint));
    assert_eq!(AssistKind::parse("failure-analysis"), Some(AssistKind::FailureAnalysis));
    assert_eq!(AssistKind::parse("complexity-review"), Some(AssistKind::ComplexityReview));
    assert_eq!(AssistKind::parse("resume-generation"), Some(AssistKind::ResumeGeneration));
    assert_eq!(AssistKind::parse("project-review"), Some(AssistKind::ProjectReview));
    assert_eq!(AssistKind::parse("unknown"), None);
  }

  #[test]
  fn request_url_never_carries_the_api_key() {
    let g = Gemini {
      client: reqwest::Client::new(),
      api_key: "sk-secret".into(),
      base_url: "https://example.test/v1beta".into(),
      model: "gemini-3-flash-preview".into(),
    };
    let url = g.endpoint();
    assert!(!url.contains("sk-secret"));
    assert!(!url.contains("key="));
    assert!(url.ends_with(":generateContent"));
  }

  #[test]
  fn hint_prompt_is_built_from_context_only() {
    let prompts = Prompts::default();
    let req = AssistRequest::Hint {
      title: "Two Sum".into(),
      description: "Find indices.".into(),
      code: "fn solve() {}".into(),
    };
    let p = req.prompt(&prompts);
    assert!(p.contains("Two Sum"));
    assert!(p.contains("Find indices."));
    assert!(p.contains("fn solve() {}"));
    // Deterministic: same context, same prompt.
    assert_eq!(p, req.prompt(&prompts));
  }

  #[test]
  fn resume_prompt_joins_topics_and_skills() {
    let prompts = Prompts::default();
    let req = AssistRequest::ResumeGeneration {
      name: "user".into(),
      topics: vec!["Arrays".into(), "Linked Lists".into()],
      skills: vec!["Logic Mapping".into()],
    };
    let p = req.prompt(&prompts);
    assert!(p.contains("Arrays, Linked Lists"));
    assert!(p.contains("Logic Mapping"));
  }

  #[tokio::test]
  async fn analyze_without_client_resolves_to_fallback() {
    let prompts = Prompts::default();
    let req = AssistRequest::ComplexityReview { title: "t".into(), code: "c".into() };
    let out = analyze(None, &prompts, &req).await;
    assert_eq!(out, FALLBACK_TEXT);
  }
}
