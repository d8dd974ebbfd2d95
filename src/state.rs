//! Shared application state: read-only catalogs, prompt templates, the
//! optional Gemini client, and the session blob store handle.
//!
//! Nothing mutable lives here — per-connection mutable state is the owned
//! `Session` each WebSocket handler threads through its own loop.

use tracing::{info, instrument};

use crate::catalog::Catalog;
use crate::config::{load_app_config_from_env, Prompts};
use crate::gemini::Gemini;
use crate::store::SessionBlobStore;

pub struct AppState {
  pub catalog: Catalog,
  pub prompts: Prompts,
  pub gemini: Option<Gemini>,
  pub store: SessionBlobStore,
}

impl AppState {
  /// Build state from env: load config, seed catalogs, init Gemini.
  #[instrument(level = "info", skip_all)]
  pub fn new() -> Self {
    let cfg = load_app_config_from_env().unwrap_or_default();
    let catalog = Catalog::build(&cfg.problems);

    let gemini = Gemini::from_env();
    if let Some(g) = &gemini {
      info!(target: "ascope_backend", base_url = %g.base_url, model = %g.model, "Gemini enabled.");
    } else {
      info!(target: "ascope_backend", "Gemini disabled (no GEMINI_API_KEY). Assist actions return the fallback text.");
    }

    Self {
      catalog,
      prompts: cfg.prompts,
      gemini,
      store: SessionBlobStore::from_env(),
    }
  }
}
