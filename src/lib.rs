//! A-Scope · Algorithmic Reasoning Studio backend library.
//!
//! Session, view-routing, and workspace state live in [`session`] and
//! [`workspace`]; the AI pass-through in [`gemini`]; read-only catalogs in
//! [`catalog`]; the axum surface in [`routes`].

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod gemini;
pub mod logic;
pub mod protocol;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod util;
pub mod workspace;
