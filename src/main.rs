//! Game Creation Backend
//!
//! - Axum HTTP API for creating games with generated distractor texts
//! - Optional OpenAI / Gemini integration (via environment variables)
//! - Deterministic rule-based fallback when no backend is reachable
//!
//! Important env variables:
//!   PORT          : u16 (default 8000)
//!   LLM_PROVIDER      : preferred backend, "openai" or "gemini" (default "gemini")
//!   OPENAI_API_KEY    : enables the OpenAI backend if present
//!   OPENAI_BASE_URL    : default "https://api.openai.com/v1"
//!   OPENAI_MODEL   : default "gpt-3.5-turbo"
//!   GEMINI_API_KEY    : enables the Gemini backend if present
//!   GEMINI_BASE_URL    : default "https://generativelanguage.googleapis.com/v1beta"
//!   GEMINI_MODEL   : default "gemini-1.5-flash"
//!   PROMPTS_CONFIG_PATH  : path to TOML config (prompt template overrides)
//!   LOG_LEVEL    : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

mod telemetry;
mod util;
mod config;
mod domain;
mod protocol;
mod fallback;
mod parse;
mod openai;
mod gemini;
mod generator;
mod state;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  dotenvy::dotenv().ok();
  telemetry::init_tracing();

  // Build shared application state (in-memory game store, distractor generator).
  let state = Arc::new(AppState::new());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 8000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "gamegen_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
