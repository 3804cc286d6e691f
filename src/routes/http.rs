//! HTTP endpoint handlers. These are thin wrappers that forward to the state
//! layer. Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument};

use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_root() -> impl IntoResponse {
  Json(RootOut { message: "Game Creation API is running!".into() })
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state, body), fields(title = %body.title, text_len = body.original_text.len()))]
pub async fn http_create_game(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GameCreateIn>,
) -> Response {
  if body.title.trim().is_empty() || body.original_text.trim().is_empty() {
    return (
      StatusCode::UNPROCESSABLE_ENTITY,
      Json(ErrorOut { detail: "title and original_text must be non-empty".into() }),
    )
      .into_response();
  }

  let game = state
    .create_game(body.title, body.original_text, body.host, body.category, body.grade_level)
    .await;
  info!(target: "game", id = %game.id, "HTTP game created");
  Json(to_out(&game)).into_response()
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_game(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Response {
  match state.get_game(&id).await {
    Some(game) => Json(to_out(&game)).into_response(),
    None => (
      StatusCode::NOT_FOUND,
      Json(ErrorOut { detail: "Game not found".into() }),
    )
      .into_response(),
  }
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_games(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let games = state.all_games().await;
  info!(target: "game", count = games.len(), "HTTP games listed");
  Json(games.iter().map(to_out).collect::<Vec<_>>())
}
