//! Domain models used by the backend: games and their distractor texts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A game: a reference text plus metadata, owning its generated distractors.
/// Distractors live inside the game value, so removing a game removes them too.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game {
  pub id: String,
  pub title: String,
  pub original_text: String,
  #[serde(default)] pub host: Option<String>,
  #[serde(default)] pub category: Option<String>,
  #[serde(default)] pub grade_level: Option<i32>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub distractors: Vec<Distractor>,
}

/// A deliberately incorrect variant of the game's original text.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Distractor {
  pub id: String,
  pub distractor_text: String,
  pub created_at: DateTime<Utc>,
}
