//! Application state: the in-memory game store and the distractor generator.
//!
//! This module owns:
//!   - the game store (by id, plus insertion order for listing)
//!   - the distractor generator built from env config and prompt overrides
//!
//! Distractors are generated once per game creation and stored inside the
//! game value, so deleting a game drops its distractors with it.

use std::{collections::HashMap, sync::Arc};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::{load_prompt_config_from_env, ProviderConfig};
use crate::domain::{Distractor, Game};
use crate::generator::Generator;

/// Number of distractors generated per game.
pub const DISTRACTORS_PER_GAME: usize = 3;

#[derive(Clone)]
pub struct AppState {
    pub games: Arc<RwLock<HashMap<String, Game>>>,
    pub order: Arc<RwLock<Vec<String>>>,
    pub generator: Arc<Generator>,
}

impl AppState {
    /// Build state from env: provider config, prompt overrides, generator.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = ProviderConfig::from_env();
        let prompts = load_prompt_config_from_env()
            .map(|c| c.prompts)
            .unwrap_or_default();
        Self::with_generator(Generator::new(&cfg, prompts))
    }

    pub fn with_generator(generator: Generator) -> Self {
        Self {
            games: Arc::new(RwLock::new(HashMap::new())),
            order: Arc::new(RwLock::new(Vec::new())),
            generator: Arc::new(generator),
        }
    }

    /// Create a game and its generated distractors.
    /// Generation never fails (fallback guarantees), so neither does this.
    #[instrument(level = "info", skip(self, original_text), fields(%title, text_len = original_text.len()))]
    pub async fn create_game(
        &self,
        title: String,
        original_text: String,
        host: Option<String>,
        category: Option<String>,
        grade_level: Option<i32>,
    ) -> Game {
        let texts = self
            .generator
            .generate(&original_text, DISTRACTORS_PER_GAME)
            .await;

        let now = Utc::now();
        let distractors = texts
            .into_iter()
            .map(|t| Distractor {
                id: Uuid::new_v4().to_string(),
                distractor_text: t,
                created_at: now,
            })
            .collect();

        let game = Game {
            id: Uuid::new_v4().to_string(),
            title,
            original_text,
            host,
            category,
            grade_level,
            created_at: now,
            updated_at: now,
            distractors,
        };

        {
            let mut games = self.games.write().await;
            let mut order = self.order.write().await;
            order.push(game.id.clone());
            games.insert(game.id.clone(), game.clone());
        }

        info!(target: "game", id = %game.id, distractors = game.distractors.len(), "Game created");
        game
    }

    /// Read-only access to a game by id.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_game(&self, id: &str) -> Option<Game> {
        self.games.read().await.get(id).cloned()
    }

    /// All games in insertion order.
    #[instrument(level = "debug", skip(self))]
    pub async fn all_games(&self) -> Vec<Game> {
        let games = self.games.read().await;
        let order = self.order.read().await;
        order.iter().filter_map(|id| games.get(id).cloned()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Prompts;

    fn offline_state() -> AppState {
        // No credentials configured: generation is purely rule-based.
        AppState::with_generator(Generator::new(&ProviderConfig::default(), Prompts::default()))
    }

    #[tokio::test]
    async fn create_game_stores_three_distractors() {
        let state = offline_state();
        let game = state
            .create_game(
                "Photosynthesis".into(),
                "Plants absorb sunlight and convert it, releasing glucose".into(),
                Some("Ms. Rivera".into()),
                Some("science".into()),
                Some(5),
            )
            .await;

        assert_eq!(game.distractors.len(), DISTRACTORS_PER_GAME);
        assert_eq!(
            game.distractors[0].distractor_text,
            "Plants absorb moonlight and convert it, releasing glucose"
        );

        let fetched = state.get_game(&game.id).await.expect("game present");
        assert_eq!(fetched.title, "Photosynthesis");
        assert_eq!(fetched.distractors.len(), DISTRACTORS_PER_GAME);
    }

    #[tokio::test]
    async fn unknown_game_id_is_none() {
        let state = offline_state();
        assert!(state.get_game("nope").await.is_none());
    }

    #[tokio::test]
    async fn all_games_preserves_insertion_order() {
        let state = offline_state();
        let first = state
            .create_game("First".into(), "water cycle".into(), None, None, None)
            .await;
        let second = state
            .create_game("Second".into(), "rock cycle".into(), None, None, None)
            .await;

        let all = state.all_games().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);
    }
}
