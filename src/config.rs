//! Process configuration: backend provider selection and credentials from
//! environment variables, prompt templates from an optional TOML file.
//!
//! The configuration is read once at startup and is immutable afterwards.
//! Missing credentials never invalidate the configuration; they only make
//! the corresponding backend unavailable.

use serde::Deserialize;
use tracing::{error, info, warn};

/// The closed set of supported generation backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Provider {
  OpenAi,
  #[default]
  Gemini,
}

impl Provider {
  pub fn other(self) -> Self {
    match self {
      Provider::OpenAi => Provider::Gemini,
      Provider::Gemini => Provider::OpenAi,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Provider::OpenAi => "openai",
      Provider::Gemini => "gemini",
    }
  }
}

/// Provider selection and credentials, resolved once from the environment.
#[derive(Clone, Debug, Default)]
pub struct ProviderConfig {
  pub preferred: Provider,
  pub openai_api_key: Option<String>,
  pub openai_base_url: Option<String>,
  pub openai_model: Option<String>,
  pub gemini_api_key: Option<String>,
  pub gemini_base_url: Option<String>,
  pub gemini_model: Option<String>,
}

impl ProviderConfig {
  pub fn from_env() -> Self {
    let preferred = match std::env::var("LLM_PROVIDER").unwrap_or_default().to_lowercase().as_str() {
      "openai" => Provider::OpenAi,
      "gemini" | "" => Provider::Gemini,
      other => {
        warn!(target: "gamegen_backend", provider = %other, "Unknown LLM_PROVIDER; defaulting to gemini");
        Provider::Gemini
      }
    };

    Self {
      preferred,
      openai_api_key: non_empty_env("OPENAI_API_KEY"),
      openai_base_url: non_empty_env("OPENAI_BASE_URL"),
      openai_model: non_empty_env("OPENAI_MODEL"),
      gemini_api_key: non_empty_env("GEMINI_API_KEY"),
      gemini_base_url: non_empty_env("GEMINI_BASE_URL"),
      gemini_model: non_empty_env("GEMINI_MODEL"),
    }
  }
}

/// Env lookup that treats empty/whitespace values as unset.
fn non_empty_env(key: &str) -> Option<String> {
  std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Prompt templates used when asking a backend for distractors.
/// Defaults are sensible for educational distractor generation.
/// You can override them in TOML if you need to tune tone/structure.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub distractor_system: String,
  pub distractor_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      distractor_system: "You are an expert educational content creator.".into(),
      distractor_user_template: "You are an expert at creating educational distractor texts.\n\
        Given the original text, create {count} distractor texts that:\n\
        1. Resemble the original text in style and structure\n\
        2. Include small inaccuracies, misleading details, or missing information\n\
        3. Are plausible enough to be confusing but clearly wrong\n\
        4. Each distractor should have different types of errors (factual, logical, missing info)\n\n\
        Original text: \"{text}\"\n\n\
        Generate exactly {count} distractor texts. Return them as a JSON array of strings.\n\
        Example format: [\"distractor 1\", \"distractor 2\", \"distractor 3\"]".into(),
    }
  }
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct PromptConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Attempt to load `PromptConfig` from PROMPTS_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_prompt_config_from_env() -> Option<PromptConfig> {
  let path = std::env::var("PROMPTS_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<PromptConfig>(&s) {
      Ok(cfg) => {
        info!(target: "gamegen_backend", %path, "Loaded prompt config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "gamegen_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "gamegen_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
