//! Minimal Gemini client for distractor generation.
//!
//! We only call models/{model}:generateContent and return the raw candidate
//! text verbatim. Gemini has no separate system role on this endpoint, so the
//! system prompt is prepended to the user prompt.
//!
//! NOTE: The API key travels in the query string; never log the request URL.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::{Prompts, ProviderConfig};
use crate::generator::BackendError;
use crate::util::fill_template;

#[derive(Clone)]
pub struct Gemini {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl Gemini {
  /// Construct the adapter if a Gemini key is configured; otherwise return None.
  pub fn from_config(cfg: &ProviderConfig) -> Option<Self> {
    let api_key = cfg.gemini_api_key.clone()?;
    let base_url = cfg
      .gemini_base_url
      .clone()
      .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".into());
    let model = cfg
      .gemini_model
      .clone()
      .unwrap_or_else(|| "gemini-1.5-flash".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, model })
  }

  /// One generateContent call asking for `count` distractors of `source_text`.
  /// Returns the raw candidate text; no parsing happens here.
  #[instrument(level = "info", skip(self, prompts, source_text), fields(model = %self.model, text_len = source_text.len(), count))]
  pub async fn complete(
    &self,
    prompts: &Prompts,
    source_text: &str,
    count: usize,
  ) -> Result<String, BackendError> {
    let url = format!(
      "{}/models/{}:generateContent?key={}",
      self.base_url, self.model, self.api_key
    );
    let user = fill_template(
      &prompts.distractor_user_template,
      &[("count", &count.to_string()), ("text", source_text)],
    );
    let req = GenerateContentRequest {
      contents: vec![Content {
        parts: vec![Part { text: format!("{}\n\n{}", prompts.distractor_system, user) }],
      }],
      generation_config: GenerationConfig { temperature: 0.8, max_output_tokens: 500 },
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "gamegen-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .json(&req).send().await?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      let message = extract_gemini_error(&body).unwrap_or(body);
      return Err(BackendError::Upstream { provider: "gemini", status, message });
    }

    let body: GenerateContentResponse = res.json().await?;
    let text = body.candidates.first()
      .and_then(|c| c.content.parts.first())
      .map(|p| p.text.trim().to_string())
      .unwrap_or_default();

    if text.is_empty() {
      return Err(BackendError::EmptyReply { provider: "gemini" });
    }
    Ok(text)
  }
}

// --- generateContent DTOs ---

#[derive(Serialize)]
struct GenerateContentRequest {
  contents: Vec<Content>,
  #[serde(rename = "generationConfig")]
  generation_config: GenerationConfig,
}
#[derive(Serialize, Deserialize)]
struct Content { parts: Vec<Part> }
#[derive(Serialize, Deserialize)]
struct Part { text: String }
#[derive(Serialize)]
struct GenerationConfig {
  temperature: f32,
  #[serde(rename = "maxOutputTokens")]
  max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}
#[derive(Deserialize)]
struct Candidate { content: Content }

/// Try to extract a clean error message from a Gemini error body.
fn extract_gemini_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
