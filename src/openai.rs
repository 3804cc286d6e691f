//! Minimal OpenAI client for distractor generation.
//!
//! We only call chat.completions and return the raw completion text verbatim;
//! interpreting it is the response parser's job. Calls are instrumented and
//! log model names, latencies, and token usage (not contents).
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::{Prompts, ProviderConfig};
use crate::generator::BackendError;
use crate::util::fill_template;

#[derive(Clone)]
pub struct OpenAi {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl OpenAi {
  /// Construct the adapter if an OpenAI key is configured; otherwise return None.
  pub fn from_config(cfg: &ProviderConfig) -> Option<Self> {
    let api_key = cfg.openai_api_key.clone()?;
    let base_url = cfg
      .openai_base_url
      .clone()
      .unwrap_or_else(|| "https://api.openai.com/v1".into());
    let model = cfg
      .openai_model
      .clone()
      .unwrap_or_else(|| "gpt-3.5-turbo".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, model })
  }

  /// One chat completion asking for `count` distractors of `source_text`.
  /// Returns the raw completion text; no parsing happens here.
  #[instrument(level = "info", skip(self, prompts, source_text), fields(model = %self.model, text_len = source_text.len(), count))]
  pub async fn complete(
    &self,
    prompts: &Prompts,
    source_text: &str,
    count: usize,
  ) -> Result<String, BackendError> {
    let url = format!("{}/chat/completions", self.base_url);
    let user = fill_template(
      &prompts.distractor_user_template,
      &[("count", &count.to_string()), ("text", source_text)],
    );
    let req = ChatCompletionRequest {
      model: self.model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: prompts.distractor_system.clone() },
        ChatMessageReq { role: "user".into(), content: user },
      ],
      temperature: 0.8,
      max_tokens: Some(500),
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "gamegen-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      let message = extract_openai_error(&body).unwrap_or(body);
      return Err(BackendError::Upstream { provider: "openai", status, message });
    }

    let body: ChatCompletionResponse = res.json().await?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    let text = body.choices.first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default().trim().to_string();

    if text.is_empty() {
      return Err(BackendError::EmptyReply { provider: "openai" });
    }
    Ok(text)
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  max_tokens: Option<u32>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from an OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
