//! Distractor orchestration: backend routing, parsing, and fallback guarantees.
//!
//! `Generator::generate` is the single entry point used by the game service.
//! It is total: every backend or parse failure is absorbed, logged, and
//! converted into a rule-based result, so callers always get exactly the
//! number of distractors they asked for.

use thiserror::Error;
use tracing::{debug, error, info, instrument};

use crate::config::{Prompts, Provider, ProviderConfig};
use crate::fallback::fallback_distractors;
use crate::gemini::Gemini;
use crate::openai::OpenAi;
use crate::parse::parse_distractors;
use crate::util::trunc_for_log;

/// Failure of one backend attempt. Never escapes this module: the
/// orchestrator logs it and switches to rule-based generation.
#[derive(Debug, Error)]
pub enum BackendError {
  #[error("transport: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("{provider} HTTP {status}: {message}")]
  Upstream {
    provider: &'static str,
    status: u16,
    message: String,
  },
  #[error("{provider} returned an empty completion")]
  EmptyReply { provider: &'static str },
}

/// The generation core: preferred provider plus whichever adapters have keys.
pub struct Generator {
  preferred: Provider,
  openai: Option<OpenAi>,
  gemini: Option<Gemini>,
  prompts: Prompts,
}

/// Adapter picked for one call, resolved from the routing policy.
enum Active<'a> {
  OpenAi(&'a OpenAi),
  Gemini(&'a Gemini),
}

impl Active<'_> {
  fn provider(&self) -> Provider {
    match self {
      Active::OpenAi(_) => Provider::OpenAi,
      Active::Gemini(_) => Provider::Gemini,
    }
  }

  async fn complete(
    &self,
    prompts: &Prompts,
    source_text: &str,
    count: usize,
  ) -> Result<String, BackendError> {
    match self {
      Active::OpenAi(oa) => oa.complete(prompts, source_text, count).await,
      Active::Gemini(g) => g.complete(prompts, source_text, count).await,
    }
  }
}

impl Generator {
  #[instrument(level = "info", skip_all)]
  pub fn new(cfg: &ProviderConfig, prompts: Prompts) -> Self {
    let openai = OpenAi::from_config(cfg);
    let gemini = Gemini::from_config(cfg);

    if let Some(oa) = &openai {
      info!(target: "distractor", base_url = %oa.base_url, model = %oa.model, "OpenAI backend enabled");
    }
    if let Some(g) = &gemini {
      info!(target: "distractor", base_url = %g.base_url, model = %g.model, "Gemini backend enabled");
    }
    if openai.is_none() && gemini.is_none() {
      info!(target: "distractor", "No backend credentials; distractors will be rule-based only");
    }

    Self { preferred: cfg.preferred, openai, gemini, prompts }
  }

  /// The backend a call will be routed to: the preferred provider when its
  /// key is present, else the other keyed provider, else None (rule-based).
  pub fn active_provider(&self) -> Option<Provider> {
    self.active().map(|a| a.provider())
  }

  fn active(&self) -> Option<Active<'_>> {
    let pick = |p: Provider| match p {
      Provider::OpenAi => self.openai.as_ref().map(Active::OpenAi),
      Provider::Gemini => self.gemini.as_ref().map(Active::Gemini),
    };
    pick(self.preferred).or_else(|| pick(self.preferred.other()))
  }

  /// Generate exactly `count` distractors for `source_text`. Never fails.
  ///
  /// One backend attempt at most, no retries: a failed call goes straight to
  /// rule-based generation.
  #[instrument(level = "info", skip(self, source_text), fields(text_len = source_text.len(), count))]
  pub async fn generate(&self, source_text: &str, count: usize) -> Vec<String> {
    let active = match self.active() {
      Some(a) => a,
      None => {
        debug!(target: "distractor", "No backend available; using rule-based generation");
        return fallback_distractors(source_text, count);
      }
    };

    let provider = active.provider().name();
    let raw = match active.complete(&self.prompts, source_text, count).await {
      Ok(raw) => raw,
      Err(e) => {
        error!(target: "distractor", %provider, error = %e, "Backend call failed; using rule-based generation");
        return fallback_distractors(source_text, count);
      }
    };

    debug!(target: "distractor", %provider, raw_preview = %trunc_for_log(&raw, 120), "Backend reply received");
    let out = parse_distractors(&raw, count);
    info!(target: "distractor", %provider, produced = out.len(), "Distractors generated");
    out
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn keyed(openai: bool, gemini: bool, preferred: Provider) -> ProviderConfig {
    ProviderConfig {
      preferred,
      openai_api_key: openai.then(|| "sk-test".into()),
      gemini_api_key: gemini.then(|| "g-test".into()),
      ..ProviderConfig::default()
    }
  }

  #[test]
  fn routing_prefers_configured_provider() {
    let g = Generator::new(&keyed(true, true, Provider::OpenAi), Prompts::default());
    assert_eq!(g.active_provider(), Some(Provider::OpenAi));

    let g = Generator::new(&keyed(true, true, Provider::Gemini), Prompts::default());
    assert_eq!(g.active_provider(), Some(Provider::Gemini));
  }

  #[test]
  fn routing_switches_to_the_only_keyed_provider() {
    let g = Generator::new(&keyed(false, true, Provider::OpenAi), Prompts::default());
    assert_eq!(g.active_provider(), Some(Provider::Gemini));

    let g = Generator::new(&keyed(true, false, Provider::Gemini), Prompts::default());
    assert_eq!(g.active_provider(), Some(Provider::OpenAi));
  }

  #[test]
  fn routing_is_none_without_credentials() {
    let g = Generator::new(&keyed(false, false, Provider::Gemini), Prompts::default());
    assert_eq!(g.active_provider(), None);
  }

  #[tokio::test]
  async fn offline_generate_equals_rule_based_result() {
    let g = Generator::new(&keyed(false, false, Provider::Gemini), Prompts::default());
    let text = "Plants absorb sunlight and convert it, releasing glucose";
    assert_eq!(g.generate(text, 3).await, fallback_distractors(text, 3));
  }

  #[tokio::test]
  async fn offline_generate_always_returns_count_entries() {
    let g = Generator::new(&keyed(false, false, Provider::OpenAi), Prompts::default());
    for count in 1..=6 {
      assert_eq!(g.generate("no trigger words here", count).await.len(), count);
    }
  }

  #[tokio::test]
  async fn backend_failure_still_yields_full_result() {
    // Unroutable loopback port: the call fails fast and generation falls back.
    let cfg = ProviderConfig {
      preferred: Provider::OpenAi,
      openai_api_key: Some("sk-test".into()),
      openai_base_url: Some("http://127.0.0.1:9".into()),
      ..ProviderConfig::default()
    };
    let g = Generator::new(&cfg, Prompts::default());
    let text = "Plants absorb sunlight and convert it, releasing glucose";
    let out = g.generate(text, 3).await;
    assert_eq!(out, fallback_distractors(text, 3));
  }
}
