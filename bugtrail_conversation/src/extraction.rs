use bugtrail_core::{
    BugTrail, ChatMessage, CompletionOptions, LLMProvider, PromptMessage, format_transcript,
};
use bugtrail_heuristics::heuristic_extract;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::ServiceError;
use crate::prompts::extractor_system_prompt;

/// Which engine produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionSource {
    Model,
    Heuristic,
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub bugtrail: BugTrail,
    pub source: ExtractionSource,
}

impl Extraction {
    fn heuristic(history: &[ChatMessage]) -> Self {
        Self {
            bugtrail: heuristic_extract(history),
            source: ExtractionSource::Heuristic,
        }
    }
}

/// Turns a conversation into a [`BugTrail`].
pub struct ExtractionService {
    provider: Option<Arc<dyn LLMProvider>>,
    max_tokens: u32,
    temperature: f32,
}

impl ExtractionService {
    pub const DEFAULT_MAX_TOKENS: u32 = 600;
    pub const DEFAULT_TEMPERATURE: f32 = 0.2;

    /// `None` always uses the heuristic extractor.
    #[must_use]
    pub fn new(provider: Option<Arc<dyn LLMProvider>>) -> Self {
        Self {
            provider,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            temperature: Self::DEFAULT_TEMPERATURE,
        }
    }

    #[must_use]
    pub const fn with_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    pub async fn extract(&self, history: &[ChatMessage]) -> Result<Extraction, ServiceError> {
        if history.is_empty() {
            return Err(ServiceError::EmptyHistory);
        }

        let Some(provider) = &self.provider else {
            debug!("No provider configured, using heuristic extraction");
            return Ok(Extraction::heuristic(history));
        };

        match self.ask_model(provider.as_ref(), history).await {
            Ok(bugtrail) => Ok(Extraction {
                bugtrail,
                source: ExtractionSource::Model,
            }),
            Err(e) => {
                warn!(error = %e, "Model extraction failed, falling back to heuristics");
                Ok(Extraction::heuristic(history))
            }
        }
    }

    async fn ask_model(
        &self,
        provider: &dyn LLMProvider,
        history: &[ChatMessage],
    ) -> anyhow::Result<BugTrail> {
        let messages = [
            PromptMessage::system(extractor_system_prompt()),
            PromptMessage::user(format_transcript(history)),
        ];
        let options = CompletionOptions::default()
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        info!(
            "Extracting BugTrail from {} messages with {}",
            history.len(),
            provider.get_default_model()
        );
        let response = provider.chat(&messages, &options).await?;
        if let Some(usage) = &response.usage {
            debug!("Extraction tokens: {usage}");
        }
        parse_bugtrail(&response.content)
    }
}

/// Parse model output as a [`BugTrail`], tolerating a surrounding
/// markdown code fence.
pub fn parse_bugtrail(raw: &str) -> anyhow::Result<BugTrail> {
    let body = strip_code_fence(raw.trim());
    if body.is_empty() {
        anyhow::bail!("Empty response from model");
    }
    let bugtrail: BugTrail = serde_json::from_str(body)?;
    if bugtrail.is_blank() {
        anyhow::bail!("Model returned an empty BugTrail");
    }
    Ok(bugtrail)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. `json`) on the opening line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
