#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod bugtrail;
pub mod export;
pub mod message;
pub mod persona;
pub mod scenario;

pub use bugtrail::BugTrail;
pub use export::{ExportFormat, to_jira, to_markdown};
pub use message::{ChatMessage, Role, format_transcript};
pub use persona::{Industry, Level, Persona, Timezone, ToneArc};
pub use scenario::{ScenarioBrief, ScenarioId, all_scenarios, find_scenario};

/// Role of a message sent to the hosted completion model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    Developer,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    #[must_use]
    pub fn new(role: PromptRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(PromptRole::System, content)
    }

    #[must_use]
    pub fn developer(content: impl Into<String>) -> Self {
        Self::new(PromptRole::Developer, content)
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(PromptRole::User, content)
    }
}

/// Sampling parameters for a single completion call.
///
/// `None` fields are left out of the request so the provider applies its own
/// defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionOptions {
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub stop: Vec<String>,
}

impl CompletionOptions {
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub const fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    #[must_use]
    pub const fn with_frequency_penalty(mut self, penalty: f32) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    #[must_use]
    pub fn with_stop<I, S>(mut self, stop: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop = stop.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl std::fmt::Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} prompt + {} completion = {} total",
            self.prompt_tokens, self.completion_tokens, self.total_tokens
        )
    }
}

/// A hosted text-completion backend.
///
/// Implementations make exactly one request per call; callers decide what to
/// do when it fails.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn chat(
        &self,
        messages: &[PromptMessage],
        options: &CompletionOptions,
    ) -> anyhow::Result<LLMResponse>;
    fn get_default_model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_reads_as_token_breakdown() {
        let usage = Usage {
            prompt_tokens: 12,
            completion_tokens: 3,
            total_tokens: 15,
        };
        assert_eq!(usage.to_string(), "12 prompt + 3 completion = 15 total");
    }

    #[test]
    fn prompt_roles_serialize_lowercase() {
        let msg = PromptMessage::developer("brief");
        let json = serde_json::to_value(&msg).unwrap_or_default();
        assert_eq!(json["role"], "developer");
        assert_eq!(json["content"], "brief");
    }

    #[test]
    fn completion_options_builder_sets_fields() {
        let options = CompletionOptions::default()
            .with_model("gpt-4o-mini")
            .with_max_tokens(400)
            .with_stop(["Agent:"]);

        assert_eq!(options.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(options.max_tokens, Some(400));
        assert_eq!(options.stop, vec!["Agent:".to_string()]);
        assert!(options.temperature.is_none());
    }
}
