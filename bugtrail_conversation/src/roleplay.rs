use bugtrail_core::{
    ChatMessage, CompletionOptions, LLMProvider, Persona, PromptMessage, ScenarioBrief,
    find_scenario,
};
use bugtrail_heuristics::generate_offline_reply;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::ServiceError;
use crate::prompts::{
    customer_developer_brief, customer_system_prompt, last_agent_message, roleplay_user_prompt,
};

const STOP_SEQUENCES: [&str; 3] = ["\n\nAgent:", "Agent:", "\n\n"];

/// One simulated-customer turn request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleplayRequest {
    pub scenario_id: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    #[serde(default)]
    pub force_offline: bool,
    /// Falls back to [`Persona::default`].
    #[serde(default)]
    pub persona: Option<Persona>,
}

impl RoleplayRequest {
    #[must_use]
    pub fn new(scenario_id: impl Into<String>, history: Vec<ChatMessage>) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            history,
            force_offline: false,
            persona: None,
        }
    }

    #[must_use]
    pub const fn offline(mut self, force_offline: bool) -> Self {
        self.force_offline = force_offline;
        self
    }

    #[must_use]
    pub const fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = Some(persona);
        self
    }
}

/// The customer's reply and whether it came from the offline engine.
#[derive(Debug, Clone, Serialize)]
pub struct RoleplayReply {
    pub message: ChatMessage,
    pub offline: bool,
}

/// Plays the customer for a scenario.
pub struct RoleplayService {
    provider: Option<Arc<dyn LLMProvider>>,
    max_tokens: u32,
    temperature: f32,
}

impl RoleplayService {
    pub const DEFAULT_MAX_TOKENS: u32 = 400;
    pub const DEFAULT_TEMPERATURE: f32 = 0.3;

    /// `None` runs every request offline.
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

    #[must_use]
    pub fn is_online(&self) -> bool {
        self.provider.is_some()
    }

    fn completion_options(&self) -> CompletionOptions {
        CompletionOptions::default()
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
            .with_top_p(0.9)
            .with_frequency_penalty(0.1)
            .with_stop(STOP_SEQUENCES)
    }

    pub async fn reply(&self, request: &RoleplayRequest) -> Result<RoleplayReply, ServiceError> {
        let scenario =
            find_scenario(&request.scenario_id).ok_or(ServiceError::InvalidScenario)?;

        let provider = match &self.provider {
            Some(provider) if !request.force_offline => provider,
            _ => {
                debug!(scenario = %scenario.id, "Replying offline");
                return Ok(offline_reply(request));
            }
        };

        let last_agent =
            last_agent_message(&request.history).ok_or(ServiceError::NoAgentMessage)?;
        let persona = request.persona.unwrap_or_default();

        match self
            .ask_model(provider.as_ref(), scenario, &persona, request, last_agent)
            .await
        {
            Ok(text) => Ok(RoleplayReply {
                message: ChatMessage::customer(text),
                offline: false,
            }),
            Err(e) => {
                warn!(
                    scenario = %scenario.id,
                    error = %e,
                    "Roleplay model call failed, falling back to offline reply"
                );
                Ok(offline_reply(request))
            }
        }
    }

    async fn ask_model(
        &self,
        provider: &dyn LLMProvider,
        scenario: &ScenarioBrief,
        persona: &Persona,
        request: &RoleplayRequest,
        last_agent: &ChatMessage,
    ) -> anyhow::Result<String> {
        let messages = [
            PromptMessage::system(customer_system_prompt()),
            PromptMessage::developer(customer_developer_brief(scenario, persona)),
            PromptMessage::user(roleplay_user_prompt(&request.history, last_agent)),
        ];

        info!(
            "Requesting customer reply for {} with {}",
            scenario.id,
            provider.get_default_model()
        );
        let response = provider
            .chat(&messages, &self.completion_options())
            .await?;
        if let Some(usage) = &response.usage {
            debug!("Roleplay tokens: {usage}");
        }

        let text = response.content.trim();
        if text.is_empty() {
            anyhow::bail!("Empty response from model");
        }
        Ok(text.to_string())
    }
}

fn offline_reply(request: &RoleplayRequest) -> RoleplayReply {
    RoleplayReply {
        message: generate_offline_reply(&request.history, &request.scenario_id),
        offline: true,
    }
}
