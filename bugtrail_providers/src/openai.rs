use async_trait::async_trait;
use bugtrail_core::{CompletionOptions, LLMProvider, LLMResponse, PromptMessage};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for OpenAI-compatible `chat/completions` endpoints.
///
/// One HTTP request per [`LLMProvider::chat`] call, bounded by the client
/// timeout; failures are returned to the caller untouched.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        info!("Creating OpenAiProvider: timeout={}s", timeout.as_secs_f32());
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_default_model(mut self, model: String) -> Self {
        self.default_model = model;
        self
    }

    fn build_request(&self, messages: &[PromptMessage], options: &CompletionOptions) -> Value {
        let model = options.model.as_deref().unwrap_or(&self.default_model);
        let mut request = json!({
            "model": model,
            "messages": messages,
        });

        if let Some(max_tokens) = options.max_tokens {
            request["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = options.temperature {
            request["temperature"] = json!(temperature);
        }
        if let Some(top_p) = options.top_p {
            request["top_p"] = json!(top_p);
        }
        if let Some(penalty) = options.frequency_penalty {
            request["frequency_penalty"] = json!(penalty);
        }
        if !options.stop.is_empty() {
            request["stop"] = json!(options.stop);
        }
        request
    }

    async fn try_send(&self, request: &Value) -> anyhow::Result<LLMResponse> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        parse_response(&response)
    }
}

fn parse_response(response: &Value) -> anyhow::Result<LLMResponse> {
    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing content"))?
        .to_string();

    let usage = response["usage"].as_object().map(|u| bugtrail_core::Usage {
        prompt_tokens: u32::try_from(u["prompt_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
        completion_tokens: u32::try_from(u["completion_tokens"].as_u64().unwrap_or(0))
            .unwrap_or(0),
        total_tokens: u32::try_from(u["total_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
    });

    Ok(LLMResponse { content, usage })
}

#[async_trait]
impl LLMProvider for OpenAiProvider {
    async fn chat(
        &self,
        messages: &[PromptMessage],
        options: &CompletionOptions,
    ) -> anyhow::Result<LLMResponse> {
        let request = self.build_request(messages, options);

        info!(
            "Sending request to completion API: model={}",
            request["model"].as_str().unwrap_or_default()
        );
        let response = self.try_send(&request).await?;
        info!("Received response from completion API");
        Ok(response)
    }

    fn get_default_model(&self) -> &str {
        &self.default_model
    }
}
