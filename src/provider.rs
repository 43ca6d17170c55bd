//! Remote text generation
//!
//! One `generate(prompt)` call against the configured backend. Each backend
//! differs only in endpoint, auth headers, request body and where the text
//! sits in the response, so a single client matches on the provider instead
//! of hiding backends behind a trait.

use std::time::Duration;

use serde_json::{Value, json};
use tracing::debug;

use crate::config::{AiConfig, Provider};
use crate::error::ProviderError;

/// Upper bound for a single generation request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const GOOGLE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MAX_OUTPUT_TOKENS: u32 = 1024;

/// A fully described HTTP request for one backend
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Value,
}

/// Describe the request that asks `provider` to complete `prompt`
pub fn build_request(provider: Provider, model: &str, api_key: &str, prompt: &str) -> ProviderRequest {
    match provider {
        Provider::OpenAI | Provider::Groq => {
            let base = if provider == Provider::Groq {
                GROQ_BASE_URL
            } else {
                OPENAI_BASE_URL
            };
            ProviderRequest {
                url: format!("{}/chat/completions", base),
                headers: vec![("Authorization", format!("Bearer {}", api_key))],
                body: json!({
                    "model": model,
                    "messages": [{ "role": "user", "content": prompt }],
                }),
            }
        }
        Provider::Claude => ProviderRequest {
            url: ANTHROPIC_URL.to_string(),
            headers: vec![
                ("x-api-key", api_key.to_string()),
                ("anthropic-version", ANTHROPIC_VERSION.to_string()),
            ],
            body: json!({
                "model": model,
                "max_tokens": MAX_OUTPUT_TOKENS,
                "messages": [{ "role": "user", "content": prompt }],
            }),
        },
        Provider::Google => ProviderRequest {
            url: format!("{}/{}:generateContent?key={}", GOOGLE_BASE_URL, model, api_key),
            headers: Vec::new(),
            body: json!({
                "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
                "generationConfig": { "maxOutputTokens": MAX_OUTPUT_TOKENS },
            }),
        },
    }
}

/// Pull the generated text out of a backend response body
pub fn extract_text(provider: Provider, body: &Value) -> Option<String> {
    match provider {
        Provider::OpenAI | Provider::Groq => body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string),
        Provider::Claude => join_text_parts(body["content"].as_array()?),
        Provider::Google => join_text_parts(body["candidates"][0]["content"]["parts"].as_array()?),
    }
}

fn join_text_parts(parts: &[Value]) -> Option<String> {
    let texts: Vec<&str> = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

/// Client for the configured provider
pub struct ProviderClient {
    provider: Provider,
    api_key: String,
    model: String,
    http: reqwest::Client,
    timeout: Duration,
    /// Replaces the backend URL when set
    endpoint: Option<String>,
}

impl ProviderClient {
    pub fn new(ai: &AiConfig) -> Result<Self, ProviderError> {
        if ai.api_key.trim().is_empty() {
            return Err(ProviderError::MissingApiKey(ai.provider.to_string()));
        }

        Ok(Self {
            provider: ai.provider,
            api_key: ai.api_key.clone(),
            model: ai.effective_model().to_string(),
            http: reqwest::Client::new(),
            timeout: REQUEST_TIMEOUT,
            endpoint: None,
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text for `prompt`, giving up after the request timeout
    pub async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        match tokio::time::timeout(self.timeout, self.send(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout.as_secs())),
        }
    }

    async fn send(&self, prompt: &str) -> Result<String, ProviderError> {
        let mut request = build_request(self.provider, &self.model, &self.api_key, prompt);
        if let Some(endpoint) = &self.endpoint {
            request.url = endpoint.clone();
        }
        debug!(provider = %self.provider, model = %self.model, "sending generation request");

        let mut builder = self.http.post(&request.url).json(&request.body);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.send().await.map_err(|source| self.http_error(source))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: self.provider.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await.map_err(|source| self.http_error(source))?;
        extract_text(self.provider, &body)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| ProviderError::EmptyResponse(self.provider.to_string()))
    }

    fn http_error(&self, source: reqwest::Error) -> ProviderError {
        ProviderError::Http {
            provider: self.provider.to_string(),
            source,
        }
    }
}
