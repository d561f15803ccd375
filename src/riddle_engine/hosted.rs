//! Hosted inference backend (Hugging Face style `POST /models/{model}` API).
//!
//! [`HostedCompanion`] uses a text-generation model for replies and
//! translation; [`HostedSafetyScreen`] uses a text-classification model.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::BackendSettings;
use crate::error::{Result, RiddleError};
use crate::riddle_engine::{
    companion::{ChatPrompt, Companion, RuleBasedCompanion},
    helpers,
    models::{Language, Riddle, SafetyVerdict},
    safety::SafetyScreen,
};

/// Thin authenticated client shared by both hosted backends.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl InferenceClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(InferenceClient {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    pub fn from_settings(settings: &BackendSettings, token: impl Into<String>) -> Result<Self> {
        Self::new(
            settings.endpoint.clone(),
            token,
            Duration::from_secs(settings.timeout_seconds),
        )
    }

    pub async fn infer(&self, model: &str, body: &Value) -> Result<Value> {
        let url = format!("{}/models/{}", self.endpoint, model);
        tracing::debug!(%url, "inference request");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        check_response_status(resp).await
    }
}

async fn check_response_status(resp: reqwest::Response) -> Result<Value> {
    let status = resp.status().as_u16();
    let text = resp.text().await?;
    if status >= 400 {
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v["error"].as_str().map(str::to_string))
            .unwrap_or(text);
        tracing::warn!(status, %message, "inference API returned an error");
        return Err(RiddleError::Api { status, message });
    }
    Ok(serde_json::from_str(&text)?)
}

/// Accepts `[{"generated_text": ..}]` or a bare object.
fn generated_text(body: &Value) -> Option<String> {
    let first = match body {
        Value::Array(items) => items.first()?,
        other => other,
    };
    first["generated_text"].as_str().map(str::to_string)
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

/// Accepts `[[{label, score}, ..]]` or `[{label, score}, ..]`.
fn label_scores(body: &Value) -> Result<Vec<LabelScore>> {
    let inner = match body {
        Value::Array(items) if items.first().is_some_and(Value::is_array) => items[0].clone(),
        other => other.clone(),
    };
    Ok(serde_json::from_value(inner)?)
}

// ── Companion ────────────────────────────────────────────────────────────────

pub struct HostedCompanion {
    client: InferenceClient,
    model: String,
    max_new_tokens: u32,
    temperature: f32,
}

impl HostedCompanion {
    pub fn new(client: InferenceClient, settings: &BackendSettings) -> Self {
        HostedCompanion {
            client,
            model: settings.chat_model.clone(),
            max_new_tokens: settings.max_new_tokens,
            temperature: settings.temperature,
        }
    }

    async fn generate(&self, prompt: String) -> Result<String> {
        let body = json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": self.max_new_tokens,
                "temperature": self.temperature,
                "return_full_text": false,
            }
        });
        let resp = self.client.infer(&self.model, &body).await?;
        generated_text(&resp).ok_or_else(|| RiddleError::Api {
            status: 200,
            message: "response had no generated_text".to_string(),
        })
    }
}

#[async_trait]
impl Companion for HostedCompanion {
    async fn reply(&self, prompt: &ChatPrompt) -> Result<String> {
        let text = self.generate(helpers::chat_prompt_text(prompt)).await?;
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("empty generation, using rule-based reply");
            return Ok(RuleBasedCompanion::respond(prompt));
        }
        Ok(text.to_string())
    }

    async fn translate(&self, riddle: &Riddle, language: Language) -> Result<Riddle> {
        if language == Language::English {
            return Ok(riddle.clone());
        }
        let reply = self.generate(helpers::translation_prompt(riddle, language)).await?;
        helpers::parse_translation(&reply)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

// ── Safety ───────────────────────────────────────────────────────────────────

pub struct HostedSafetyScreen {
    client: InferenceClient,
    model: String,
    unsafe_labels: Vec<String>,
    threshold: f32,
}

impl HostedSafetyScreen {
    pub fn new(client: InferenceClient, settings: &BackendSettings) -> Self {
        HostedSafetyScreen {
            client,
            model: settings.safety_model.clone(),
            unsafe_labels: settings.unsafe_labels.iter().map(|l| l.to_lowercase()).collect(),
            threshold: settings.unsafe_threshold,
        }
    }
}

#[async_trait]
impl SafetyScreen for HostedSafetyScreen {
    async fn screen(&self, text: &str) -> Result<SafetyVerdict> {
        let resp = self.client.infer(&self.model, &json!({ "inputs": text })).await?;
        let flagged = label_scores(&resp)?
            .into_iter()
            .find(|ls| ls.score >= self.threshold && self.unsafe_labels.contains(&ls.label.to_lowercase()));
        Ok(match flagged {
            Some(ls) => SafetyVerdict::Unsafe {
                reason: format!("{} ({:.2})", ls.label, ls.score),
            },
            None => SafetyVerdict::Safe,
        })
    }

    fn name(&self) -> &str {
        &self.model
    }
}
