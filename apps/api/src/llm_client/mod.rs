/// Generation client — the single point of entry for all model calls in Rolelens.
///
/// ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
/// Every stage of the pipeline goes through the `GenerationService` trait so
/// tests can substitute a scripted stub without touching process-wide state.
///
/// Model: gpt-4.1 (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for all generation calls in Rolelens.
/// Intentionally hardcoded to prevent accidental drift between stages.
pub const MODEL: &str = "gpt-4.1";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("model returned empty content")]
    EmptyContent,
}

/// The narrow boundary every pipeline stage depends on: a rendered
/// instruction goes in, an object-shaped JSON value (or a parse error)
/// comes out. Parse failure is an expected outcome, never fatal —
/// stage builders degrade to schema-complete defaults.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        system: &str,
        temperature: f32,
    ) -> Result<Value, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Concrete client for the OpenAI chat completions API.
/// Retries transient failures (429 / 5xx / network) with exponential backoff;
/// parse failures are returned to the caller unretried.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    async fn call(
        &self,
        prompt: &str,
        system: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            temperature,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "generation call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(OPENAI_API_URL)
                .bearer_auth(&self.api_key)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("generation API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<OpenAiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat: ChatResponse = response.json().await?;

            if let Some(usage) = &chat.usage {
                debug!(
                    "generation call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return chat
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .filter(|c| !c.trim().is_empty())
                .ok_or(LlmError::EmptyContent);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl GenerationService for OpenAiClient {
    async fn generate(
        &self,
        prompt: &str,
        system: &str,
        temperature: f32,
    ) -> Result<Value, LlmError> {
        let text = self.call(prompt, system, temperature).await?;
        parse_object_text(&text)
    }
}

/// Parses model output into a JSON value, tolerating markdown fences and
/// stray prose around the object. Tries the raw text first, then the slice
/// between the first `{` and the last `}`.
pub fn parse_object_text(text: &str) -> Result<Value, LlmError> {
    let text = strip_json_fences(text);

    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
                if start < end {
                    if let Ok(value) = serde_json::from_str(&text[start..=end]) {
                        return Ok(value);
                    }
                }
            }
            Err(LlmError::Parse(first_err))
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_parse_object_text_plain_object() {
        let value = parse_object_text("{\"score\": 42}").unwrap();
        assert_eq!(value["score"], 42);
    }

    #[test]
    fn test_parse_object_text_recovers_embedded_object() {
        let value =
            parse_object_text("Here is the analysis you asked for: {\"score\": 42} Hope it helps!")
                .unwrap();
        assert_eq!(value["score"], 42);
    }

    #[test]
    fn test_parse_object_text_rejects_prose() {
        let result = parse_object_text("I could not produce a profile.");
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_parse_object_text_rejects_broken_object() {
        let result = parse_object_text("{\"score\": ");
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }
}
