//! OpenAI provider - chat completions over HTTPS, streamed via SSE.
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key).with_model("gpt-4o-mini");
//! let provider = OpenAIProvider::new(config)?;
//! ```
//!
//! Streaming responses are decoded line by line. Network chunks may split
//! an SSE line (or a UTF-8 sequence) anywhere, so bytes are buffered until a
//! full line is available. No retries are attempted.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AiConfig;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, CompletionStream, FinishReason,
    StreamChunk, TokenUsage,
};

const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Provider settings from the `ai` config section, if a key is set.
    pub fn from_app_config(ai: &AiConfig) -> Option<Self> {
        let key = ai.openai_api_key.as_ref()?;
        Some(Self {
            api_key: key.clone(),
            model: ai.model.clone(),
            base_url: ai.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(ai.timeout_secs),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn to_openai_request<'a>(&'a self, request: &'a CompletionRequest, stream: bool) -> OpenAIRequest<'a> {
        OpenAIRequest {
            model: &self.config.model,
            messages: request
                .messages
                .iter()
                .map(|m| OpenAIMessageRef {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream,
        }
    }

    async fn send(&self, request: &CompletionRequest, stream: bool) -> Result<Response, AIError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&self.to_openai_request(request, stream))
            .send()
            .await
            .map_err(map_transport_error)?;
        check_status(response).await
    }
}

fn map_transport_error(e: reqwest::Error) -> AIError {
    if e.is_timeout() {
        AIError::Timeout
    } else if e.is_connect() {
        AIError::network(format!("connection failed: {}", e))
    } else {
        AIError::network(e.to_string())
    }
}

async fn check_status(response: Response) -> Result<Response, AIError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    match status.as_u16() {
        401 | 403 => Err(AIError::AuthenticationFailed),
        429 => Err(AIError::rate_limited(parse_retry_after(&body))),
        400 => Err(AIError::invalid_request(body)),
        500..=599 => Err(AIError::unavailable(format!("server error {}: {}", status, body))),
        _ => Err(AIError::network(format!("unexpected status {}: {}", status, body))),
    }
}

/// Reads "try again in Ns" out of an OpenAI error message.
fn parse_retry_after(body: &str) -> u32 {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message")?.as_str().map(str::to_owned));

    message
        .as_deref()
        .and_then(|m| m.split("try again in ").nth(1))
        .and_then(|rest| {
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        })
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

fn finish_reason(raw: &str) -> FinishReason {
    match raw {
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send(&request, false).await?;
        let body: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("failed to parse response: {}", e)))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AIError::parse("no choices in response"))?;

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            usage: body
                .usage
                .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
                .unwrap_or_default(),
            model: body.model,
            finish_reason: choice
                .finish_reason
                .as_deref()
                .map(finish_reason)
                .unwrap_or(FinishReason::Stop),
        })
    }

    async fn stream_complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionStream, AIError> {
        let response = self.send(&request, true).await?;

        let chunks = response
            .bytes_stream()
            .scan(SseLineDecoder::default(), |decoder, item| {
                let out = match item {
                    Ok(bytes) => decoder.push(&bytes),
                    Err(e) => vec![Err(AIError::network(format!("stream error: {}", e)))],
                };
                futures::future::ready(Some(out))
            })
            .flat_map(stream::iter);

        Ok(Box::pin(chunks))
    }
}

/// Incremental decoder for the chat-completions event stream.
#[derive(Debug, Default)]
struct SseLineDecoder {
    pending: Vec<u8>,
    done: bool,
}

impl SseLineDecoder {
    /// Feeds raw bytes and returns the chunks of every completed line.
    fn push(&mut self, bytes: &[u8]) -> Vec<Result<StreamChunk, AIError>> {
        self.pending.extend_from_slice(bytes);
        let mut out = Vec::new();

        while let Some(newline) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=newline).collect();
            if self.done {
                continue;
            }
            match std::str::from_utf8(&line) {
                Ok(line) => self.decode_line(line.trim_end_matches(['\r', '\n']), &mut out),
                Err(e) => out.push(Err(AIError::parse(format!("invalid UTF-8 in stream: {}", e)))),
            }
        }
        out
    }

    fn decode_line(&mut self, line: &str, out: &mut Vec<Result<StreamChunk, AIError>>) {
        let Some(data) = line.strip_prefix("data:") else {
            return;
        };
        let data = data.trim_start();
        if data.is_empty() {
            return;
        }
        if data == "[DONE]" {
            self.done = true;
            return;
        }

        match serde_json::from_str::<StreamResponseChunk>(data) {
            Ok(chunk) => {
                if let Some(message) = chunk.error.and_then(|e| e.message) {
                    out.push(Err(AIError::unavailable(message)));
                    return;
                }
                for choice in chunk.choices {
                    if let Some(content) = choice.delta.content.filter(|c| !c.is_empty()) {
                        out.push(Ok(StreamChunk::content(content)));
                    }
                    if let Some(reason) = choice.finish_reason {
                        out.push(Ok(StreamChunk::final_chunk(finish_reason(&reason))));
                    }
                }
            }
            Err(e) => out.push(Err(AIError::parse(format!("failed to parse SSE chunk: {}", e)))),
        }
    }
}

// ----- OpenAI API types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIMessageRef<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct OpenAIMessageRef<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    model: String,
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct StreamResponseChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    error: Option<StreamError>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamError {
    message: Option<String>,
}
