//! Mock AI provider for tests and key-less development runs.
//!
//! Responses are scripted as fragment lists so tests control exactly which
//! deltas the stream yields. Failures can be injected before the stream
//! opens or after a number of fragments.
//!
//! ```ignore
//! let provider = MockAIProvider::new().with_fragments(["Day ", "1: ", "Arrive."]);
//! ```

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, CompletionStream, FinishReason,
    StreamChunk, TokenUsage,
};

const DEFAULT_REPLY: &str = "Mock response";
const MOCK_MODEL: &str = "mock-model-1";

/// Scripted provider. Clones share the script and the call log.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Pause before each streamed fragment.
    fragment_delay: Duration,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Stream these fragments, then finish normally.
    Fragments(Vec<String>),
    /// Stream these fragments, then stop at the token limit.
    Truncated(Vec<String>),
    /// Stream these fragments, then yield the error.
    FailAfter {
        fragments: Vec<String>,
        error: MockError,
    },
    /// Stream these fragments, then never finish.
    Hang(Vec<String>),
    /// Refuse to open the stream.
    Error(MockError),
}

#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout,
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout => AIError::Timeout,
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            fragment_delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a reply delivered as a single fragment.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Fragments(vec![content.into()]))
    }

    /// Queues a reply delivered fragment by fragment.
    pub fn with_fragments<I, S>(self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(MockResponse::Fragments(
            fragments.into_iter().map(Into::into).collect(),
        ))
    }

    /// Queues a reply that ends with `finish_reason: length`.
    pub fn with_truncated_fragments<I, S>(self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(MockResponse::Truncated(
            fragments.into_iter().map(Into::into).collect(),
        ))
    }

    /// Queues a reply that breaks after `fragments`.
    pub fn with_failure_after<I, S>(self, fragments: I, error: MockError) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(MockResponse::FailAfter {
            fragments: fragments.into_iter().map(Into::into).collect(),
            error,
        })
    }

    /// Queues a reply that stalls after `fragments`.
    pub fn with_hang_after<I, S>(self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(MockResponse::Hang(
            fragments.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn with_error(self, error: MockError) -> Self {
        self.push(MockResponse::Error(error))
    }

    pub fn with_fragment_delay(mut self, delay: Duration) -> Self {
        self.fragment_delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn push(self, response: MockResponse) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(response);
        self
    }

    fn record(&self, request: CompletionRequest) -> MockResponse {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| MockResponse::Fragments(vec![DEFAULT_REPLY.to_string()]))
    }

    fn fragment_stream(
        &self,
        fragments: Vec<String>,
    ) -> impl futures::Stream<Item = Result<StreamChunk, AIError>> + Send + 'static {
        let delay = self.fragment_delay;
        stream::iter(fragments).then(move |fragment| async move {
            if !delay.is_zero() {
                sleep(delay).await;
            }
            Ok(StreamChunk::content(fragment))
        })
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        match self.record(request) {
            MockResponse::Fragments(fragments) | MockResponse::Hang(fragments) => {
                Ok(completion(fragments, FinishReason::Stop))
            }
            MockResponse::Truncated(fragments) => Ok(completion(fragments, FinishReason::Length)),
            MockResponse::FailAfter { error, .. } | MockResponse::Error(error) => {
                Err(error.into())
            }
        }
    }

    async fn stream_complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionStream, AIError> {
        match self.record(request) {
            MockResponse::Fragments(fragments) => {
                let finish = stream::once(async { Ok(StreamChunk::final_chunk(FinishReason::Stop)) });
                Ok(Box::pin(self.fragment_stream(fragments).chain(finish)))
            }
            MockResponse::Truncated(fragments) => {
                let finish =
                    stream::once(async { Ok(StreamChunk::final_chunk(FinishReason::Length)) });
                Ok(Box::pin(self.fragment_stream(fragments).chain(finish)))
            }
            MockResponse::FailAfter { fragments, error } => {
                let failure = stream::once(async move { Err(AIError::from(error)) });
                Ok(Box::pin(self.fragment_stream(fragments).chain(failure)))
            }
            MockResponse::Hang(fragments) => {
                Ok(Box::pin(self.fragment_stream(fragments).chain(stream::pending())))
            }
            MockResponse::Error(error) => Err(error.into()),
        }
    }
}

fn completion(fragments: Vec<String>, finish_reason: FinishReason) -> CompletionResponse {
    let content = fragments.concat();
    CompletionResponse {
        usage: TokenUsage::new(10, (content.len() / 4).max(1) as u32),
        content,
        model: MOCK_MODEL.to_string(),
        finish_reason,
    }
}
