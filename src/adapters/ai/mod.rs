//! AI provider adapters.
//!
//! - `OpenAIProvider` - hosted chat completions with SSE streaming
//! - `MockAIProvider` - scripted fragments for tests and key-less runs

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
