//! # quill-provider
//!
//! LLM provider client layer for Quill.
//! Real LLM plugins wrap one of these clients; failures surface as
//! `quill_foundation::Error::Generation`.
//!
//! ## Features
//! - OpenAI-compatible chat completion (any base URL)
//! - HTTP status / error body classification
//! - No retry: callers receive the first failure

pub mod error;
pub mod message;
pub mod providers;

pub use error::ProviderError;
pub use message::{Message, MessageRole};
pub use providers::openai::{Completion, FinishReason, OpenAiClient, TokenUsage};
