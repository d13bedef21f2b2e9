//! LLM Provider implementations

pub mod openai;
