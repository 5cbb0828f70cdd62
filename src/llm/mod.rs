//! LLM integration for contract summarization.
//!
//! Sends extracted document text, wrapped in a fixed instruction template,
//! to a chat-completion service.

mod client;
mod summary;

pub use client::{
    ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChoiceMessage, LlmClient, LlmConfig,
    LlmError, LlmProvider, TextGenerator, CONTRACT_SUMMARY_PROMPT, TEXT_SLOT,
};
pub use summary::{SummaryPrompt, Summarizer};
