//! contract-digest - contract PDF summarization.
//!
//! Reads a contract PDF, pulls its text either from the embedded text layer
//! or by OCR of rendered pages, and asks a chat-completion service for a
//! structured summary suitable for HTML display.

pub mod cli;
pub mod config;
pub mod llm;
pub mod ocr;
pub mod pipeline;
pub mod utils;

pub use config::Config;
pub use pipeline::{PipelineError, Summary, SummaryPipeline, UploadedDocument};
