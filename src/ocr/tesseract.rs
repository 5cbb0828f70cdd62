//! Tesseract OCR backend implementation.
//!
//! Uses Tesseract OCR via command-line for text extraction.

use std::process::Command;
use std::time::Instant;

use tracing::debug;

use super::backend::{OcrBackend, OcrError, PageImage};
use super::tools::{check_binary, handle_cmd_output};

/// Tesseract OCR backend.
#[derive(Debug, Clone)]
pub struct TesseractBackend {
    /// Executable name or absolute path.
    command: String,
    /// Tesseract language setting (e.g. "eng", "eng+deu").
    language: String,
}

impl TesseractBackend {
    /// Create a backend using `tesseract` from PATH with English.
    pub fn new() -> Self {
        Self {
            command: "tesseract".to_string(),
            language: "eng".to_string(),
        }
    }

    /// Use a specific executable, e.g. `/usr/local/bin/tesseract`.
    pub fn with_command(mut self, command: &str) -> Self {
        self.command = command.to_string();
        self
    }

    /// Set Tesseract language.
    pub fn with_language(mut self, lang: &str) -> Self {
        self.language = lang.to_string();
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrBackend for TesseractBackend {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        check_binary(&self.command)
    }

    fn recognize(&self, image: &PageImage) -> Result<String, OcrError> {
        let start = Instant::now();
        let output = Command::new(&self.command)
            .arg(&image.path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output();

        let not_found = format!("{} not found (install tesseract-ocr)", self.command);
        let text = handle_cmd_output(output, &not_found, |stderr| {
            OcrError::OcrFailed(format!("tesseract failed on page {}: {}", image.page, stderr))
        })?;

        debug!(
            "tesseract: page {} -> {} chars in {}ms",
            image.page,
            text.len(),
            start.elapsed().as_millis()
        );
        Ok(text)
    }
}
