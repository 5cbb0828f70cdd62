//! Text extraction from PDFs: embedded text layer or rasterize-and-OCR.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::backend::{OcrBackend, OcrError, PageTextSource, Rasterizer};

/// Errors that can occur while classifying or extracting a document.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Could not classify document: {0}")]
    Classification(#[source] OcrError),

    #[error("Unreadable document: {0}")]
    UnreadableDocument(#[source] OcrError),

    #[error("Text extraction failed on page {page}: {source}")]
    PageText { page: u32, source: OcrError },

    #[error("Rasterization failed: {0}")]
    Rasterization(#[source] OcrError),

    #[error("OCR failed on page {page}: {source}")]
    Recognition { page: u32, source: OcrError },
}

/// Method used to extract text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    /// Embedded text layer read directly.
    Native,
    /// Rendered page images run through OCR.
    Ocr,
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMethod::Native => f.write_str("native"),
            ExtractionMethod::Ocr => f.write_str("ocr"),
        }
    }
}

/// Text of a whole document, pages joined in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
    method: ExtractionMethod,
    page_count: u32,
}

impl ExtractedText {
    /// Concatenate page fragments, already in page order, with no separator.
    pub fn from_pages<I, S>(fragments: I, method: ExtractionMethod) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        let mut page_count = 0;
        for fragment in fragments {
            text.push_str(fragment.as_ref());
            page_count += 1;
        }
        Self {
            text,
            method,
            page_count,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Where the text came from. Diagnostic only.
    pub fn method(&self) -> ExtractionMethod {
        self.method
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Reads the embedded text of every page.
#[derive(Clone)]
pub struct NativeTextExtractor {
    source: Arc<dyn PageTextSource>,
}

impl NativeTextExtractor {
    pub fn new(source: Arc<dyn PageTextSource>) -> Self {
        Self { source }
    }

    pub fn extract(&self, pdf: &[u8]) -> Result<ExtractedText, ExtractionError> {
        let document = self
            .source
            .open(pdf)
            .map_err(ExtractionError::UnreadableDocument)?;

        let page_count = document.page_count();
        let mut pages = Vec::with_capacity(page_count as usize);
        for page in 1..=page_count {
            let text = document
                .page_text(page)
                .map_err(|source| ExtractionError::PageText { page, source })?;
            debug!("native: page {} -> {} chars", page, text.len());
            pages.push(text);
        }

        Ok(ExtractedText::from_pages(pages, ExtractionMethod::Native))
    }
}

/// Rasterizes every page and runs OCR on each image in order.
#[derive(Clone)]
pub struct RasterOcrExtractor {
    rasterizer: Arc<dyn Rasterizer>,
    ocr: Arc<dyn OcrBackend>,
}

impl RasterOcrExtractor {
    pub fn new(rasterizer: Arc<dyn Rasterizer>, ocr: Arc<dyn OcrBackend>) -> Self {
        Self { rasterizer, ocr }
    }

    /// Any page failing recognition aborts the whole extraction.
    pub fn extract(&self, pdf: &[u8]) -> Result<ExtractedText, ExtractionError> {
        let images = self
            .rasterizer
            .rasterize(pdf, None)
            .map_err(ExtractionError::Rasterization)?;
        debug!("{}: recognizing {} pages", self.ocr.name(), images.len());

        let mut pages = Vec::with_capacity(images.len());
        for image in images.pages() {
            let text = self
                .ocr
                .recognize(image)
                .map_err(|source| ExtractionError::Recognition {
                    page: image.page,
                    source,
                })?;
            pages.push(text);
        }

        Ok(ExtractedText::from_pages(pages, ExtractionMethod::Ocr))
    }
}
