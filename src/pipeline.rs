//! Upload-to-summary pipeline.
//!
//! classify → extract (OCR or embedded text) → summarize → format. Each step
//! runs once, in order, within a single `run` call.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::llm::{LlmClient, LlmError, Summarizer, TextGenerator};
use crate::ocr::{
    Classification, DocumentClassifier, ExtractedText, ExtractionError, ExtractionMethod,
    NativeTextExtractor, OcrBackend, PageTextSource, PopplerRasterizer, PopplerText,
    RasterOcrExtractor, Rasterizer, TesseractBackend,
};
use crate::utils::newlines_to_br;

/// Errors surfaced by the pipeline. None are retried.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Summarization failed: {0}")]
    Summarization(#[from] LlmError),

    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// An uploaded file: its name and raw bytes.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Read a document from disk, keeping only the file name.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self { filename, bytes })
    }

    /// Whether the file name carries the `.pdf` suffix uploads must have.
    pub fn has_pdf_extension(&self) -> bool {
        self.filename.ends_with(".pdf")
    }
}

/// A finished summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Trimmed text as returned by the service.
    pub raw: String,
    /// `raw` with line breaks turned into `<br>`.
    pub html: String,
    /// How the document text was obtained.
    pub method: ExtractionMethod,
    pub page_count: u32,
}

/// The full extraction and summarization pipeline.
///
/// Holds only immutable collaborator handles, so one instance can serve
/// concurrent documents through `&self`.
#[derive(Clone)]
pub struct SummaryPipeline {
    classifier: DocumentClassifier,
    native: NativeTextExtractor,
    ocr: RasterOcrExtractor,
    summarizer: Summarizer,
}

impl SummaryPipeline {
    pub fn new(
        rasterizer: Arc<dyn Rasterizer>,
        text_source: Arc<dyn PageTextSource>,
        ocr_backend: Arc<dyn OcrBackend>,
        summarizer: Summarizer,
    ) -> Self {
        Self {
            classifier: DocumentClassifier::new(rasterizer.clone()),
            native: NativeTextExtractor::new(text_source),
            ocr: RasterOcrExtractor::new(rasterizer, ocr_backend),
            summarizer,
        }
    }

    /// Build the production pipeline: Poppler, Tesseract and the configured LLM.
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let rasterizer = PopplerRasterizer::new().with_dpi(config.ocr.dpi);
        let tesseract = TesseractBackend::new()
            .with_command(&config.ocr.tesseract_cmd)
            .with_language(&config.ocr.language);
        let generator: Arc<dyn TextGenerator> = Arc::new(LlmClient::new(config.llm.clone())?);

        Ok(Self::new(
            Arc::new(rasterizer),
            Arc::new(PopplerText::new()),
            Arc::new(tesseract),
            Summarizer::new(generator, &config.llm),
        ))
    }

    pub fn classify(&self, document: &UploadedDocument) -> Result<Classification, ExtractionError> {
        self.classifier.classify(&document.bytes)
    }

    /// Extract text along the path a classification selects: OCR for
    /// scanned documents, the embedded text layer otherwise.
    pub fn extract_as(
        &self,
        classification: Classification,
        document: &UploadedDocument,
    ) -> Result<ExtractedText, ExtractionError> {
        if classification.is_scanned() {
            self.ocr.extract(&document.bytes)
        } else {
            self.native.extract(&document.bytes)
        }
    }

    /// Classify, then extract.
    pub fn extract(&self, document: &UploadedDocument) -> Result<ExtractedText, ExtractionError> {
        let classification = self.classify(document)?;
        info!("{}: classified as {}", document.filename, classification);
        self.extract_as(classification, document)
    }

    /// Run the whole pipeline for one document.
    ///
    /// Classification and extraction shell out to Poppler and Tesseract, so
    /// they run on the blocking pool; only the summary request is awaited
    /// on the runtime.
    pub async fn run(&self, document: &UploadedDocument) -> Result<Summary, PipelineError> {
        let pipeline = self.clone();
        let owned = document.clone();
        let extracted = tokio::task::spawn_blocking(move || pipeline.extract(&owned)).await??;
        let (method, page_count) = (extracted.method(), extracted.page_count());
        info!(
            "{}: extracted {} chars from {} pages via {}",
            document.filename,
            extracted.as_str().len(),
            page_count,
            method
        );

        let raw = self.summarizer.summarize(&extracted.into_text()).await?;
        let html = newlines_to_br(&raw);

        Ok(Summary {
            raw,
            html,
            method,
            page_count,
        })
    }
}
