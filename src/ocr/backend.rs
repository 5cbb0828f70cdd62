//! Capability traits for the external engines used during extraction.
//!
//! Rasterization, OCR and embedded-text extraction are all delegated to
//! outside tools. Each is reached through a small trait so the extractors
//! can be driven by deterministic fakes in tests.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use tempfile::TempDir;
use thiserror::Error;

/// Errors reported by rasterization, OCR and text engines.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Backend not available: {0}")]
    BackendNotAvailable(String),

    #[error("Rasterization failed: {0}")]
    RasterFailed(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("Text extraction failed: {0}")]
    TextFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Inclusive, 1-based page range.
pub type PageRange = RangeInclusive<u32>;

/// A single rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// 1-based page number.
    pub page: u32,
    /// Location of the rendered image.
    pub path: PathBuf,
}

/// Pages produced by one rasterization call.
///
/// Images are kept in page order. When the images were written to a
/// temporary directory, that directory is owned here and removed on drop.
#[derive(Debug)]
pub struct RasterizedPages {
    pages: Vec<PageImage>,
    _workdir: Option<TempDir>,
}

impl RasterizedPages {
    /// Wrap images that are owned elsewhere.
    pub fn new(mut pages: Vec<PageImage>) -> Self {
        pages.sort_by_key(|p| p.page);
        Self {
            pages,
            _workdir: None,
        }
    }

    /// Wrap images that live inside `workdir`.
    pub fn in_workdir(pages: Vec<PageImage>, workdir: TempDir) -> Self {
        let mut rasterized = Self::new(pages);
        rasterized._workdir = Some(workdir);
        rasterized
    }

    pub fn pages(&self) -> &[PageImage] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Renders PDF pages to images.
pub trait Rasterizer: Send + Sync {
    /// Render `pages` (or every page when `None`) of the PDF held in `pdf`.
    fn rasterize(&self, pdf: &[u8], pages: Option<PageRange>) -> Result<RasterizedPages, OcrError>;
}

/// Recognizes text in a page image.
pub trait OcrBackend: Send + Sync {
    /// Short engine name for logs.
    fn name(&self) -> &'static str;

    /// Check if the engine can run (binaries installed, models present).
    fn is_available(&self) -> bool;

    /// Run recognition on one page image. Empty output is not an error.
    fn recognize(&self, image: &PageImage) -> Result<String, OcrError>;
}

/// Opens PDFs for reading their embedded text layer.
pub trait PageTextSource: Send + Sync {
    /// Parse `pdf`, failing if it is not a readable document.
    fn open(&self, pdf: &[u8]) -> Result<Box<dyn TextDocument>, OcrError>;
}

/// An opened PDF whose pages can be read one at a time.
pub trait TextDocument {
    fn page_count(&self) -> u32;

    /// Embedded text of a 1-based page.
    fn page_text(&self, page: u32) -> Result<String, OcrError>;
}
