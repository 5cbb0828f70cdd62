//! Scanned-vs-structured document classification.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::backend::Rasterizer;
use super::extractor::ExtractionError;

/// Substring of a rasterization error that marks the engine itself as
/// unavailable or misconfigured. Such failures still classify as scanned.
pub const RASTER_ENGINE_DIAGNOSTIC: &str = "pdfinfo";

/// How a document's text should be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Only page images; text must come from OCR.
    Scanned,
    /// Embedded text layer can be read directly.
    Structured,
}

impl Classification {
    pub fn is_scanned(&self) -> bool {
        matches!(self, Classification::Scanned)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Scanned => "scanned",
            Classification::Structured => "structured",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides which extraction path a document takes.
///
/// The probe renders only the first page. A successful render means
/// `Scanned`, and so does a failure whose message names the raster engine
/// diagnostic. Every other failure is returned to the caller. Nothing here
/// ever answers `Structured`; callers reach the native path only through
/// their own "not scanned" branch.
#[derive(Clone)]
pub struct DocumentClassifier {
    rasterizer: Arc<dyn Rasterizer>,
}

impl DocumentClassifier {
    pub fn new(rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self { rasterizer }
    }

    pub fn classify(&self, pdf: &[u8]) -> Result<Classification, ExtractionError> {
        match self.rasterizer.rasterize(pdf, Some(1..=1)) {
            Ok(pages) => {
                debug!("First page rendered ({} image), classifying as scanned", pages.len());
                Ok(Classification::Scanned)
            }
            Err(e) => {
                let message = e.to_string();
                if message.to_lowercase().contains(RASTER_ENGINE_DIAGNOSTIC) {
                    warn!("Rasterizer unavailable ({}), classifying as scanned", message);
                    Ok(Classification::Scanned)
                } else {
                    Err(ExtractionError::Classification(e))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::backend::{OcrError, PageImage, PageRange, RasterizedPages};
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Rasterizer that replays a fixed outcome and records the requested range.
    struct ScriptedRasterizer {
        outcome: fn() -> Result<RasterizedPages, OcrError>,
        requested: Mutex<Vec<Option<PageRange>>>,
    }

    impl ScriptedRasterizer {
        fn new(outcome: fn() -> Result<RasterizedPages, OcrError>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                requested: Mutex::new(Vec::new()),
            })
        }
    }

    impl Rasterizer for ScriptedRasterizer {
        fn rasterize(
            &self,
            _pdf: &[u8],
            pages: Option<PageRange>,
        ) -> Result<RasterizedPages, OcrError> {
            self.requested.lock().unwrap().push(pages);
            (self.outcome)()
        }
    }

    fn one_page() -> Result<RasterizedPages, OcrError> {
        Ok(RasterizedPages::new(vec![PageImage {
            page: 1,
            path: PathBuf::from("page-1.png"),
        }]))
    }

    #[test]
    fn test_render_success_is_scanned() {
        let rasterizer = ScriptedRasterizer::new(one_page);
        let classifier = DocumentClassifier::new(rasterizer.clone());

        // Text-bearing PDFs render too; the answer is still scanned.
        let result = classifier.classify(b"%PDF-1.7 text layer").unwrap();
        assert_eq!(result, Classification::Scanned);
        assert_eq!(*rasterizer.requested.lock().unwrap(), vec![Some(1..=1)]);
    }

    #[test]
    fn test_engine_diagnostic_is_scanned() {
        let rasterizer = ScriptedRasterizer::new(|| {
            Err(OcrError::BackendNotAvailable(
                "pdfinfo not found (install poppler-utils)".to_string(),
            ))
        });
        let classifier = DocumentClassifier::new(rasterizer);
        assert_eq!(classifier.classify(b"").unwrap(), Classification::Scanned);
    }

    #[test]
    fn test_engine_diagnostic_is_case_insensitive() {
        let rasterizer = ScriptedRasterizer::new(|| {
            Err(OcrError::RasterFailed("PDFInfo exited with status 99".to_string()))
        });
        let classifier = DocumentClassifier::new(rasterizer);
        assert!(classifier.classify(b"").unwrap().is_scanned());
    }

    #[test]
    fn test_other_failures_propagate() {
        let rasterizer = ScriptedRasterizer::new(|| {
            Err(OcrError::RasterFailed(
                "Unable to get page count. Syntax Error: Couldn't find trailer dictionary"
                    .to_string(),
            ))
        });
        let classifier = DocumentClassifier::new(rasterizer);
        let err = classifier.classify(b"not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Classification(_)));
        assert!(err.to_string().contains("trailer dictionary"));
    }

    #[test]
    fn test_classification_display() {
        assert_eq!(Classification::Scanned.to_string(), "scanned");
        assert_eq!(Classification::Structured.to_string(), "structured");
        assert!(!Classification::Structured.is_scanned());
    }
}
