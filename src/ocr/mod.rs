//! OCR and text extraction module.
//!
//! Extracts text from PDF documents using:
//! - pdftotext (Poppler) for the embedded text layer
//! - pdftoppm (Poppler) + Tesseract OCR for scanned pages
//!
//! Every external tool sits behind a trait in `backend` so the extractors
//! and the classifier can be exercised without the binaries installed.

mod backend;
mod classifier;
mod extractor;
mod poppler;
mod tesseract;
mod tools;

pub use backend::{
    OcrBackend, OcrError, PageImage, PageRange, PageTextSource, RasterizedPages, Rasterizer,
    TextDocument,
};
pub use classifier::{Classification, DocumentClassifier, RASTER_ENGINE_DIAGNOSTIC};
pub use extractor::{
    ExtractedText, ExtractionError, ExtractionMethod, NativeTextExtractor, RasterOcrExtractor,
};
pub use poppler::{find_page_image, PopplerRasterizer, PopplerText, DEFAULT_DPI};
pub use tesseract::TesseractBackend;
pub use tools::{check_binary, check_tools, REQUIRED_TOOLS};
