//! Poppler-based PDF tooling: `pdfinfo`, `pdftoppm` and `pdftotext`.
//!
//! Document bytes are written to a per-call temporary directory; rendered
//! page images live in the same directory and are cleaned up together.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::debug;

use super::backend::{
    OcrError, PageImage, PageRange, PageTextSource, RasterizedPages, Rasterizer, TextDocument,
};
use super::tools::{
    handle_cmd_output, write_input, PDFINFO_NOT_FOUND, PDFTOPPM_NOT_FOUND, PDFTOTEXT_NOT_FOUND,
};

/// Default rendering resolution.
pub const DEFAULT_DPI: u32 = 200;

/// Read the page count of a PDF with `pdfinfo`.
fn pdf_page_count(pdf_path: &Path, fail: fn(String) -> OcrError) -> Result<u32, OcrError> {
    let output = Command::new("pdfinfo").arg(pdf_path).output();
    let stdout = handle_cmd_output(output, PDFINFO_NOT_FOUND, |stderr| {
        fail(format!("Unable to get page count. {}", stderr))
    })?;
    parse_page_count(&stdout)
        .ok_or_else(|| fail("Unable to get page count from pdfinfo output".to_string()))
}

fn parse_page_count(pdfinfo_output: &str) -> Option<u32> {
    pdfinfo_output
        .lines()
        .find(|line| line.starts_with("Pages:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|n| n.parse().ok())
}

/// Drop the single form feed pdftotext appends to every page.
fn strip_page_break(text: &str) -> &str {
    text.strip_suffix('\u{c}').unwrap_or(text)
}

/// Find the image file for a specific page number.
///
/// pdftoppm pads page numbers to the width of the last page number, so the
/// padding varies with document length.
pub fn find_page_image(dir: &Path, page: u32) -> Option<PathBuf> {
    (1..=6)
        .map(|width| dir.join(format!("page-{:0width$}.png", page, width = width)))
        .find(|path| path.exists())
}

/// Rasterizer backed by `pdftoppm`.
#[derive(Debug, Clone)]
pub struct PopplerRasterizer {
    dpi: u32,
}

impl PopplerRasterizer {
    pub fn new() -> Self {
        Self { dpi: DEFAULT_DPI }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }
}

impl Default for PopplerRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for PopplerRasterizer {
    fn rasterize(&self, pdf: &[u8], pages: Option<PageRange>) -> Result<RasterizedPages, OcrError> {
        let workdir = TempDir::new()?;
        let input = write_input(workdir.path(), pdf)?;

        let page_count = pdf_page_count(&input, OcrError::RasterFailed)?;
        let (first, last) = match pages {
            Some(range) => (*range.start(), (*range.end()).min(page_count)),
            None => (1, page_count),
        };
        if first == 0 || first > last {
            return Err(OcrError::RasterFailed(format!(
                "Page range {}-{} is outside a {}-page document",
                first, last, page_count
            )));
        }

        debug!("pdftoppm: rendering pages {}-{} at {} dpi", first, last, self.dpi);
        let (first_str, last_str, dpi_str) =
            (first.to_string(), last.to_string(), self.dpi.to_string());
        let output = Command::new("pdftoppm")
            .args(["-png", "-r", &dpi_str, "-f", &first_str, "-l", &last_str])
            .arg(&input)
            .arg(workdir.path().join("page"))
            .output();
        handle_cmd_output(output, PDFTOPPM_NOT_FOUND, |stderr| {
            OcrError::RasterFailed(format!("pdftoppm failed: {}", stderr))
        })?;

        let mut images = Vec::with_capacity((last - first + 1) as usize);
        for page in first..=last {
            let path = find_page_image(workdir.path(), page).ok_or_else(|| {
                OcrError::RasterFailed(format!("No image generated for page {}", page))
            })?;
            images.push(PageImage { page, path });
        }

        Ok(RasterizedPages::in_workdir(images, workdir))
    }
}

/// Embedded-text reader backed by `pdftotext`.
#[derive(Debug, Clone, Default)]
pub struct PopplerText;

impl PopplerText {
    pub fn new() -> Self {
        Self
    }
}

impl PageTextSource for PopplerText {
    fn open(&self, pdf: &[u8]) -> Result<Box<dyn TextDocument>, OcrError> {
        let workdir = TempDir::new()?;
        let path = write_input(workdir.path(), pdf)?;
        let page_count = pdf_page_count(&path, OcrError::TextFailed)?;

        Ok(Box::new(PopplerDocument {
            _workdir: workdir,
            path,
            page_count,
        }))
    }
}

/// A PDF written to disk for `pdftotext`.
struct PopplerDocument {
    _workdir: TempDir,
    path: PathBuf,
    page_count: u32,
}

impl TextDocument for PopplerDocument {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn page_text(&self, page: u32) -> Result<String, OcrError> {
        let page_str = page.to_string();
        let output = Command::new("pdftotext")
            .args(["-enc", "UTF-8", "-f", &page_str, "-l", &page_str])
            .arg(&self.path)
            .arg("-") // Output to stdout
            .output();

        let text = handle_cmd_output(output, PDFTOTEXT_NOT_FOUND, |stderr| {
            OcrError::TextFailed(format!("pdftotext failed on page {}: {}", page, stderr))
        })?;

        Ok(strip_page_break(&text).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::check_binary;

    /// A small valid PDF with one line of Helvetica text per page.
    fn text_pdf(pages: &[&str]) -> Vec<u8> {
        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                (0..pages.len())
                    .map(|i| format!("{} 0 R", 4 + 2 * i))
                    .collect::<Vec<_>>()
                    .join(" "),
                pages.len()
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];
        for (i, text) in pages.iter().enumerate() {
            let content = format!("BT /F1 12 Tf 20 100 Td ({}) Tj ET", text);
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 200 200] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                5 + 2 * i
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content.len(),
                content
            ));
        }

        let mut pdf = String::from("%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
        }
        let xref = pdf.len();
        pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
        for offset in offsets {
            pdf.push_str(&format!("{:010} 00000 n \n", offset));
        }
        pdf.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref
        ));
        pdf.into_bytes()
    }

    fn tools_present(tools: &[&str]) -> bool {
        let missing: Vec<&str> = tools.iter().copied().filter(|t| !check_binary(t)).collect();
        if !missing.is_empty() {
            eprintln!("skipping: {} not installed", missing.join(", "));
        }
        missing.is_empty()
    }

    #[test]
    fn test_strip_page_break_removes_one() {
        assert_eq!(strip_page_break("Party A\n\u{c}"), "Party A\n");
        assert_eq!(strip_page_break("Party A\u{c}\u{c}"), "Party A\u{c}");
        assert_eq!(strip_page_break("no break"), "no break");
        assert_eq!(strip_page_break(""), "");
    }

    #[test]
    fn test_rasterize_renders_requested_pages() {
        if !tools_present(&["pdfinfo", "pdftoppm"]) {
            return;
        }
        let pdf = text_pdf(&["Party A agrees", "Effective date"]);
        let rasterizer = PopplerRasterizer::new().with_dpi(36);

        let first = rasterizer.rasterize(&pdf, Some(1..=1)).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first.pages()[0].page, 1);
        assert!(first.pages()[0].path.exists());

        let all = rasterizer.rasterize(&pdf, None).unwrap();
        let order: Vec<u32> = all.pages().iter().map(|p| p.page).collect();
        assert_eq!(order, vec![1, 2]);

        // Ranges past the end are clamped to the document
        let clamped = rasterizer.rasterize(&pdf, Some(1..=5)).unwrap();
        assert_eq!(clamped.len(), 2);

        let path = all.pages()[1].path.clone();
        drop(all);
        assert!(!path.exists());
    }

    #[test]
    fn test_rasterize_rejects_non_pdf() {
        if !tools_present(&["pdfinfo", "pdftoppm"]) {
            return;
        }
        let result = PopplerRasterizer::new().rasterize(b"not a pdf at all", Some(1..=1));
        assert!(matches!(result, Err(OcrError::RasterFailed(_))));
    }

    #[test]
    fn test_page_text_reads_each_page() {
        if !tools_present(&["pdfinfo", "pdftotext"]) {
            return;
        }
        let pdf = text_pdf(&["Party A agrees", "Effective date"]);
        let document = PopplerText::new().open(&pdf).unwrap();

        assert_eq!(document.page_count(), 2);
        let first = document.page_text(1).unwrap();
        assert!(first.contains("Party A agrees"));
        assert!(!first.ends_with('\u{c}'));
        assert!(!first.contains("Effective"));
        assert!(document.page_text(2).unwrap().contains("Effective date"));
    }

    #[test]
    fn test_parse_page_count() {
        let info = "Title:          Agreement\nProducer:       Writer\nPages:          12\nEncrypted:      no\n";
        assert_eq!(parse_page_count(info), Some(12));
        assert_eq!(parse_page_count("Title: x\n"), None);
        assert_eq!(parse_page_count("Pages:   many\n"), None);
    }

    #[test]
    fn test_find_page_image_not_found() {
        let temp = TempDir::new().unwrap();
        assert!(find_page_image(temp.path(), 1).is_none());
    }

    #[test]
    fn test_find_page_image_unpadded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("page-3.png");
        std::fs::write(&path, b"fake png").unwrap();

        assert_eq!(find_page_image(temp.path(), 3), Some(path));
    }

    #[test]
    fn test_find_page_image_with_3_digit_padding() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("page-007.png");
        std::fs::write(&path, b"fake png").unwrap();

        assert_eq!(find_page_image(temp.path(), 7), Some(path));
    }

    #[test]
    fn test_default_dpi() {
        assert_eq!(PopplerRasterizer::default().dpi(), DEFAULT_DPI);
        assert_eq!(PopplerRasterizer::new().with_dpi(300).dpi(), 300);
    }
}
