//! Helpers for running the external command-line tools.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

use super::backend::OcrError;

pub const PDFINFO_NOT_FOUND: &str = "pdfinfo not found (install poppler-utils)";
pub const PDFTOPPM_NOT_FOUND: &str = "pdftoppm not found (install poppler-utils)";
pub const PDFTOTEXT_NOT_FOUND: &str = "pdftotext not found (install poppler-utils)";

/// Tools the pipeline shells out to.
pub const REQUIRED_TOOLS: [&str; 4] = ["pdfinfo", "pdftoppm", "pdftotext", "tesseract"];

/// Check if a binary is available in PATH (or is an existing path).
pub fn check_binary(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Availability of every required tool, in a stable order.
pub fn check_tools() -> Vec<(String, bool)> {
    REQUIRED_TOOLS
        .iter()
        .map(|tool| (tool.to_string(), check_binary(tool)))
        .collect()
}

/// Turn command output into stdout text or an error.
///
/// `not_found` is used when the binary cannot be spawned at all; `fail` wraps
/// the tool's stderr when it exits unsuccessfully.
pub fn handle_cmd_output(
    result: std::io::Result<Output>,
    not_found: &str,
    fail: impl FnOnce(String) -> OcrError,
) -> Result<String, OcrError> {
    match result {
        Ok(output) if output.status.success() => {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(fail(stderr.trim().to_string()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(OcrError::BackendNotAvailable(not_found.to_string()))
        }
        Err(e) => Err(OcrError::Io(e)),
    }
}

/// Write document bytes into `dir` so file-based tools can read them.
pub fn write_input(dir: &Path, pdf: &[u8]) -> Result<PathBuf, OcrError> {
    let path = dir.join("input.pdf");
    fs::write(&path, pdf)?;
    Ok(path)
}
