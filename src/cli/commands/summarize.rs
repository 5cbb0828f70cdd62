//! Summarize, extract and classify commands.

use std::path::Path;

use console::style;

use crate::cli::icons::{dim_arrow, info, success};
use crate::config::Config;
use crate::pipeline::{SummaryPipeline, UploadedDocument};

/// Read a PDF from disk, rejecting files without the `.pdf` suffix.
fn load_pdf(file: &Path) -> anyhow::Result<UploadedDocument> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }
    let document = UploadedDocument::from_path(file)?;
    if !document.has_pdf_extension() {
        anyhow::bail!("Invalid file format. Only PDF files are accepted.");
    }
    Ok(document)
}

/// Run the full pipeline and print the summary.
pub async fn cmd_summarize(config: &Config, file: &Path, raw: bool) -> anyhow::Result<()> {
    let document = load_pdf(file)?;
    let pipeline = SummaryPipeline::from_config(config)?;

    eprintln!("{} Summarizing {}", info(), style(&document.filename).bold());
    let summary = pipeline.run(&document).await?;
    eprintln!(
        "{} {} pages read via {}",
        success(),
        summary.page_count,
        summary.method
    );

    if raw {
        println!("{}", summary.raw);
    } else {
        println!("{}", summary.html);
    }
    Ok(())
}

/// Classify and extract, printing the document text.
pub fn cmd_extract(config: &Config, file: &Path) -> anyhow::Result<()> {
    let document = load_pdf(file)?;
    let pipeline = SummaryPipeline::from_config(config)?;

    let extracted = pipeline.extract(&document)?;
    eprintln!(
        "{} {} pages, {} chars via {}",
        success(),
        extracted.page_count(),
        extracted.as_str().len(),
        extracted.method()
    );
    print!("{}", extracted.as_str());
    Ok(())
}

/// Print the classification of a document.
pub fn cmd_classify(config: &Config, file: &Path) -> anyhow::Result<()> {
    let document = load_pdf(file)?;
    let pipeline = SummaryPipeline::from_config(config)?;

    let classification = pipeline.classify(&document)?;
    eprintln!("{} {}", dim_arrow(), document.filename);
    println!("{}", classification);
    Ok(())
}
