//! Environment check command.

use console::style;

use crate::cli::icons::{error, success, warn};
use crate::config::Config;
use crate::llm::LlmProvider;
use crate::ocr::{check_binary, check_tools};

/// Report external tool and credential availability.
pub fn cmd_check(config: &Config) -> anyhow::Result<()> {
    println!("{}", style("External tools").bold());

    let mut missing = 0;
    for (tool, available) in check_tools() {
        // The configured tesseract may live outside PATH
        let available = if tool == "tesseract" {
            check_binary(&config.ocr.tesseract_cmd)
        } else {
            available
        };
        if available {
            println!("  {} {}", success(), tool);
        } else {
            missing += 1;
            println!("  {} {} (not found)", error(), tool);
        }
    }

    println!("{}", style("Text generation").bold());
    println!(
        "  {} {:?} at {} using {}",
        success(),
        config.llm.provider,
        config.llm.endpoint,
        config.llm.model
    );
    if !config.llm.enabled {
        println!("  {} summarization disabled (LLM_ENABLED)", warn());
    } else if config.llm.provider == LlmProvider::OpenAI && config.llm.api_key.is_none() {
        missing += 1;
        println!("  {} no API key (set OPENAI_API_KEY)", error());
    }

    if missing > 0 {
        anyhow::bail!("{} requirement(s) missing", missing);
    }
    Ok(())
}
