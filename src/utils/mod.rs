//! Shared utility functions.
//!
//! - `html`: newline-to-markup conversion for displaying summaries

mod html;

pub use html::{newlines_to_br, LINE_BREAK};
