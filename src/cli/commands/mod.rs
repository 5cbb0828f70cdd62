//! CLI commands implementation.

mod check;
mod config_cmd;
mod summarize;

pub use check::cmd_check;
pub use config_cmd::cmd_config_show;
pub use summarize::{cmd_classify, cmd_extract, cmd_summarize};
