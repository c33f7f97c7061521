//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod check;
mod completions;
mod label;
mod utils;
mod validate;

pub use check::handle_check;
pub use completions::handle_completions;
pub use label::handle_label;
pub use validate::handle_validate;
