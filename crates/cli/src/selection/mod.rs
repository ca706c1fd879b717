//! Interactive selection and user input handling.
//!
//! Numbered menus on stdin/stdout for the project directory, the model and
//! the action, plus the confirmation before a script runs. Every prompt reads
//! from a `BufRead` and writes to a `Write` so it can be driven from tests.

pub mod input;
pub mod matching;
pub mod types;

pub use input::{confirm_run, prompt_for_action, prompt_for_model, prompt_value};
pub use matching::{match_action, match_model};
pub use types::{ActionChoice, ModelChoice};

/// Input that quits any menu
pub const QUIT_OPTION: &str = "q";
