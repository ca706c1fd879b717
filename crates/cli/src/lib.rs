//! Microgen CLI Library
//!
//! This crate provides the terminal front-end for microgen. It parses the
//! command line, asks for the project directory, model and action when they
//! are not given, and shows each generation's progress and outcome as a
//! coloured status line.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing and validation
//! - [`selection`]: Prompts and menus for directory, model, action and confirmation
//! - [`session`]: Runs a chosen action and reports its outcome
//! - [`terminal`]: Themed status output
//!
//! # Examples
//!
//! ```bash
//! # Interactive mode: pick directory, model and actions until `q`
//! microgen
//!
//! # Generate the mapper for one model without confirmation
//! microgen -d ~/work/shop -m User -f mapper
//!
//! # Show what would run
//! microgen --dry-run -d ~/work/shop -m "All Models" full-service
//!
//! # Rerun the last action
//! microgen --rerun-last
//!
//! # Stage bundled scripts, then switch to the light theme
//! microgen --stage ./resources
//! microgen --dark-theme false
//! ```

pub mod cli_args;
pub mod selection;
pub mod session;
pub mod terminal;
