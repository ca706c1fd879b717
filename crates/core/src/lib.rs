//! Microgen Core Library
//!
//! This crate provides the core of microgen, a launcher for external code
//! generation scripts. A user picks a project directory and a model, and each
//! generation action (DTOs, mappers, services, controllers, repositories,
//! exceptions, tests, full service) runs one shell script with the model name
//! and project directory as arguments.
//!
//! # Key Features
//!
//! - **Action Catalog**: Maps each action to a script and `{model}` message templates
//! - **Script Runner**: Spawns the interpreter, waits, and reports exit code and first output line
//! - **Dispatcher**: Runs one script at a time on a worker thread and reports back to the caller
//! - **Model Discovery**: Lists model names from a project's `model` directory
//! - **Staging & Settings**: Prepares the scripts root and its `settings.properties`
//!
//! # Examples
//!
//! Resolving what an action will run:
//!
//! ```
//! use microgen_core::actions::{ActionCatalog, GenerateAction};
//!
//! let catalog = ActionCatalog::built_in();
//! let descriptor = catalog.resolve(GenerateAction::Mapper, "User");
//! assert_eq!(descriptor.script_file_name, "mapper-generator.sh");
//! assert_eq!(descriptor.progress_message, "Generating DTO Mappers for /User...");
//! ```

pub mod actions;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod interpolation;
pub mod models;
pub mod platform;
pub mod settings;
pub mod staging;
pub mod status;
