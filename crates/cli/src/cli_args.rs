//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure and provides
//! validation for CLI arguments using the `clap` crate.

use clap::Parser;
use microgen_core::actions::GenerateAction;
use microgen_core::error::{Error, Result};

/// Command-line arguments for the `microgen` binary.
///
/// Without an action the binary runs interactively: it asks for anything not
/// given on the command line and keeps offering actions until the user quits.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use microgen_cli::cli_args::Args;
///
/// let args = Args::parse_from(["microgen", "-d", "~/work/shop", "-m", "User", "dto"]);
/// assert_eq!(args.model.as_deref(), Some("User"));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
#[allow(clippy::struct_excessive_bools)] // silence clippy's warning on this struct
pub struct Args {
    /// Project directory to generate into.
    ///
    /// If not provided, the directory of the last run is offered as the default.
    #[arg(long, short = 'd')]
    pub directory: Option<String>,

    /// Model to generate for.
    ///
    /// Matched against the models found under the project's `model` directory,
    /// exactly first and then fuzzily. `All Models` is always available.
    #[arg(long, short = 'm')]
    pub model: Option<String>,

    /// Directory holding the staged scripts and `settings.properties`.
    ///
    /// If not provided, defaults to `<temp dir>/microgen_scripts`.
    #[arg(long, short = 's')]
    pub scripts_root: Option<String>,

    /// Path to the YAML file overriding script names and messages per action.
    ///
    /// If not provided, defaults to `~/.microgen/actions.yml`.
    #[arg(long, short = 'a')]
    pub actions_path: Option<String>,

    /// Path to the file that stores the last run.
    ///
    /// If not provided, defaults to `~/.microgen/last_run.yml`.
    #[arg(long, short = 'l')]
    pub last_run_path: Option<String>,

    /// Print the script invocation without running it.
    #[arg(long, short = 'n', action)]
    pub dry_run: bool,

    /// Run without asking for confirmation first.
    #[arg(long, short = 'f', action)]
    pub force: bool,

    /// Rerun the last action for the last model and directory.
    #[arg(long, short = 'r', action)]
    pub rerun_last: bool,

    /// Do not overwrite the last run with this one.
    #[arg(long, action)]
    pub skip_save: bool,

    /// List the available actions and the scripts they run, then exit.
    #[arg(long, action)]
    pub list_actions: bool,

    /// List the models found in the project directory, then exit.
    #[arg(long, action)]
    pub list_models: bool,

    /// Copy `scripts/` and `static_files/` from this directory into the scripts root, then exit.
    #[arg(long, value_name = "RESOURCES_DIR")]
    pub stage: Option<String>,

    /// Remove the scripts root, then exit.
    #[arg(long, action)]
    pub clean: bool,

    /// Persist the `generateDependencies` setting, then exit.
    #[arg(long, value_name = "BOOL")]
    pub generate_dependencies: Option<bool>,

    /// Persist the `darkTheme` setting, then exit.
    #[arg(long, value_name = "BOOL")]
    pub dark_theme: Option<bool>,

    /// The action to run: dto, mapper, service, controller, repository,
    /// exception, test or full-service.
    #[arg(num_args(1))]
    pub action: Option<String>,
}

impl Args {
    /// Parses the action argument, if one was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the action is unknown, or if it was combined with `--rerun-last`.
    pub fn get_action(&self) -> Result<Option<GenerateAction>> {
        let Some(action) = &self.action else {
            return Ok(None);
        };

        if self.rerun_last {
            // Rerunning decides the action itself
            return Err(Error::RerunWithAction);
        }

        action.parse().map(Some)
    }

    /// Whether any settings flag was given.
    #[must_use]
    pub fn updates_settings(&self) -> bool {
        self.generate_dependencies.is_some() || self.dark_theme.is_some()
    }
}
