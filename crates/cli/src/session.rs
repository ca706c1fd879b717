//! Running chosen actions from the terminal.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use log::info;
use microgen_core::actions::{ActionCatalog, GenerateAction};
use microgen_core::dispatch::{Dispatcher, GenerationRequest};
use microgen_core::error::Error::Stdio;
use microgen_core::error::Result;
use microgen_core::file_handling::{self, LastRun};

use crate::selection::confirm_run;
use crate::terminal::{TerminalStatus, Theme};

/// How a single run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded,
    Failed,
    /// Not executed: dry run or declined at the confirmation.
    Skipped,
}

/// State shared by every run of one `microgen` invocation.
pub struct Session {
    pub catalog: ActionCatalog,
    pub interpreter: PathBuf,
    pub scripts_root: PathBuf,
    /// Where to record each run, `None` to leave the last run untouched.
    pub last_run_path: Option<String>,
    pub theme: Theme,
    pub dry_run: bool,
    pub force: bool,
    dispatcher: Dispatcher,
}

impl Session {
    #[must_use]
    pub fn new(
        catalog: ActionCatalog,
        interpreter: PathBuf,
        scripts_root: PathBuf,
        last_run_path: Option<String>,
        theme: Theme,
    ) -> Self {
        Self {
            catalog,
            interpreter,
            scripts_root,
            last_run_path,
            theme,
            dry_run: false,
            force: false,
            dispatcher: Dispatcher::new(),
        }
    }

    /// Shows the invocation, confirms it unless forced, then runs it on a
    /// worker and prints the resulting status.
    ///
    /// # Errors
    ///
    /// Returns an error on terminal IO failures, if the last run cannot be
    /// written, or if the worker cannot be started.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
        action: GenerateAction,
        model: &str,
        project_directory: &Path,
    ) -> Result<RunOutcome> {
        let request = GenerationRequest {
            action,
            model: model.to_string(),
            project_directory: project_directory.to_path_buf(),
            interpreter: self.interpreter.clone(),
            scripts_root: self.scripts_root.clone(),
        };

        let descriptor = self.catalog.resolve(action, model);
        writeln!(output, "Running script:\n{}", request.invocation(&descriptor)).map_err(Stdio)?;

        if self.dry_run {
            writeln!(output, "Dry run is specified, exiting without executing.").map_err(Stdio)?;
            return Ok(RunOutcome::Skipped);
        }

        if !self.force && !confirm_run(input, output)? {
            info!("Run of `{action}` for `{model}` cancelled by user");
            return Ok(RunOutcome::Skipped);
        }

        match &self.last_run_path {
            Some(path) => file_handling::write_last_run(
                path,
                &LastRun {
                    action,
                    model: model.to_string(),
                    project_directory: project_directory.display().to_string(),
                },
            )?,
            None => info!("Skipping last run save was specified. Not (over)writing last run."),
        }

        let mut sink = TerminalStatus::new(&mut *output, self.theme);
        self.dispatcher.trigger(&self.catalog, &request, &mut sink)?;
        let completion = self.dispatcher.wait_for_completion(&mut sink)?;

        if completion.status.is_failure() {
            Ok(RunOutcome::Failed)
        } else {
            Ok(RunOutcome::Succeeded)
        }
    }
}
