use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::actions::ScriptDescriptor;
use crate::error::Result;

/// Exit code reported when the script was terminated without one (e.g. by a signal).
pub const NO_EXIT_CODE: i32 = -1;

/// Outcome of one script execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub exit_code: i32,
    pub first_output_line: Option<String>,
}

impl RunResult {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// A fully resolved script invocation: `interpreter script model project_directory`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptInvocation {
    pub interpreter: PathBuf,
    pub script_path: PathBuf,
    pub model: String,
    pub project_directory: PathBuf,
}

impl ScriptInvocation {
    #[must_use]
    pub fn new(
        descriptor: &ScriptDescriptor,
        model: &str,
        project_directory: &Path,
        interpreter: &Path,
        scripts_root: &Path,
    ) -> Self {
        Self {
            interpreter: interpreter.to_path_buf(),
            script_path: scripts_root.join(&descriptor.script_file_name),
            model: model.to_string(),
            project_directory: project_directory.to_path_buf(),
        }
    }

    /// The full argument vector, interpreter first.
    #[must_use]
    pub fn argv(&self) -> Vec<OsString> {
        vec![
            self.interpreter.clone().into_os_string(),
            self.script_path.clone().into_os_string(),
            OsString::from(&self.model),
            self.project_directory.clone().into_os_string(),
        ]
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.interpreter);
        command
            .arg(&self.script_path)
            .arg(&self.model)
            .arg(&self.project_directory);
        command
    }
}

impl Display for ScriptInvocation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .argv()
            .iter()
            .map(|part| part.to_string_lossy().into_owned())
            .collect();
        formatter.write_str(&parts.join(" "))
    }
}

/// Runs the script and blocks until it exits.
///
/// Stdout and stderr are drained while waiting, so a script that writes a lot
/// of output cannot stall on a full pipe.
///
/// # Errors
///
/// Returns an error if the interpreter could not be spawned.
pub fn run_script(invocation: &ScriptInvocation) -> Result<RunResult> {
    info!("Executing: {invocation}");

    let output = invocation
        .to_command()
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()?;

    if !output.stderr.is_empty() {
        debug!(
            "Script stderr:\n{}",
            String::from_utf8_lossy(&output.stderr).trim_end()
        );
    }

    let exit_code = output.status.code().unwrap_or(NO_EXIT_CODE);
    let first_output_line = first_line(&output.stdout);

    debug!("Script exited with {exit_code}, first output line: {first_output_line:?}");

    Ok(RunResult {
        exit_code,
        first_output_line,
    })
}

fn first_line(stdout: &[u8]) -> Option<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .next()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(ToString::to_string)
}
