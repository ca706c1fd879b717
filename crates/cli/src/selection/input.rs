use std::io::{BufRead, Write};

use microgen_core::actions::ActionCatalog;
use microgen_core::error::Error::Stdio;
use microgen_core::error::Result;

use super::matching::{match_action, match_model};
use super::types::{ActionChoice, ModelChoice};
use super::QUIT_OPTION;

/// Reads one trimmed line. End of input counts as quitting.
fn read_input<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(Stdio)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn flush<W: Write>(output: &mut W) -> Result<()> {
    output.flush().map_err(Stdio)
}

/// Prompts for a free-form value, returning `default` on empty input.
///
/// Loops until a non-empty value is available. Returns `None` at end of input.
pub fn prompt_value<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    default: Option<&str>,
) -> Result<Option<String>> {
    loop {
        match default {
            Some(default) => write!(output, "{prompt} [{default}]: ").map_err(Stdio)?,
            None => write!(output, "{prompt}: ").map_err(Stdio)?,
        }
        flush(output)?;

        let Some(value) = read_input(input)? else {
            return Ok(None);
        };

        if !value.is_empty() {
            return Ok(Some(value));
        }

        if let Some(default) = default {
            return Ok(Some(default.to_string()));
        }
    }
}

/// Shows the numbered action menu and reads a choice by index or id.
pub fn prompt_for_action<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    catalog: &ActionCatalog,
) -> Result<ActionChoice> {
    for (index, (action, template)) in catalog.iter().enumerate() {
        writeln!(
            output,
            "[{index}]: {} ({action} → {})",
            action.label(),
            template.script
        )
        .map_err(Stdio)?;
    }

    let max = catalog.iter().count();
    loop {
        write!(output, "Enter an action (0-{}). Quit with `{QUIT_OPTION}`: ", max - 1)
            .map_err(Stdio)?;
        flush(output)?;

        let Some(value) = read_input(input)? else {
            return Ok(ActionChoice::Quit);
        };

        if value.eq_ignore_ascii_case(QUIT_OPTION) {
            return Ok(ActionChoice::Quit);
        }

        match match_action(catalog, &value) {
            Some(action) => return Ok(ActionChoice::Action(action)),
            None => writeln!(output, "Invalid input. Please enter a valid index or action.")
                .map_err(Stdio)?,
        }
    }
}

/// Shows the numbered model menu and reads a choice by index or (fuzzy) name.
pub fn prompt_for_model<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    choices: &[String],
) -> Result<ModelChoice> {
    for (index, choice) in choices.iter().enumerate() {
        writeln!(output, "[{index}]: {choice}").map_err(Stdio)?;
    }

    loop {
        write!(
            output,
            "Enter a model (0-{}) or its name. Quit with `{QUIT_OPTION}`: ",
            choices.len().saturating_sub(1)
        )
        .map_err(Stdio)?;
        flush(output)?;

        let Some(value) = read_input(input)? else {
            return Ok(ModelChoice::Quit);
        };

        if value.eq_ignore_ascii_case(QUIT_OPTION) {
            return Ok(ModelChoice::Quit);
        }

        if let Ok(index) = value.parse::<usize>() {
            if let Some(choice) = choices.get(index) {
                return Ok(ModelChoice::Model(choice.clone()));
            }
            writeln!(
                output,
                "Index must be between 0 and {}",
                choices.len().saturating_sub(1)
            )
            .map_err(Stdio)?;
            continue;
        }

        match match_model(choices, &value) {
            Some(choice) => return Ok(ModelChoice::Model(choice.clone())),
            None => writeln!(output, "No model matches `{value}`.").map_err(Stdio)?,
        }
    }
}

/// Confirms with the user whether the script should be run.
pub fn confirm_run<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<bool> {
    loop {
        write!(output, "Are you sure you want to run? ([Y]es/[n]o): ").map_err(Stdio)?;
        flush(output)?;

        let Some(value) = read_input(input)? else {
            return Ok(false);
        };

        let value = value.to_lowercase();

        if value == "y" || value.is_empty() {
            return Ok(true);
        }

        if value == "n" {
            return Ok(false);
        }
    }
}
