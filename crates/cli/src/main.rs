use clap::Parser;
use itertools::Itertools;
use log::{debug, info, warn};
use microgen_core::actions::{ActionCatalog, GenerateAction};
use microgen_core::error::Error::ModelNotFound;
use microgen_core::error::Result;
use microgen_core::file_handling::LastRun;
use microgen_core::settings::Settings;
use microgen_core::{config, file_handling, models, platform, staging};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use microgen_cli::cli_args::Args;
use microgen_cli::selection::{
    match_model, prompt_for_action, prompt_for_model, prompt_value, ActionChoice, ModelChoice,
};
use microgen_cli::session::{RunOutcome, Session};
use microgen_cli::terminal::Theme;

/// Handles the flags that only maintain the scripts root. Returns `true` if one was given.
fn run_maintenance(args: &Args, scripts_root: &Path, settings_path: &Path) -> Result<bool> {
    if let Some(resources_dir) = &args.stage {
        let copied = staging::stage_resources(&config::expand_path(resources_dir), scripts_root)?;
        println!("Staged {copied} file(s) into `{}`", scripts_root.display());
        return Ok(true);
    }

    if args.clean {
        if staging::remove_staged(scripts_root)? {
            println!("Removed `{}`", scripts_root.display());
        } else {
            println!("Nothing staged at `{}`", scripts_root.display());
        }
        return Ok(true);
    }

    if args.updates_settings() {
        let mut settings = Settings::load(settings_path)?;
        if let Some(generate_dependencies) = args.generate_dependencies {
            settings.generate_dependencies = generate_dependencies;
        }
        if let Some(dark_theme) = args.dark_theme {
            settings.dark_theme = dark_theme;
        }
        settings.save(settings_path)?;
        println!("Saved settings to `{}`", settings_path.display());
        return Ok(true);
    }

    Ok(false)
}

fn load_settings(settings_path: &Path) -> Settings {
    Settings::load(settings_path).unwrap_or_else(|e| {
        warn!("Using default settings: {e}");
        Settings::default()
    })
}

fn print_actions(catalog: &ActionCatalog) {
    for (index, (action, template)) in catalog.iter().enumerate() {
        println!(
            "[{index}]: {:<13} {:<16} {}",
            action.id(),
            action.label(),
            template.script
        );
    }
}

fn select_directory<R: BufRead, W: Write>(
    args: &Args,
    input: &mut R,
    output: &mut W,
    last_run: Option<&LastRun>,
) -> Result<Option<PathBuf>> {
    let directory = match &args.directory {
        Some(directory) => Some(directory.clone()),
        None => prompt_value(
            input,
            output,
            "Project directory",
            last_run.map(|last_run| last_run.project_directory.as_str()),
        )?,
    };

    Ok(directory.map(|directory| {
        let directory = config::expand_path(&directory);
        if !directory.is_dir() {
            warn!("Project directory `{}` does not exist", directory.display());
        }
        directory
    }))
}

fn select_model<R: BufRead, W: Write>(
    args: &Args,
    input: &mut R,
    output: &mut W,
    choices: &[String],
) -> Result<Option<String>> {
    if let Some(model) = &args.model {
        let matched = match_model(choices, model).ok_or_else(|| ModelNotFound(model.clone()))?;
        debug!("Model `{model}` matched `{matched}`");
        return Ok(Some(matched.clone()));
    }

    match prompt_for_model(input, output, choices)? {
        ModelChoice::Model(model) => Ok(Some(model)),
        ModelChoice::Quit => Ok(None),
    }
}

fn execute() -> Result<bool> {
    let args = Args::parse();
    let requested_action = args.get_action()?;

    let scripts_root = config::get_scripts_root(&args.scripts_root);
    let settings_path = config::get_settings_path(&scripts_root);
    debug!("Scripts root: `{}`", scripts_root.display());

    if run_maintenance(&args, &scripts_root, &settings_path)? {
        return Ok(true);
    }

    let settings = load_settings(&settings_path);
    debug!("Settings: {settings:?}");

    let actions_path = config::get_actions_path(&args.actions_path);
    debug!("Actions path: `{actions_path}`");
    let catalog = file_handling::load_action_catalog(&actions_path)?;

    if args.list_actions {
        print_actions(&catalog);
        return Ok(true);
    }

    let (platform, interpreter) = platform::detect_interpreter();
    debug!(
        "Platform `{platform}` runs scripts with `{}`",
        interpreter.display()
    );

    let last_run_path = config::get_last_run_path(&args.last_run_path);
    let last_run = file_handling::get_last_run(&last_run_path)?;

    let mut session = Session::new(
        catalog,
        interpreter,
        scripts_root,
        (!args.skip_save).then_some(last_run_path),
        Theme::from_settings(&settings),
    );
    session.dry_run = args.dry_run;
    session.force = args.force;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    if args.rerun_last {
        if let Some(last_run) = &last_run {
            let project_directory = config::expand_path(&last_run.project_directory);
            let outcome = session.run(
                &mut input,
                &mut output,
                last_run.action,
                &last_run.model,
                &project_directory,
            )?;
            return Ok(outcome != RunOutcome::Failed);
        }
        warn!("Rerun last was specified, but there is no previous run!");
    }

    let Some(project_directory) = select_directory(&args, &mut input, &mut output, last_run.as_ref())?
    else {
        return Ok(true);
    };

    let choices = models::model_choices(&project_directory);
    if args.list_models {
        println!("{}", choices.iter().skip(1).join("\n"));
        return Ok(true);
    }

    let Some(model) = select_model(&args, &mut input, &mut output, &choices)? else {
        return Ok(true);
    };

    if let Some(action) = requested_action {
        let outcome = session.run(&mut input, &mut output, action, &model, &project_directory)?;
        return Ok(outcome != RunOutcome::Failed);
    }

    loop {
        let action: GenerateAction =
            match prompt_for_action(&mut input, &mut output, &session.catalog)? {
                ActionChoice::Action(action) => action,
                ActionChoice::Quit => return Ok(true),
            };

        session.run(&mut input, &mut output, action, &model, &project_directory)?;

        if session.dry_run {
            return Ok(true);
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            info!("Generation failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
