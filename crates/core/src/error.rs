use leon::{ParseError, RenderError};
use thiserror::Error;

use crate::actions::GenerateAction;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error starting generation script: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error parsing message template: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering message template: {}", .0)]
    Render(#[from] RenderError),

    #[error("Unknown generate action: `{}`", .0)]
    UnknownAction(String),

    #[error("Script name for action `{}` may not be empty", .0)]
    EmptyScriptName(GenerateAction),

    #[error("Message template for action `{}` uses unknown placeholder `{}` (only `{{model}}` is available)", .0, .1)]
    UnknownTemplateKey(GenerateAction, String),

    #[error("No model matching `{}` was found", .0)]
    ModelNotFound(String),

    #[error("Rerun flag specified together with an action is invalid.")]
    RerunWithAction,

    #[error("A generation script is already running; wait for it to finish.")]
    GenerationInFlight,

    #[error("No generation script is running.")]
    NothingInFlight,

    #[error("Scripts directory not found at `{}`", .0)]
    MissingScriptsDirectory(String),

    #[error("STDIO error: {}", .0)]
    Stdio(std::io::Error),
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
