//! Generation actions and the catalog mapping them to scripts.
//!
//! Every [`GenerateAction`] resolves to a [`ScriptDescriptor`]: the script to
//! run plus the progress and success messages shown for a given model. The
//! built-in table can be partially overridden from YAML, see
//! [`crate::file_handling::get_action_overrides`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::interpolation::{render_model_message, validate_model_template};

/// Message used by the sentinel descriptor for unrecognised actions.
pub const GENERIC_ERROR_MESSAGE: &str = "Error occurred";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum GenerateAction {
    Dto,
    Mapper,
    Service,
    Controller,
    Repository,
    Exception,
    Test,
    FullService,
}

impl GenerateAction {
    pub const ALL: [GenerateAction; 8] = [
        GenerateAction::FullService,
        GenerateAction::Dto,
        GenerateAction::Mapper,
        GenerateAction::Service,
        GenerateAction::Controller,
        GenerateAction::Repository,
        GenerateAction::Exception,
        GenerateAction::Test,
    ];

    /// Identifier used on the command line and in YAML.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            GenerateAction::Dto => "dto",
            GenerateAction::Mapper => "mapper",
            GenerateAction::Service => "service",
            GenerateAction::Controller => "controller",
            GenerateAction::Repository => "repository",
            GenerateAction::Exception => "exception",
            GenerateAction::Test => "test",
            GenerateAction::FullService => "full_service",
        }
    }

    /// Human readable label for menus.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GenerateAction::Dto => "Generate DTOs",
            GenerateAction::Mapper => "Generate DTO Mappers",
            GenerateAction::Service => "Generate Service Layer",
            GenerateAction::Controller => "Generate Controller Layer",
            GenerateAction::Repository => "Generate Repository Layer",
            GenerateAction::Exception => "Generate Exception Classes",
            GenerateAction::Test => "Generate Tests",
            GenerateAction::FullService => "Generate Service",
        }
    }
}

impl Display for GenerateAction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.id())
    }
}

impl FromStr for GenerateAction {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_lowercase().replace('-', "_");

        GenerateAction::ALL
            .into_iter()
            .find(|action| action.id() == normalized)
            .ok_or_else(|| Error::UnknownAction(value.to_string()))
    }
}

/// What to run for an action and what to tell the user about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptDescriptor {
    pub script_file_name: String,
    pub success_message: String,
    pub progress_message: String,
}

impl ScriptDescriptor {
    /// Descriptor returned for an action that could not be recognised.
    #[must_use]
    pub fn generic_error() -> Self {
        Self {
            script_file_name: String::new(),
            success_message: GENERIC_ERROR_MESSAGE.to_string(),
            progress_message: GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// The sentinel descriptor has no script and must never be spawned.
    #[must_use]
    pub fn is_runnable(&self) -> bool {
        !self.script_file_name.is_empty()
    }
}

/// Script name and `{model}` message templates for one action.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ActionTemplate {
    pub script: String,
    pub success: String,
    pub progress: String,
}

impl ActionTemplate {
    fn new(script: &str, success: &str, progress: &str) -> Self {
        Self {
            script: script.to_string(),
            success: success.to_string(),
            progress: progress.to_string(),
        }
    }

    fn validate(&self, action: GenerateAction) -> Result<()> {
        if self.script.trim().is_empty() {
            return Err(Error::EmptyScriptName(action));
        }

        validate_model_template(action, &self.success)?;
        validate_model_template(action, &self.progress)
    }
}

/// Partial replacement for a built-in [`ActionTemplate`], as read from YAML.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOverride {
    pub script: Option<String>,
    pub success: Option<String>,
    pub progress: Option<String>,
}

impl ActionOverride {
    fn apply_to(&self, template: &mut ActionTemplate) {
        if let Some(script) = &self.script {
            template.script.clone_from(script);
        }
        if let Some(success) = &self.success {
            template.success.clone_from(success);
        }
        if let Some(progress) = &self.progress {
            template.progress.clone_from(progress);
        }
    }
}

fn built_in_template(action: GenerateAction) -> ActionTemplate {
    match action {
        GenerateAction::Dto => ActionTemplate::new(
            "microservice-generator1.sh",
            "DTOs for /{model} generated successfully!",
            "Generating DTOs for /{model}...",
        ),
        GenerateAction::Test => ActionTemplate::new(
            "test-generator.sh",
            "Tests for /{model} generated successfully!",
            "Generating Tests for /{model}...",
        ),
        GenerateAction::FullService => ActionTemplate::new(
            "microservice-generator2.sh",
            "Service structure for /{model} generated successfully!",
            "Generating service structure for /{model}...",
        ),
        GenerateAction::Mapper => ActionTemplate::new(
            "mapper-generator.sh",
            "DTO Mappers for /{model} generated successfully!",
            "Generating DTO Mappers for /{model}...",
        ),
        GenerateAction::Service => ActionTemplate::new(
            "service-generator.sh",
            "Service layer for /{model} generated successfully!",
            "Generating service layer for /{model}...",
        ),
        GenerateAction::Controller => ActionTemplate::new(
            "controller-generator.sh",
            "Controller layer for /{model} generated successfully!",
            "Generating controller layer for /{model}...",
        ),
        GenerateAction::Exception => ActionTemplate::new(
            "exception-generator.sh",
            "Exception classes for /{model} generated successfully!",
            "Generating exception classes for /{model}...",
        ),
        GenerateAction::Repository => ActionTemplate::new(
            "repository-generator.sh",
            "Repository layer for /{model} generated successfully!",
            "Generating repository layer for /{model}...",
        ),
    }
}

/// Lookup table from action to script template. Immutable once built.
#[derive(Debug, Clone)]
pub struct ActionCatalog {
    entries: IndexMap<GenerateAction, ActionTemplate>,
}

impl Default for ActionCatalog {
    fn default() -> Self {
        Self::built_in()
    }
}

impl ActionCatalog {
    #[must_use]
    pub fn built_in() -> Self {
        let entries = GenerateAction::ALL
            .into_iter()
            .map(|action| (action, built_in_template(action)))
            .collect();

        Self { entries }
    }

    /// Builds the catalog from the built-in table with `overrides` applied on top.
    ///
    /// # Errors
    ///
    /// Returns an error if an overridden entry ends up with an empty script name
    /// or a message template that does not parse or uses a placeholder other than `{model}`.
    pub fn with_overrides(overrides: &IndexMap<GenerateAction, ActionOverride>) -> Result<Self> {
        let mut catalog = Self::built_in();

        for (action, action_override) in overrides {
            let template = catalog
                .entries
                .entry(*action)
                .or_insert_with(|| built_in_template(*action));
            action_override.apply_to(template);
            template.validate(*action)?;
        }

        Ok(catalog)
    }

    #[must_use]
    pub fn template(&self, action: GenerateAction) -> Option<&ActionTemplate> {
        self.entries.get(&action)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GenerateAction, &ActionTemplate)> {
        self.entries.iter()
    }

    /// Resolves `action` for `model`. Never fails: a template that cannot be
    /// rendered falls back to the generic error message.
    #[must_use]
    pub fn resolve(&self, action: GenerateAction, model: &str) -> ScriptDescriptor {
        let Some(template) = self.entries.get(&action) else {
            return ScriptDescriptor::generic_error();
        };

        ScriptDescriptor {
            script_file_name: template.script.clone(),
            success_message: render_or_generic(&template.success, model),
            progress_message: render_or_generic(&template.progress, model),
        }
    }

    /// Resolves an action given by identifier. Unknown identifiers yield
    /// [`ScriptDescriptor::generic_error`].
    #[must_use]
    pub fn resolve_raw(&self, identifier: &str, model: &str) -> ScriptDescriptor {
        match identifier.parse::<GenerateAction>() {
            Ok(action) => self.resolve(action, model),
            Err(e) => {
                warn!("{e}");
                ScriptDescriptor::generic_error()
            }
        }
    }
}

fn render_or_generic(template: &str, model: &str) -> String {
    render_model_message(template, model).unwrap_or_else(|e| {
        warn!("Could not render message template `{template}`: {e}");
        GENERIC_ERROR_MESSAGE.to_string()
    })
}
