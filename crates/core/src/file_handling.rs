//! File handling for microgen's YAML state.
//!
//! This module reads the optional action overrides file and reads/writes the
//! last run, which also remembers the last project directory.

use std::fs::{self, File};
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::actions::{ActionCatalog, ActionOverride, GenerateAction};
use crate::error::{Error, Result};

/// The action, model and project of the last triggered generation.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LastRun {
    pub action: GenerateAction,
    pub model: String,
    pub project_directory: String,
}

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    File::open(path).map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

fn get_last_run_reader(file_description: &str, path: &str) -> Result<Option<File>> {
    if !Path::exists(Path::new(path)) {
        return Ok(None);
    }

    get_reader(file_description, path).map(Some)
}

/// Reads the last run from disk. Returns `None` if the file doesn't exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or is not valid YAML.
pub fn get_last_run(last_run_path: &str) -> Result<Option<LastRun>> {
    let Some(reader) = get_last_run_reader("last run", last_run_path)? else {
        return Ok(None);
    };

    let last_run: serde_yaml::Result<LastRun> = serde_yaml::from_reader(reader);

    match last_run {
        Ok(last_run) => Ok(Some(last_run)),
        Err(e) => Err(Error::yaml_error(
            "reading".to_string(),
            "last run".to_string(),
            last_run_path.to_string(),
            e,
        )),
    }
}

/// Writes the last run to disk, creating the parent directory if needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or serialization fails.
pub fn write_last_run(path: &str, last_run: &LastRun) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::io_error("last run".to_string(), path.to_string(), e))?;
    }

    let f = File::create(path)
        .map_err(|e| Error::io_error("last run".to_string(), path.to_string(), e))?;

    serde_yaml::to_writer(f, last_run).map_err(|e| {
        Error::yaml_error(
            "writing".to_string(),
            "last run".to_string(),
            path.to_string(),
            e,
        )
    })
}

/// Reads action overrides. Returns `None` if the file doesn't exist.
///
/// The file maps action ids to partial entries:
///
/// ```yaml
/// test:
///   script: junit-generator.sh
/// dto:
///   success: "DTOs for {model} are ready"
/// ```
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn get_action_overrides(
    actions_path: &str,
) -> Result<Option<IndexMap<GenerateAction, ActionOverride>>> {
    if !Path::exists(Path::new(actions_path)) {
        return Ok(None);
    }

    let contents = fs::read_to_string(actions_path)
        .map_err(|e| Error::io_error("actions".to_string(), actions_path.to_string(), e))?;

    // A file with only comments is an empty override set
    if contents.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    }) {
        return Ok(Some(IndexMap::new()));
    }

    let overrides: IndexMap<GenerateAction, ActionOverride> = serde_yaml::from_str(&contents)
        .map_err(|e| {
            Error::yaml_error(
                "reading".to_string(),
                "actions".to_string(),
                actions_path.to_string(),
                e,
            )
        })?;

    Ok(Some(overrides))
}

/// Builds the action catalog, applying overrides from `actions_path` if that file exists.
///
/// # Errors
///
/// Returns an error if the overrides file is unreadable or yields an invalid entry.
pub fn load_action_catalog(actions_path: &str) -> Result<ActionCatalog> {
    match get_action_overrides(actions_path)? {
        Some(overrides) => ActionCatalog::with_overrides(&overrides),
        None => Ok(ActionCatalog::built_in()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn yaml_file(contents: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{contents}").unwrap();
        temp_file
    }

    #[test]
    fn test_write_and_read_last_run() {
        let directory = TempDir::new().unwrap();
        let path = directory.path().join("state/last_run.yml");
        let path = path.to_str().unwrap();

        let last_run = LastRun {
            action: GenerateAction::FullService,
            model: "User".to_string(),
            project_directory: "/work/shop".to_string(),
        };

        write_last_run(path, &last_run).unwrap();
        assert_eq!(get_last_run(path).unwrap(), Some(last_run));
    }

    #[test]
    fn test_last_run_yaml_uses_snake_case_action() {
        let temp_file = yaml_file("action: full_service\nmodel: Order\nproject_directory: /p\n");
        let last_run = get_last_run(temp_file.path().to_str().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(last_run.action, GenerateAction::FullService);
        assert_eq!(last_run.model, "Order");
    }

    #[test]
    fn test_get_last_run_file_not_exists() {
        let result = get_last_run("/this/path/does/not/exist.yml").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_get_last_run_invalid_yaml() {
        let temp_file = yaml_file("action: [");
        let result = get_last_run(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_get_action_overrides() {
        let temp_file = yaml_file(
            r#"
test:
  script: junit-generator.sh
dto:
  success: "DTOs for {model} are ready"
"#,
        );

        let overrides = get_action_overrides(temp_file.path().to_str().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(
            overrides[&GenerateAction::Test].script,
            Some("junit-generator.sh".to_string())
        );
        assert!(overrides[&GenerateAction::Dto].script.is_none());
    }

    #[test]
    fn test_get_action_overrides_empty_file() {
        let temp_file = yaml_file("");
        let overrides = get_action_overrides(temp_file.path().to_str().unwrap())
            .unwrap()
            .unwrap();
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_get_action_overrides_unknown_action() {
        let temp_file = yaml_file("frontend:\n  script: ng.sh\n");
        let result = get_action_overrides(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_load_action_catalog_without_file_is_built_in() {
        let catalog = load_action_catalog("/this/path/does/not/exist.yml").unwrap();
        let descriptor = catalog.resolve(GenerateAction::Dto, "User");
        assert_eq!(descriptor.script_file_name, "microservice-generator1.sh");
    }

    #[test]
    fn test_load_action_catalog_applies_overrides() {
        let temp_file = yaml_file("dto:\n  success: \"DTOs for {model} are ready\"\n");
        let catalog = load_action_catalog(temp_file.path().to_str().unwrap()).unwrap();
        let descriptor = catalog.resolve(GenerateAction::Dto, "User");
        assert_eq!(descriptor.success_message, "DTOs for User are ready");
        assert_eq!(descriptor.script_file_name, "microservice-generator1.sh");
    }

    #[test]
    fn test_load_action_catalog_rejects_invalid_template() {
        let temp_file = yaml_file("dto:\n  success: \"DTOs for {entity}\"\n");
        let result = load_action_catalog(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::UnknownTemplateKey(..))));
    }
}
