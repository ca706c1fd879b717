//! Model discovery under a project's `src` tree.
//!
//! Purely informational: the names found here only populate the model
//! choices, so any filesystem failure degrades to an empty list.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use log::{debug, warn};

/// Choice offered ahead of discovered models; passed to scripts verbatim.
pub const ALL_MODELS: &str = "All Models";

const SOURCE_DIR_NAME: &str = "src";
const MODEL_DIR_NAME: &str = "model";

/// Finds the first directory named `model` under `project_root/src`, depth first,
/// visiting entries in name order.
#[must_use]
pub fn find_model_directory(project_root: &Path) -> Option<PathBuf> {
    let source_root = project_root.join(SOURCE_DIR_NAME);

    match search_model_directory(&source_root) {
        Ok(found) => found,
        Err(e) => {
            warn!(
                "Could not scan `{}` for a model directory: {e}",
                source_root.display()
            );
            None
        }
    }
}

fn search_model_directory(directory: &Path) -> io::Result<Option<PathBuf>> {
    for path in sorted_entries(directory)? {
        if !path.is_dir() {
            continue;
        }

        if path.file_name().is_some_and(|name| name == MODEL_DIR_NAME) {
            return Ok(Some(path));
        }

        if let Some(found) = search_model_directory(&path)? {
            return Ok(Some(found));
        }
    }

    Ok(None)
}

fn sorted_entries(directory: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(directory)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<io::Result<Vec<PathBuf>>>()?;
    entries.sort();
    Ok(entries)
}

/// Model names (file names without their last extension) in the project's
/// model directory, sorted and de-duplicated.
#[must_use]
pub fn list_models(project_root: &Path) -> Vec<String> {
    let Some(model_directory) = find_model_directory(project_root) else {
        debug!("No model directory under `{}`", project_root.display());
        return Vec::new();
    };

    match read_model_names(&model_directory) {
        Ok(models) => models,
        Err(e) => {
            warn!(
                "Could not list models in `{}`: {e}",
                model_directory.display()
            );
            Vec::new()
        }
    }
}

fn read_model_names(model_directory: &Path) -> io::Result<Vec<String>> {
    let mut models: IndexSet<String> = IndexSet::new();

    for path in sorted_entries(model_directory)? {
        if !path.is_file() {
            continue;
        }

        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            if !stem.is_empty() {
                models.insert(stem.to_string());
            }
        }
    }

    models.sort();
    Ok(models.into_iter().collect())
}

/// The selector's choices: [`ALL_MODELS`] followed by the discovered models.
#[must_use]
pub fn model_choices(project_root: &Path) -> Vec<String> {
    let mut choices = vec![ALL_MODELS.to_string()];
    choices.extend(list_models(project_root));
    choices
}
