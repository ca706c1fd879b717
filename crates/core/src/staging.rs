//! Staging of script resources into the scripts root.
//!
//! A resources directory holds `scripts/` (copied flat into the scripts root)
//! and optionally `static_files/` (copied recursively into `<root>/static`).

use std::fs;
use std::path::Path;

use log::info;

use crate::error::{Error, Result};

pub const SCRIPTS_RESOURCE_DIR: &str = "scripts";
pub const STATIC_RESOURCE_DIR: &str = "static_files";
pub const STATIC_TARGET_DIR: &str = "static";

fn io_error(description: &str, path: &Path, original: std::io::Error) -> Error {
    Error::io_error(description.to_string(), path.display().to_string(), original)
}

/// Copies script resources into `scripts_root`, returning the number of files copied.
///
/// # Errors
///
/// Returns an error if `resources_dir/scripts` is missing or any copy fails.
pub fn stage_resources(resources_dir: &Path, scripts_root: &Path) -> Result<usize> {
    let scripts_source = resources_dir.join(SCRIPTS_RESOURCE_DIR);
    if !scripts_source.is_dir() {
        return Err(Error::MissingScriptsDirectory(
            scripts_source.display().to_string(),
        ));
    }

    fs::create_dir_all(scripts_root)
        .map_err(|e| io_error("scripts root", scripts_root, e))?;

    let mut copied = copy_files(&scripts_source, scripts_root)?;

    let static_source = resources_dir.join(STATIC_RESOURCE_DIR);
    if static_source.is_dir() {
        copied += copy_tree(&static_source, &scripts_root.join(STATIC_TARGET_DIR))?;
    }

    info!(
        "Staged {copied} file(s) from `{}` into `{}`",
        resources_dir.display(),
        scripts_root.display()
    );
    Ok(copied)
}

fn copy_files(source: &Path, destination: &Path) -> Result<usize> {
    let mut copied = 0;

    let entries = fs::read_dir(source).map_err(|e| io_error("resource directory", source, e))?;
    for entry in entries {
        let path = entry
            .map_err(|e| io_error("resource directory", source, e))?
            .path();
        if !path.is_file() {
            continue;
        }

        if let Some(file_name) = path.file_name() {
            let target = destination.join(file_name);
            fs::copy(&path, &target).map_err(|e| io_error("staged file", &target, e))?;
            copied += 1;
        }
    }

    Ok(copied)
}

fn copy_tree(source: &Path, destination: &Path) -> Result<usize> {
    fs::create_dir_all(destination).map_err(|e| io_error("staging directory", destination, e))?;

    let mut copied = copy_files(source, destination)?;

    let entries = fs::read_dir(source).map_err(|e| io_error("resource directory", source, e))?;
    for entry in entries {
        let path = entry
            .map_err(|e| io_error("resource directory", source, e))?
            .path();
        if let (true, Some(name)) = (path.is_dir(), path.file_name()) {
            copied += copy_tree(&path, &destination.join(name))?;
        }
    }

    Ok(copied)
}

/// Removes the staged scripts root. Returns `false` if there was nothing to remove.
///
/// # Errors
///
/// Returns an error if the directory exists but cannot be removed.
pub fn remove_staged(scripts_root: &Path) -> Result<bool> {
    if !scripts_root.exists() {
        return Ok(false);
    }

    fs::remove_dir_all(scripts_root).map_err(|e| io_error("scripts root", scripts_root, e))?;
    info!("Removed `{}`", scripts_root.display());
    Ok(true)
}
