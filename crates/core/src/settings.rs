//! `settings.properties` stored beside the staged scripts.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

pub const GENERATE_DEPENDENCIES_KEY: &str = "generateDependencies";
pub const DARK_THEME_KEY: &str = "darkTheme";

const HEADER: &str = "#User Preferences";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub generate_dependencies: bool,
    pub dark_theme: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            generate_dependencies: false,
            dark_theme: true,
        }
    }
}

impl Settings {
    /// Parses properties text. Unknown keys are ignored, missing keys keep their defaults.
    #[must_use]
    pub fn parse(contents: &str) -> Self {
        let mut settings = Self::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let Some((key, value)) = line.split_once(['=', ':']) else {
                continue;
            };

            match key.trim() {
                GENERATE_DEPENDENCIES_KEY => settings.generate_dependencies = parse_bool(value),
                DARK_THEME_KEY => settings.dark_theme = parse_bool(value),
                other => debug!("Ignoring unknown setting `{other}`"),
            }
        }

        settings
    }

    #[must_use]
    pub fn to_properties(&self) -> String {
        format!(
            "{HEADER}\n{GENERATE_DEPENDENCIES_KEY}={}\n{DARK_THEME_KEY}={}\n",
            self.generate_dependencies, self.dark_theme
        )
    }

    /// Loads settings, falling back to defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            Error::io_error("settings".to_string(), path.display().to_string(), e)
        })?;
        Ok(Self::parse(&contents))
    }

    /// # Errors
    ///
    /// Returns an error if the file or its parent directory cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let io_error =
            |e: std::io::Error| Error::io_error("settings".to_string(), path.display().to_string(), e);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, self.to_properties()).map_err(io_error)
    }
}

fn parse_bool(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
