use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Interpreter used on Windows hosts. Git-Bash has to be installed at exactly this location.
pub const WINDOWS_INTERPRETER: &str = r"C:\Program Files\Git\bin\bash.exe";

/// Interpreter used on Unix-like hosts.
pub const UNIX_INTERPRETER: &str = "sh";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Mac,
    Linux,
}

impl Platform {
    /// Classifies a host operating system name such as `windows`, `Mac OS X` or `linux`.
    #[must_use]
    pub fn from_os_name(os_name: &str) -> Self {
        let os_name = os_name.to_lowercase();

        if os_name.contains("windows") {
            Platform::Windows
        } else if os_name.contains("mac") {
            Platform::Mac
        } else {
            Platform::Linux
        }
    }

    #[must_use]
    pub fn interpreter(self) -> PathBuf {
        match self {
            Platform::Windows => PathBuf::from(WINDOWS_INTERPRETER),
            Platform::Mac | Platform::Linux => PathBuf::from(UNIX_INTERPRETER),
        }
    }
}

impl Display for Platform {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Windows => formatter.write_str("win"),
            Platform::Mac => formatter.write_str("mac"),
            Platform::Linux => formatter.write_str("linux"),
        }
    }
}

#[must_use]
pub fn resolve_interpreter(os_name: &str) -> (Platform, PathBuf) {
    let platform = Platform::from_os_name(os_name);
    (platform, platform.interpreter())
}

/// Picks the platform and interpreter for the host this binary runs on.
///
/// There is no discovery: if the fixed interpreter path is missing, spawning
/// the script fails and is reported like any other spawn failure.
#[must_use]
pub fn detect_interpreter() -> (Platform, PathBuf) {
    // `macos` from consts::OS still contains "mac"
    resolve_interpreter(std::env::consts::OS)
}
