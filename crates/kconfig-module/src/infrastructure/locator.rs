//! `PATH` lookup for the external tools.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::application::operator::{BinaryLocator, ModuleError};

/// Searched after `PATH`, which often omits them for non-root users.
const SBIN_DIRS: [&str; 3] = ["/sbin", "/usr/sbin", "/usr/local/sbin"];

/// Finds executables on a search path.
///
/// A name containing a path separator is not searched: it is accepted as-is
/// when it points to an executable file.
#[derive(Debug, Clone)]
pub struct PathLocator {
    search_path: Option<OsString>,
}

impl PathLocator {
    /// Uses the process's `PATH`.
    pub fn from_env() -> Self {
        Self {
            search_path: std::env::var_os("PATH"),
        }
    }

    /// Uses an explicit search path (same syntax as `PATH`).
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    /// Absolute search path entries followed by the `sbin` directories.
    ///
    /// Empty and relative components are dropped so a match is never
    /// resolved against the working directory.
    fn entries(&self) -> Vec<PathBuf> {
        let mut entries: Vec<PathBuf> = self
            .search_path
            .as_ref()
            .map(|p| {
                std::env::split_paths(p)
                    .filter(|dir| dir.is_absolute())
                    .collect()
            })
            .unwrap_or_default();

        for sbin in SBIN_DIRS {
            let sbin = PathBuf::from(sbin);
            if !entries.contains(&sbin) {
                entries.push(sbin);
            }
        }
        entries
    }

    fn describe_search_path(&self) -> String {
        let entries = self.entries();
        match std::env::join_paths(&entries) {
            Ok(joined) => joined.to_string_lossy().into_owned(),
            Err(_) => entries
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(":"),
        }
    }
}

impl BinaryLocator for PathLocator {
    fn locate(&self, name: &str) -> Result<PathBuf, ModuleError> {
        let found = if name.contains(std::path::MAIN_SEPARATOR) || name.contains('/') {
            let candidate = PathBuf::from(name);
            is_executable(&candidate).then_some(candidate)
        } else {
            self.entries().into_iter().find_map(|dir| {
                let candidate = dir.join(name);
                is_executable(&candidate).then_some(candidate)
            })
        };

        match found {
            Some(path) => {
                debug!(name, path = %path.display(), "located executable");
                Ok(path)
            }
            None => Err(ModuleError::MissingExecutable {
                name: name.to_string(),
                search_path: self.describe_search_path(),
            }),
        }
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
