//! Project directory resolution.
//! Turns a module identifier and an output directory into the directory the
//! project will be generated in, refusing anything that would overwrite.

use crate::constants::{DEFAULT_OUTPUT_DIR, MODULE_PATTERN};
use crate::error::{Error, Result};
use log::debug;
use regex::Regex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn invalid_module(module: &str, reason: impl Into<String>) -> Error {
    Error::InvalidModule {
        module: module.to_string(),
        reason: reason.into(),
    }
}

fn module_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(MODULE_PATTERN).expect("MODULE_PATTERN is a valid regex"))
}

/// Checks that `module` can be used both as a Go module path and as the source
/// of a directory name.
///
/// # Errors
/// * `Error::InvalidModule` if the identifier is empty or absolute, contains
///   characters outside the module path alphabet or an empty segment (`//`),
///   or ends in `.`/`..`
pub fn validate_module(module: &str) -> Result<()> {
    if module.is_empty() {
        return Err(invalid_module(module, "must not be empty"));
    }
    if module.starts_with('/') {
        return Err(invalid_module(module, "must not start with '/'"));
    }
    if !module_pattern().is_match(module) {
        return Err(invalid_module(
            module,
            "only letters, digits, '.', '-', '_', '~' and '/' are allowed",
        ));
    }
    if module.trim_end_matches('/').contains("//") {
        return Err(invalid_module(module, "must not contain empty path segments"));
    }
    project_name(module).map(|_| ())
}

/// Validates `module` and strips its trailing slashes.
///
/// The result is what ends up in import paths and in `go mod init`, so
/// `github.com/acme/widget/` and `github.com/acme/widget` generate the same
/// project.
pub fn normalize_module(module: &str) -> Result<&str> {
    validate_module(module)?;
    Ok(module.trim_end_matches('/'))
}

/// Returns the last path segment of `module`, which names the project directory.
///
/// Trailing slashes are ignored, so `github.com/acme/widget/` yields `widget`.
/// An identifier without any separator is its own project name.
pub fn project_name(module: &str) -> Result<&str> {
    let name = module.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    match name {
        "" | "." | ".." => Err(invalid_module(module, "has no usable last path segment")),
        name => Ok(name),
    }
}

/// Like `Path::try_exists` but does not follow a final symlink, so a dangling
/// link still counts as taken.
fn path_exists(path: &Path) -> Result<bool> {
    match std::fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::IoError(e)),
    }
}

/// Resolves the directory a project for `module` would be generated in.
///
/// # Arguments
/// * `module` - Module identifier, e.g. `github.com/acme/widget`
/// * `output_dir` - Existing parent directory; empty means the current directory
///
/// # Returns
/// * `Result<PathBuf>` - `output_dir` joined with the module's last segment
///
/// # Errors
/// * `Error::OutputDirMissing` if `output_dir` does not exist
/// * `Error::OutputDirNotADirectory` if `output_dir` is a file
/// * `Error::ProjectDirExists` if the resolved directory is already there
///
/// Nothing on disk is touched. The check is not atomic with the later
/// directory creation: two runs racing for the same project directory can
/// both pass it, and the loser then fails with `Error::FileCreateError`.
pub fn resolve_project_dir<P: AsRef<Path>>(module: &str, output_dir: P) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    let output_dir = if output_dir.as_os_str().is_empty() {
        Path::new(DEFAULT_OUTPUT_DIR)
    } else {
        output_dir
    };

    if !path_exists(output_dir)? {
        return Err(Error::OutputDirMissing {
            output_dir: output_dir.display().to_string(),
        });
    }
    if !output_dir.is_dir() {
        return Err(Error::OutputDirNotADirectory {
            output_dir: output_dir.display().to_string(),
        });
    }

    let project_dir = output_dir.join(project_name(module)?);
    if path_exists(&project_dir)? {
        return Err(Error::ProjectDirExists {
            project_dir: project_dir.display().to_string(),
        });
    }

    debug!("Resolved project directory '{}'.", project_dir.display());
    Ok(project_dir)
}
