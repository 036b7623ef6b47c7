//! Error handling for gokiln.
//! Defines the error kinds a generation run can end with and the result alias
//! used throughout the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every way a generation run can fail.
///
/// None of these are retried. The first one raised is surfaced verbatim to the
/// user, and files already written before it stay on disk.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    #[error("Failed to serialize the generation plan. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Invalid module identifier '{module}': {reason}.")]
    InvalidModule { module: String, reason: String },

    #[error("Cannot proceed: output directory '{output_dir}' does not exist.")]
    OutputDirMissing { output_dir: String },

    #[error("Cannot proceed: output path '{output_dir}' is not a directory.")]
    OutputDirNotADirectory { output_dir: String },

    #[error("Cannot proceed: project directory '{project_dir}' already exists.")]
    ProjectDirExists { project_dir: String },

    #[error("Failed to create directory '{}'. Original error: {source}", path.display())]
    DirectoryCreateError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create file '{}'. Original error: {source}", path.display())]
    FileCreateError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write file '{}'. Original error: {source}", path.display())]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Only raised when a template and its variable bundle disagree, which is a
    /// defect in the crate rather than a user mistake.
    #[error("Failed to render template '{template}'. Original error: {source}")]
    TemplateRenderError {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    /// The build tool could not be started or exited unsuccessfully.
    #[error("Bootstrap command '{command}' failed: {reason}")]
    BootstrapError { command: String, reason: String },
}

/// Convenience type alias for Results with gokiln's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
