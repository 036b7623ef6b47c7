//! Post-generation bootstrap of the project's Go module.
//! Runs the host build tool inside the freshly generated project directory.

use crate::constants::DEFAULT_BUILD_TOOL;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Initializes and resolves a generated project's dependency manifest.
pub trait Bootstrapper {
    /// Bootstraps the project in `project_dir` under the name `module`.
    ///
    /// # Errors
    /// * `Error::BootstrapError` if any step cannot be started or fails.
    ///   Generated files are left in place either way.
    fn bootstrap(&self, project_dir: &Path, module: &str) -> Result<()>;
}

/// Runs `go mod init <module>` followed by `go mod tidy`.
pub struct GoModBootstrapper {
    /// Build tool executable, `go` unless overridden
    build_tool: PathBuf,
}

impl GoModBootstrapper {
    pub fn new<P: Into<PathBuf>>(build_tool: P) -> Self {
        Self {
            build_tool: build_tool.into(),
        }
    }

    /// The ordered argument lists this bootstrapper runs for `module`.
    pub fn steps(module: &str) -> Vec<Vec<String>> {
        vec![
            vec!["mod".to_string(), "init".to_string(), module.to_string()],
            vec!["mod".to_string(), "tidy".to_string()],
        ]
    }

    fn run_step(&self, project_dir: &Path, args: &[String]) -> Result<()> {
        let command = format!("{} {}", self.build_tool.display(), args.join(" "));
        log::debug!("Running '{}' in '{}'", command, project_dir.display());

        let output = Command::new(&self.build_tool)
            .args(args)
            .current_dir(project_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::BootstrapError {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("exited with {}", output.status),
                stderr => format!("exited with {}: {}", output.status, stderr),
            };
            return Err(Error::BootstrapError { command, reason });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            log::debug!("'{}' stdout: {}", command, stdout.trim());
        }
        Ok(())
    }
}

impl Default for GoModBootstrapper {
    fn default() -> Self {
        Self::new(DEFAULT_BUILD_TOOL)
    }
}

impl Bootstrapper for GoModBootstrapper {
    fn bootstrap(&self, project_dir: &Path, module: &str) -> Result<()> {
        for args in Self::steps(module) {
            self.run_step(project_dir, &args)?;
        }
        Ok(())
    }
}
