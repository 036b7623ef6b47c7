//! Feature flags and the option matrix.
//! Maps the three generator switches onto the directories a project needs and
//! the render jobs that fill them.

use crate::constants::{dirs, files};
use crate::error::Result;
use crate::renderer::{
    ConfigVars, LoggerVars, MainVars, RootVars, TemplateName, TemplateVars,
};
use crate::resolver::project_name;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// The optional subsystems scaffolded into a project.
///
/// Built once at the CLI boundary and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    with_config: bool,
    with_default_config_bootstrap: bool,
    with_logger: bool,
}

impl FeatureFlags {
    /// Creates a flag set.
    ///
    /// Default-config bootstrap only means something when configuration
    /// support is generated, so it is forced off when `with_config` is false.
    pub fn new(
        with_config: bool,
        with_default_config_bootstrap: bool,
        with_logger: bool,
    ) -> Self {
        if with_default_config_bootstrap && !with_config {
            log::warn!(
                "Default config bootstrap requires configuration support; ignoring it."
            );
        }
        Self {
            with_config,
            with_default_config_bootstrap: with_config && with_default_config_bootstrap,
            with_logger,
        }
    }

    pub fn with_config(&self) -> bool {
        self.with_config
    }

    pub fn with_default_config_bootstrap(&self) -> bool {
        self.with_default_config_bootstrap
    }

    pub fn with_logger(&self) -> bool {
        self.with_logger
    }

    /// Every distinct flag set a run can be started with.
    pub fn reachable() -> Vec<FeatureFlags> {
        let mut all = Vec::new();
        for with_config in [false, true] {
            for with_default_config_bootstrap in [false, true] {
                for with_logger in [false, true] {
                    let flags = Self {
                        with_config,
                        with_default_config_bootstrap,
                        with_logger,
                    };
                    if !with_default_config_bootstrap || with_config {
                        all.push(flags);
                    }
                }
            }
        }
        all
    }
}

impl Default for FeatureFlags {
    /// Configuration and logging on, default-config bootstrap off.
    fn default() -> Self {
        Self::new(true, false, true)
    }
}

/// One unit of work for the emission driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderJob {
    pub template: TemplateName,
    pub target: PathBuf,
    pub vars: TemplateVars,
}

impl RenderJob {
    fn new(target: PathBuf, vars: TemplateVars) -> Self {
        Self {
            template: vars.template_name(),
            target,
            vars,
        }
    }
}

/// Everything a generation run writes, in the order it is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub project_dir: PathBuf,
    pub directories: Vec<PathBuf>,
    pub jobs: Vec<RenderJob>,
}

/// Computes the directories and render jobs for a project.
///
/// # Arguments
/// * `module` - Module identifier, used for import paths
/// * `project_dir` - Directory the project is generated in
/// * `flags` - Optional subsystems to include
///
/// # Returns
/// * `Result<Plan>` - Directories ordered `cmd`, `config`, `logger` and jobs
///   ordered `main`, `root`, `config`, `logger`
///
/// Pure: the filesystem is not consulted.
pub fn plan<P: AsRef<Path>>(module: &str, project_dir: P, flags: &FeatureFlags) -> Result<Plan> {
    let project_dir = project_dir.as_ref();
    let project_name = project_name(module)?.to_string();

    let cmd_dir = project_dir.join(dirs::CMD);
    let config_dir = project_dir.join(dirs::CONFIG);
    let logger_dir = project_dir.join(dirs::LOGGER);

    let mut directories = vec![cmd_dir.clone()];
    let mut jobs = vec![
        RenderJob::new(
            project_dir.join(files::MAIN),
            TemplateVars::Main(MainVars {
                module: module.to_string(),
            }),
        ),
        RenderJob::new(
            cmd_dir.join(files::ROOT),
            TemplateVars::Root(RootVars {
                module: module.to_string(),
                project_name: project_name.clone(),
                with_config: flags.with_config,
                default_config_bootstrap: flags.with_default_config_bootstrap,
                with_logger: flags.with_logger,
            }),
        ),
    ];

    if flags.with_config {
        jobs.push(RenderJob::new(
            config_dir.join(files::CONFIG),
            TemplateVars::Config(ConfigVars {
                project_name,
                default_config_bootstrap: flags.with_default_config_bootstrap,
                with_logger: flags.with_logger,
            }),
        ));
        directories.push(config_dir);
    }

    if flags.with_logger {
        jobs.push(RenderJob::new(
            logger_dir.join(files::LOGGER),
            TemplateVars::Logger(LoggerVars {
                with_config: flags.with_config,
            }),
        ));
        directories.push(logger_dir);
    }

    Ok(Plan {
        project_dir: project_dir.to_path_buf(),
        directories,
        jobs,
    })
}
