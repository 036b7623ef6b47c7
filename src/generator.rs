//! Generation run orchestration: resolve, plan, emit, bootstrap.

use crate::bootstrap::Bootstrapper;
use crate::emitter::emit;
use crate::error::Result;
use crate::options::{plan, FeatureFlags, Plan};
use crate::renderer::TemplateRenderer;
use crate::resolver::{normalize_module, resolve_project_dir};
use std::path::PathBuf;

/// Inputs of one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Module identifier, e.g. `github.com/acme/widget`
    pub module: String,
    /// Parent directory of the project; empty means the current directory
    pub output_dir: PathBuf,
    pub flags: FeatureFlags,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub project_dir: PathBuf,
    /// Written files in emission order
    pub files: Vec<PathBuf>,
}

/// Drives a generation run against a renderer and an optional bootstrapper.
pub struct Generator<'a> {
    renderer: &'a dyn TemplateRenderer,
    bootstrapper: Option<&'a dyn Bootstrapper>,
}

impl<'a> Generator<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        bootstrapper: Option<&'a dyn Bootstrapper>,
    ) -> Self {
        Self {
            renderer,
            bootstrapper,
        }
    }

    /// Resolves the project directory and computes the plan without writing.
    pub fn preview(&self, options: &GenerateOptions) -> Result<Plan> {
        self.prepare(options).map(|(_, plan)| plan)
    }

    fn prepare<'o>(&self, options: &'o GenerateOptions) -> Result<(&'o str, Plan)> {
        let module = normalize_module(&options.module)?;
        let project_dir = resolve_project_dir(module, &options.output_dir)?;
        Ok((module, plan(module, project_dir, &options.flags)?))
    }

    /// Generates the project described by `options`.
    ///
    /// # Flow
    /// 1. Validates the module identifier and strips trailing slashes
    /// 2. Resolves a project directory that does not exist yet
    /// 3. Computes directories and render jobs from the feature flags
    /// 4. Emits them, stopping at the first failure
    /// 5. Bootstraps the Go module, when a bootstrapper is configured
    ///
    /// A failure in step 4 or 5 leaves whatever was already written on disk.
    /// Concurrent runs for the same project directory are not synchronized;
    /// see [`resolve_project_dir`].
    pub fn generate(&self, options: &GenerateOptions) -> Result<Generated> {
        let (module, plan) = self.prepare(options)?;
        log::info!("Generating project in '{}'", plan.project_dir.display());

        let files = emit(self.renderer, &plan).inspect_err(|_| {
            log::error!("Partially generated project left in '{}'", plan.project_dir.display())
        })?;
        for file in &files {
            log::info!("Created '{}'", file.display());
        }

        match self.bootstrapper {
            Some(bootstrapper) => {
                log::info!("Bootstrapping module '{}'", module);
                bootstrapper.bootstrap(&plan.project_dir, module).inspect_err(|_| {
                    log::error!(
                        "Generated files in '{}' were kept; fix go.mod by hand",
                        plan.project_dir.display()
                    )
                })?;
            }
            None => log::debug!("Skipping bootstrap"),
        }

        Ok(Generated {
            project_dir: plan.project_dir,
            files,
        })
    }
}
