//! Command-line interface implementation for gokiln.
//! Provides argument parsing and help text formatting using clap.

use crate::{
    bootstrap::{Bootstrapper, GoModBootstrapper},
    constants::{exit_codes, verbosity, DEFAULT_BUILD_TOOL},
    error::Result,
    generator::{GenerateOptions, Generator},
    options::FeatureFlags,
    renderer::TemplateRegistry,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// Command-line arguments structure for gokiln.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "gokiln: Go CLI project skeleton generator", long_about = None)]
pub struct Args {
    /// Go module path of the new project, e.g. github.com/acme/widget
    #[arg(value_name = "MODULE")]
    pub module: String,

    /// Existing directory the project directory is created in (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Do not generate configuration loading support
    #[arg(long)]
    pub no_config: bool,

    /// Create a default config file in the per-user config directory on first run
    #[arg(long, conflicts_with = "no_config")]
    pub default_config: bool,

    /// Do not generate the logging subsystem
    #[arg(long)]
    pub no_logger: bool,

    /// Do not run `go mod init` and `go mod tidy` after generation
    #[arg(long)]
    pub skip_bootstrap: bool,

    /// Build tool used to bootstrap the module
    #[arg(long, value_name = "PATH", default_value = DEFAULT_BUILD_TOOL)]
    pub go_binary: PathBuf,

    /// Print the generation plan as JSON without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn flags(&self) -> FeatureFlags {
        FeatureFlags::new(!self.no_config, self.default_config, !self.no_logger)
    }

    pub fn options(&self) -> GenerateOptions {
        GenerateOptions {
            module: self.module.clone(),
            output_dir: self.output_dir.clone().unwrap_or_default(),
            flags: self.flags(),
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}

/// Main application logic execution.
///
/// With `--dry-run` the plan is printed and nothing is written. Otherwise the
/// project is generated and, unless `--skip-bootstrap` is given, its Go
/// module is initialized.
pub fn run(args: Args) -> Result<()> {
    let registry = TemplateRegistry::global()?;
    let bootstrapper = GoModBootstrapper::new(&args.go_binary);
    let bootstrapper = (!args.skip_bootstrap).then_some(&bootstrapper as &dyn Bootstrapper);
    let generator = Generator::new(registry, bootstrapper);
    let options = args.options();

    if args.dry_run {
        let plan = generator.preview(&options)?;
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let generated = generator.generate(&options)?;
    println!("Project generated successfully in {}.", generated.project_dir.display());
    Ok(())
}
