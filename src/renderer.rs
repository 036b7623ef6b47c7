//! Template registry and rendering functionality for gokiln.
//! The Go source templates are embedded at compile time, parsed once into a
//! MiniJinja environment and rendered by name with a typed variable bundle.
use crate::error::{Error, Result};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use std::io::Write;
use std::sync::OnceLock;

/// The logical file kinds a project is made of.
///
/// The ordering is the emission order: core files before optional ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateName {
    Main,
    Root,
    Config,
    Logger,
}

impl TemplateName {
    pub const ALL: [TemplateName; 4] = [
        TemplateName::Main,
        TemplateName::Root,
        TemplateName::Config,
        TemplateName::Logger,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateName::Main => "main",
            TemplateName::Root => "root",
            TemplateName::Config => "config",
            TemplateName::Logger => "logger",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            TemplateName::Main => include_str!("../templates/main.go.j2"),
            TemplateName::Root => include_str!("../templates/root.go.j2"),
            TemplateName::Config => include_str!("../templates/config.go.j2"),
            TemplateName::Logger => include_str!("../templates/logger.go.j2"),
        }
    }
}

impl std::fmt::Display for TemplateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Variables of the `main` template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MainVars {
    pub module: String,
}

/// Variables of the `root` template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootVars {
    pub module: String,
    pub project_name: String,
    pub with_config: bool,
    pub default_config_bootstrap: bool,
    pub with_logger: bool,
}

/// Variables of the `config` template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigVars {
    pub project_name: String,
    pub default_config_bootstrap: bool,
    /// Adds a `log` section to the default config file.
    pub with_logger: bool,
}

/// Variables of the `logger` template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggerVars {
    /// Emits `NewLoggerByConfig`, which reads `log.*` keys through viper.
    pub with_config: bool,
}

/// A variable bundle tied to the template that expects it.
///
/// The variant decides which template is rendered, so a bundle can never be
/// paired with a template of a different schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TemplateVars {
    Main(MainVars),
    Root(RootVars),
    Config(ConfigVars),
    Logger(LoggerVars),
}

impl TemplateVars {
    pub fn template_name(&self) -> TemplateName {
        match self {
            TemplateVars::Main(_) => TemplateName::Main,
            TemplateVars::Root(_) => TemplateName::Root,
            TemplateVars::Config(_) => TemplateName::Config,
            TemplateVars::Logger(_) => TemplateName::Logger,
        }
    }
}

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders the template selected by `vars` with `vars` as its context.
    ///
    /// # Arguments
    /// * `vars` - Variable bundle of the template to render
    ///
    /// # Returns
    /// * `Result<String>` - Rendered Go source
    fn render(&self, vars: &TemplateVars) -> Result<String>;

    /// Streams the template selected by `vars` into `writer`.
    ///
    /// A failing writer surfaces as `Error::TemplateRenderError` whose source
    /// has kind `minijinja::ErrorKind::WriteFailure`.
    fn render_to(&self, vars: &TemplateVars, writer: &mut dyn Write) -> Result<()>;
}

/// Immutable set of parsed project templates.
pub struct TemplateRegistry {
    /// MiniJinja environment holding every template in `TemplateName::ALL`
    env: Environment<'static>,
}

impl TemplateRegistry {
    /// Parses every embedded template.
    ///
    /// Undefined variables are errors, block tags swallow their own line and
    /// nothing is escaped, since the output is Go source rather than markup.
    ///
    /// # Errors
    /// * `Error::TemplateRenderError` if an embedded template does not parse
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        for name in TemplateName::ALL {
            env.add_template(name.as_str(), name.source())
                .map_err(|source| render_error(name, source))?;
        }
        Ok(Self { env })
    }

    /// Returns the process-wide registry, parsing the templates on first use.
    pub fn global() -> Result<&'static TemplateRegistry> {
        static REGISTRY: OnceLock<TemplateRegistry> = OnceLock::new();
        if let Some(registry) = REGISTRY.get() {
            return Ok(registry);
        }
        let registry = TemplateRegistry::new()?;
        Ok(REGISTRY.get_or_init(|| registry))
    }

    fn template(&self, name: TemplateName) -> Result<minijinja::Template<'_, '_>> {
        self.env
            .get_template(name.as_str())
            .map_err(|source| render_error(name, source))
    }
}

fn render_error(name: TemplateName, source: minijinja::Error) -> Error {
    Error::TemplateRenderError {
        template: name.to_string(),
        source,
    }
}

impl TemplateRenderer for TemplateRegistry {
    fn render(&self, vars: &TemplateVars) -> Result<String> {
        let name = vars.template_name();
        self.template(name)?
            .render(vars)
            .map_err(|source| render_error(name, source))
    }

    fn render_to(&self, vars: &TemplateVars, writer: &mut dyn Write) -> Result<()> {
        let name = vars.template_name();
        self.template(name)?
            .render_to_write(vars, writer)
            .map(|_| ())
            .map_err(|source| render_error(name, source))
    }
}
