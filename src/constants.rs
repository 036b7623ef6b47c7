//! Common constants used throughout gokiln.

/// Output directory used when none is given
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Host build tool executable
pub const DEFAULT_BUILD_TOOL: &str = "go";

/// Characters allowed in a module identifier
pub const MODULE_PATTERN: &str = r"^[A-Za-z0-9._~/-]+$";

/// Subdirectories of the generated project
pub mod dirs {
    pub const CMD: &str = "cmd";
    pub const CONFIG: &str = "config";
    pub const LOGGER: &str = "logger";
}

/// Generated file names, relative to their directory
pub mod files {
    pub const MAIN: &str = "main.go";
    pub const ROOT: &str = "root.go";
    pub const CONFIG: &str = "config.go";
    pub const LOGGER: &str = "logger.go";
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
