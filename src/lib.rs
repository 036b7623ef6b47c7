//! gokiln generates minimal Go command-line project skeletons.
//! It composes a fixed set of templates according to a few feature flags,
//! writes the result into a fresh project directory and bootstraps the Go
//! module there.

/// Command-line interface module for the gokiln application
pub mod cli;

/// Common constants
pub mod constants;

/// Error types and handling for the gokiln application
pub mod error;

/// Go module bootstrap after generation
pub mod bootstrap;

/// Writes a generation plan to disk
pub mod emitter;

/// Orchestration of a whole generation run
pub mod generator;

/// Feature flags and the directories and render jobs they imply
pub mod options;

/// Embedded template registry and rendering
pub mod renderer;

/// Project directory resolution
pub mod resolver;
