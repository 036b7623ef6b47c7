//! Emission driver.
//! Writes a [`Plan`] to disk: directories first, then one file per render job.
//!
//! There is no rollback. When a step fails, everything written before it stays
//! on disk so the partial project can be inspected.

use crate::error::{Error, Result};
use crate::options::{Plan, RenderJob};
use crate::renderer::TemplateRenderer;
use log::debug;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

fn create_dir_all(path: &Path) -> Result<()> {
    debug!("Creating directory: {}", path.display());
    fs::create_dir_all(path)
        .map_err(|source| Error::DirectoryCreateError {
            path: path.to_path_buf(),
            source,
        })
}

/// Turns a render failure caused by the output file into `FileWriteError`.
fn into_write_error(path: &Path, err: Error) -> Error {
    match err {
        Error::TemplateRenderError { source, .. }
            if source.kind() == minijinja::ErrorKind::WriteFailure =>
        {
            Error::FileWriteError {
                path: path.to_path_buf(),
                source: io::Error::other(source),
            }
        }
        other => other,
    }
}

/// Creates the job's file, refusing to overwrite, then renders straight into it.
///
/// The handle lives only for this call and is closed on every return path.
fn write_job(renderer: &dyn TemplateRenderer, job: &RenderJob) -> Result<()> {
    let target = &job.target;
    debug!("Writing file: {} (template '{}')", target.display(), job.template);

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
        .map_err(|source| Error::FileCreateError {
            path: target.clone(),
            source,
        })?;

    let mut writer = BufWriter::new(file);
    renderer
        .render_to(&job.vars, &mut writer)
        .map_err(|err| into_write_error(target, err))?;
    writer.flush().map_err(|source| Error::FileWriteError {
        path: target.clone(),
        source,
    })
}

/// Executes a plan.
///
/// # Arguments
/// * `renderer` - Template engine used for every job
/// * `plan` - Directories and jobs to execute, in order
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Written files in emission order
///
/// # Errors
/// * `Error::DirectoryCreateError` on the first directory that cannot be made
/// * `Error::FileCreateError` if a target is unwritable or already exists
/// * `Error::TemplateRenderError` if a template rejects its bundle
/// * `Error::FileWriteError` if rendered output cannot be written
pub fn emit(renderer: &dyn TemplateRenderer, plan: &Plan) -> Result<Vec<PathBuf>> {
    for dir in &plan.directories {
        create_dir_all(dir)?;
    }

    let mut written = Vec::with_capacity(plan.jobs.len());
    for job in &plan.jobs {
        write_job(renderer, job)?;
        written.push(job.target.clone());
    }
    Ok(written)
}
