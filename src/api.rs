use crate::{
    errors::{FileOperation, IoError},
    manifest::{self, ProjectName, MANIFEST},
    plan::Plan,
    scaffold::{self, OnError, ScaffoldReport, Scaffolder},
};
use log::Log;
use std::path::Path;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum SkellyError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Manifest(#[from] manifest::ManifestError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Scaffold(#[from] scaffold::ScaffoldError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),
}

/// Scaffolds the project skeleton for `project` under `root`.
///
/// `root` is created first if it does not exist. Every directory and file event is
/// reported through `logger`.
///
/// # Errors
///
/// Returns a [`SkellyError`] if:
///
/// - `project` is not a valid Python package name.
/// - `root` or any skeleton directory cannot be created.
/// - A skeleton file cannot be inspected or created.
pub fn init(
    project: &str,
    root: &Path,
    on_error: OnError,
    logger: &dyn Log,
) -> Result<ScaffoldReport, SkellyError> {
    let project = ProjectName::new(project)?;

    let paths = manifest::resolve(MANIFEST, &project);

    std::fs::create_dir_all(root)
        .map_err(|error| IoError::new(FileOperation::Mkdir, root.to_path_buf(), error))?;

    log::debug!("scaffolding '{}' into: {}", project, root.display());

    let report = Scaffolder::new(root, logger)
        .on_error(on_error)
        .ensure_skeleton(paths.as_slice())?;

    log::debug!(
        "{} files created, {} left untouched",
        report.created.len(),
        report.existing.len()
    );

    Ok(report)
}

/// Computes what [`init`] would do without touching the filesystem.
///
/// # Errors
///
/// Returns a [`SkellyError`] if `project` is invalid or the tree under `root` cannot be
/// inspected.
pub fn dry_run(project: &str, root: &Path) -> Result<Plan, SkellyError> {
    let project = ProjectName::new(project)?;

    let paths = manifest::resolve(MANIFEST, &project);

    Ok(Plan::build(root, paths.as_slice())?)
}

/// Returns the skeleton paths for `project`, in manifest order.
pub fn list(project: &str) -> Result<Vec<String>, SkellyError> {
    let project = ProjectName::new(project)?;

    Ok(manifest::resolve(MANIFEST, &project))
}
