use crate::{
    entry::{Entry, EntryError},
    errors::{FileOperation, IoError},
};
use log::{Level, Log, Record};
use miette::Diagnostic;
use std::{
    fmt,
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ScaffoldError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidEntry(#[from] EntryError),

    #[error("'{path}' exists as a directory, expected a file")]
    #[diagnostic(
        code(skelly::scaffold::occupied_by_directory),
        help("Move the directory out of the way and run again")
    )]
    OccupiedByDirectory { path: PathBuf },

    #[error("{count} of {total} manifest entries could not be scaffolded", count = .failures.len())]
    #[diagnostic(code(skelly::scaffold::partial))]
    Partial {
        total: usize,
        #[related]
        failures: Vec<ScaffoldError>,
    },
}

/// What to do when one manifest entry fails.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    /// Stop at the first failure and return it.
    #[default]
    Abort,
    /// Log the failure, keep going, and return every failure at the end.
    Continue,
}

/// Summary of a single [`Scaffolder::ensure_skeleton`] run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// Files that were missing or empty and have been (re)created.
    pub created: Vec<PathBuf>,
    /// Files left untouched because they already had content.
    pub existing: Vec<PathBuf>,
    /// Number of directory-creation invocations, one per entry with a parent directory.
    pub directories: usize,
}

/// State of a manifest target on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Existing {
    Missing,
    Empty,
    Populated,
    Directory,
}

pub(crate) fn inspect(path: &Path) -> Result<Existing, IoError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(Existing::Directory),
        Ok(metadata) if metadata.len() == 0 => Ok(Existing::Empty),
        Ok(_) => Ok(Existing::Populated),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Existing::Missing),
        Err(error) => Err(IoError::new(
            FileOperation::Inspect,
            path.to_path_buf(),
            error,
        )),
    }
}

/// Ensures manifest paths exist under `root` as files, without ever touching a file
/// that already has content.
///
/// Every event is reported through the injected [`Log`] rather than the global logger.
pub struct Scaffolder<'a> {
    root: PathBuf,
    logger: &'a dyn Log,
    on_error: OnError,
}
impl<'a> Scaffolder<'a> {
    pub fn new(root: impl Into<PathBuf>, logger: &'a dyn Log) -> Self {
        Self {
            root: root.into(),
            logger,
            on_error: OnError::default(),
        }
    }

    pub fn on_error(mut self, policy: OnError) -> Self {
        self.on_error = policy;
        self
    }

    /// Processes `paths` in order.
    ///
    /// # Errors
    ///
    /// With [`OnError::Abort`] the first failing entry is returned and the rest of the
    /// list is left unprocessed. With [`OnError::Continue`] all failures are returned
    /// together as [`ScaffoldError::Partial`].
    pub fn ensure_skeleton<S: AsRef<str>>(
        &self,
        paths: &[S],
    ) -> Result<ScaffoldReport, ScaffoldError> {
        let mut report = ScaffoldReport::default();
        let mut failures = Vec::new();

        for raw in paths {
            let raw = raw.as_ref();

            if let Err(error) = self.ensure_entry(raw, &mut report) {
                match self.on_error {
                    OnError::Abort => return Err(error),
                    OnError::Continue => {
                        self.emit(Level::Error, format_args!("Skipping {}: {}", raw, error));
                        failures.push(error);
                    }
                }
            }
        }

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(ScaffoldError::Partial {
                total: paths.len(),
                failures,
            })
        }
    }

    fn ensure_entry(&self, raw: &str, report: &mut ScaffoldReport) -> Result<(), ScaffoldError> {
        let entry = Entry::parse(raw)?;

        if let Some(directory) = &entry.directory {
            let full_directory = self.root.join(directory);

            fs::create_dir_all(&full_directory)
                .map_err(|error| IoError::new(FileOperation::Mkdir, full_directory, error))?;

            report.directories += 1;

            self.emit(
                Level::Info,
                format_args!(
                    "Creating directory: {} for file: {}",
                    directory.display(),
                    entry.file_name
                ),
            );
        }

        let target = self.root.join(&entry.path);

        match inspect(&target)? {
            Existing::Missing | Existing::Empty => {
                File::create(&target)
                    .map_err(|error| IoError::new(FileOperation::Create, target, error))?;

                self.emit(
                    Level::Info,
                    format_args!("Creating empty file: {}", entry.path.display()),
                );

                report.created.push(entry.path);
            }
            Existing::Populated => {
                self.emit(
                    Level::Info,
                    format_args!("{} already exists", entry.file_name),
                );

                report.existing.push(entry.path);
            }
            Existing::Directory => {
                return Err(ScaffoldError::OccupiedByDirectory { path: entry.path });
            }
        }

        Ok(())
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        self.logger.log(
            &Record::builder()
                .args(args)
                .level(level)
                .target(module_path!())
                .build(),
        );
    }
}
