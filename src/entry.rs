use miette::Diagnostic;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum EntryError {
    #[error("manifest entry '{entry}' is absolute")]
    #[diagnostic(
        code(skelly::entry::absolute),
        help("Manifest entries are resolved against the root directory and must be relative")
    )]
    Absolute { entry: String },

    #[error("manifest entry '{entry}' walks out of the root with '..'")]
    #[diagnostic(code(skelly::entry::parent_traversal))]
    ParentTraversal { entry: String },

    #[error("manifest entry '{entry}' does not name a file")]
    #[diagnostic(
        code(skelly::entry::missing_file_name),
        help("Every entry must end with a file name, e.g. '.github/workflows/.gitkeep'")
    )]
    MissingFileName { entry: String },
}

/// One manifest path split at its final separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The manifest path relative to the scaffold root, with `.` segments removed.
    pub path: PathBuf,
    /// Parent directory of `path`. `None` when the file lives directly in the root.
    pub directory: Option<PathBuf>,
    pub file_name: String,
}
impl Entry {
    pub fn parse(raw: &str) -> Result<Self, EntryError> {
        // `Path::components` folds a trailing "." into its parent, so check the raw text
        let last_segment = raw.rsplit(std::path::is_separator).next().unwrap_or_default();
        if last_segment.is_empty() || last_segment == "." {
            return Err(EntryError::MissingFileName {
                entry: raw.to_string(),
            });
        }

        let mut path = PathBuf::new();

        for component in Path::new(raw).components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {
                    return Err(EntryError::Absolute {
                        entry: raw.to_string(),
                    })
                }
                Component::ParentDir => {
                    return Err(EntryError::ParentTraversal {
                        entry: raw.to_string(),
                    })
                }
                Component::CurDir => {}
                Component::Normal(segment) => path.push(segment),
            }
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| EntryError::MissingFileName {
                entry: raw.to_string(),
            })?;

        let directory = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf);

        Ok(Self {
            path,
            directory,
            file_name,
        })
    }
}
