use crate::{
    entry::Entry,
    scaffold::{inspect, Existing, ScaffoldError},
};
use indexmap::IndexSet;
use std::path::{Path, PathBuf};

/// What a scaffold run would do to one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateDirectory,
    CreateFile,
    Keep,
}

/// A directory or file the scaffold run would touch, relative to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    pub path: PathBuf,
    /// Indicates whether this entry is a file (`true`) or a directory (`false`).
    pub is_file: bool,
    pub action: Action,
}

/// Read-only preview of a scaffold run.
///
/// Missing directories appear once, before the first file that needs them. Directories
/// that already exist are not listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub entries: Vec<PlannedEntry>,
}
impl Plan {
    /// Inspects `root` without modifying it.
    ///
    /// # Errors
    ///
    /// Fails on the same invalid entries and occupied paths a real run would reject,
    /// and when a path cannot be inspected.
    pub fn build<S: AsRef<str>>(root: &Path, paths: &[S]) -> Result<Self, ScaffoldError> {
        let mut planned_directories: IndexSet<PathBuf> = IndexSet::new();
        let mut entries = Vec::new();

        for raw in paths {
            let entry = Entry::parse(raw.as_ref())?;

            if let Some(directory) = &entry.directory {
                let mut ancestors: Vec<&Path> = directory
                    .ancestors()
                    .filter(|ancestor| !ancestor.as_os_str().is_empty())
                    .collect();
                ancestors.reverse();

                for ancestor in ancestors {
                    if root.join(ancestor).is_dir() || planned_directories.contains(ancestor) {
                        continue;
                    }

                    planned_directories.insert(ancestor.to_path_buf());

                    entries.push(PlannedEntry {
                        path: ancestor.to_path_buf(),
                        is_file: false,
                        action: Action::CreateDirectory,
                    });
                }
            }

            let action = match inspect(&root.join(&entry.path))? {
                Existing::Missing | Existing::Empty => Action::CreateFile,
                Existing::Populated => Action::Keep,
                Existing::Directory => {
                    return Err(ScaffoldError::OccupiedByDirectory { path: entry.path });
                }
            };

            entries.push(PlannedEntry {
                path: entry.path,
                is_file: true,
                action,
            });
        }

        Ok(Self { entries })
    }

    pub fn count(&self, action: Action) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.action == action)
            .count()
    }

    /// `true` when a run would not create anything.
    pub fn is_noop(&self) -> bool {
        self.entries.iter().all(|entry| entry.action == Action::Keep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_plan_on_empty_root() {
        let dir = tempfile::tempdir().unwrap();

        let plan = Plan::build(dir.path(), &["a/b/c.txt", "a/d.txt", "e.txt"]).unwrap();

        let paths: Vec<_> = plan.entries.iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("a"),
                PathBuf::from("a/b"),
                PathBuf::from("a/b/c.txt"),
                PathBuf::from("a/d.txt"),
                PathBuf::from("e.txt"),
            ]
        );
        assert_eq!(plan.count(Action::CreateDirectory), 2);
        assert_eq!(plan.count(Action::CreateFile), 3);
        assert!(!plan.is_noop());
    }

    #[test]
    fn test_plan_does_not_touch_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();

        Plan::build(dir.path(), &["src/app/__init__.py", "app.py"]).unwrap();

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_plan_skips_existing_directories_and_keeps_content() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::write(dir.path().join("config/config.yaml"), "key: value").unwrap();
        fs::write(dir.path().join("params.yaml"), "").unwrap();

        let plan = Plan::build(dir.path(), &["config/config.yaml", "params.yaml"]).unwrap();

        assert_eq!(
            plan.entries,
            vec![
                PlannedEntry {
                    path: PathBuf::from("config/config.yaml"),
                    is_file: true,
                    action: Action::Keep,
                },
                PlannedEntry {
                    path: PathBuf::from("params.yaml"),
                    is_file: true,
                    action: Action::CreateFile,
                },
            ]
        );
    }

    #[test]
    fn test_plan_is_noop_when_everything_has_content() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.py"), "print('hi')").unwrap();

        let plan = Plan::build(dir.path(), &["main.py"]).unwrap();

        assert!(plan.is_noop());
    }

    #[test]
    fn test_plan_rejects_directory_in_place_of_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("main.py")).unwrap();

        let result = Plan::build(dir.path(), &["main.py"]);

        assert!(matches!(
            result,
            Err(ScaffoldError::OccupiedByDirectory { .. })
        ));
    }
}
