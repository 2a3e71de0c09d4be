use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

/// Token replaced by the project name in every manifest template.
pub const PROJECT_PLACEHOLDER: &str = "{project}";

pub const DEFAULT_PROJECT_NAME: &str = "textSummarizer";

/// The skeleton of a packaged Python project with a `src/` layout.
pub const MANIFEST: &[&str] = &[
    ".github/workflows/.gitkeep",
    "src/{project}/__init__.py",
    "src/{project}/components/__init__.py",
    "src/{project}/utils/__init__.py",
    "src/{project}/utils/common.py",
    "src/{project}/logging/__init__.py",
    "src/{project}/config/__init__.py",
    "src/{project}/config/configuration.py",
    "src/{project}/pipeline/__init__.py",
    "src/{project}/entity/__init__.py",
    "src/{project}/constants/__init__.py",
    "config/config.yaml",
    "params.yaml",
    "app.py",
    "main.py",
    "Dockerfile",
    "requirements.txt",
    "setup.py",
    "research/trials.ipynb",
];

#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    #[error("invalid project name: '{name}'")]
    #[diagnostic(
        code(skelly::manifest::invalid_project_name),
        help("The project name becomes a Python package: use letters, digits and '_', not starting with a digit")
    )]
    InvalidProjectName { name: String },
}

/// Name substituted for [`PROJECT_PLACEHOLDER`]. Always a valid Python identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);
impl ProjectName {
    pub fn new(name: &str) -> Result<Self, ManifestError> {
        lazy_static::lazy_static! {
            static ref PACKAGE_NAME_REGEX: regex::Regex =
                regex::Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("a valid regex pattern");
        }

        if PACKAGE_NAME_REGEX.is_match(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(ManifestError::InvalidProjectName {
                name: name.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl Default for ProjectName {
    fn default() -> Self {
        Self(DEFAULT_PROJECT_NAME.to_string())
    }
}
impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Substitutes `project` into each template, keeping manifest order.
pub fn resolve(templates: &[&str], project: &ProjectName) -> Vec<String> {
    templates
        .iter()
        .map(|template| template.replace(PROJECT_PLACEHOLDER, project.as_str()))
        .collect()
}
