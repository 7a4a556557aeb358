use std::{fmt::Display, path::PathBuf};

use miette::Diagnostic;

#[derive(thiserror::Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("specified file at {} does not exist", .path.display())]
    #[diagnostic(
        code(modup::input::missing_file),
        help("check `file_path`; it is resolved relative to the working directory")
    )]
    MissingFile { path: PathBuf },

    #[error("input required and not supplied: {name}")]
    #[diagnostic(code(modup::input::required))]
    MissingInput { name: &'static str },

    #[error(
        "invalid relation type: {given} (valid values: \"required\", \"optional\", \"incompatible\", \"embedded\")"
    )]
    #[diagnostic(code(modup::input::relation_type))]
    InvalidRelationType { given: String },

    #[error("relation '{token}' has no dependency type")]
    #[diagnostic(
        code(modup::input::relation_type),
        help("relations are written as `project_id:dependency_type`")
    )]
    MissingRelationType { token: String },

    #[error("invalid release type: {given} (valid values: \"alpha\", \"beta\", \"release\")")]
    #[diagnostic(code(modup::input::release_type))]
    InvalidReleaseType { given: String },
}

/// Every problem found while validating one set of inputs.
///
/// A single error renders as that error. Several render as a count, with
/// each error attached as a related diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// One line per error, for places that only show plain text.
    pub fn summary(&self) -> String {
        match self.errors.as_slice() {
            [single] => single.to_string(),
            errors => {
                let mut out = self.to_string();
                for err in errors {
                    out.push_str(&format!("\n  - {err}"));
                }
                out
            },
        }
    }
}

impl Display for ValidationErrors {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self.errors.as_slice() {
            [single] => write!(f, "{single}"),
            errors => write!(f, "{} invalid inputs", errors.len()),
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl Diagnostic for ValidationErrors {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        match self.errors.as_slice() {
            [single] => single.code(),
            _ => Some(Box::new("modup::input::invalid")),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        match self.errors.as_slice() {
            [single] => single.help(),
            _ => None,
        }
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        match self.errors.as_slice() {
            [] | [_] => None,
            errors => Some(Box::new(errors.iter().map(|it| it as &dyn Diagnostic))),
        }
    }
}
