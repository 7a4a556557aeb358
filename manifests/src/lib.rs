use std::path::{Path, PathBuf};

pub mod config;
pub mod relation;
pub mod release;
pub mod upload;
pub mod validation;

pub use crate::{
    config::{ClientConfig, NewForConfig},
    relation::{DependencyType, Relation},
    release::VersionType,
    upload::{ProjectUpdate, UploadInputs, UploadRequest, VersionPayload},
    validation::{ValidationError, ValidationErrors},
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("[{file}] {err}")]
    WithSource { file: PathBuf, err: Box<Self> },
    #[error("config error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    #[error("validation errors: {0}")]
    ValidationErrors(#[from] ::validator::ValidationErrors),
    #[error("{0}")]
    UrlError(#[from] url::ParseError),
    #[error("{0}")]
    SerdeError(#[from] serde_json::Error),
}

impl Error {
    pub fn with_source(
        self,
        file: impl AsRef<Path>,
    ) -> Self {
        Self::WithSource {
            file: file.as_ref().to_path_buf(),
            err: Box::new(self),
        }
    }

    pub fn from_with_source_init<E: Into<Error>>(file: impl AsRef<Path>) -> impl FnOnce(E) -> Self {
        |err| err.into().with_source(file)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
