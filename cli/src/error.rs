use miette::Diagnostic;
use modup_manifests::ValidationErrors;

#[derive(thiserror::Error, Diagnostic, Debug)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    #[diagnostic(
        code(modup::config),
        help("check modrinth-upload.toml, MODRINTH_UPLOAD_* variables and the endpoint flags")
    )]
    Config(#[from] modup_manifests::Error),

    #[error("{0}")]
    #[diagnostic(code(modup::upload))]
    Client(#[from] modup_client::Error),

    #[error("could not write output: {0}")]
    #[diagnostic(code(modup::output))]
    Output(#[from] std::io::Error),
}

impl Error {
    /// Plain text for the workflow `::error::` annotation, where related
    /// diagnostics are not rendered.
    pub fn annotation(&self) -> String {
        match self {
            Self::Validation(errs) => errs.summary(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
