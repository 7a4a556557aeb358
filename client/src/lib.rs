#![allow(clippy::result_large_err)]

use std::{path::PathBuf, sync::Arc};

use reqwest::{
    StatusCode,
    header::{AUTHORIZATION, HeaderValue},
    multipart::{Form, Part},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use tokio_util::io::ReaderStream;

use modup_manifests::{ClientConfig, ProjectUpdate, UploadRequest, upload::FILE_PART};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Request error: {}\nRequest body: {request_body}", error_chain(.source))]
    Transport {
        #[source]
        source: reqwest::Error,
        request_body: String,
    },
    #[error(
        "{}: {}\nResponse body:\n{response_body}\nRequest body: {request_body}",
        .status.as_u16(),
        .status.canonical_reason().unwrap_or_default()
    )]
    Status {
        status: StatusCode,
        response_body: String,
        request_body: String,
    },
    #[error("invalid response: {source}\nResponse body:\n{response_body}\nRequest body: {request_body}")]
    InvalidResponse {
        #[source]
        source: serde_json::Error,
        response_body: String,
        request_body: String,
    },
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Config(#[from] modup_manifests::Error),
    #[error("token is not a valid header value")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The part of the created version the tool republishes.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreatedVersion {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub version_number: Option<String>,
}

/// Joins an error with every source below it, so a transport failure shows
/// the underlying cause (`Connection refused` and the like).
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_msg = cause.to_string();
        if !out.contains(&cause_msg) {
            out.push_str(": ");
            out.push_str(&cause_msg);
        }
        source = cause.source();
    }
    out
}

fn id_as_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>, {
    match serde_json::Value::deserialize(de)? {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or numeric id, found {other}"
        ))),
    }
}

fn body_text(body: &bytes::Bytes) -> String {
    String::from_utf8_lossy(body).into_owned()
}

pub struct ModrinthClient {
    client: reqwest::Client,
    base_url: url::Url,
    token: SecretString,
}

impl ModrinthClient {
    pub fn new(
        config: &ClientConfig,
        staging: bool,
        token: SecretString,
    ) -> Result<Self, Error> {
        let base_url = config.base_url(staging)?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        tracing::debug!("using api at {base_url}");

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    pub fn url(
        &self,
        path: &str,
    ) -> Result<url::Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    /// The token is forwarded verbatim, without a `Bearer` prefix.
    fn authorization(&self) -> Result<HeaderValue, Error> {
        let mut value = HeaderValue::from_str(self.token.expose_secret())?;
        value.set_sensitive(true);
        Ok(value)
    }

    async fn file_part(
        &self,
        request: &UploadRequest,
    ) -> Result<Part, Error> {
        let io_err = |source| Error::Io {
            path: request.file_path.clone(),
            source,
        };

        let file = tokio::fs::File::open(&request.file_path)
            .await
            .map_err(io_err)?;
        let len = file.metadata().await.map_err(io_err)?.len();

        Ok(Part::stream_with_length(reqwest::Body::wrap_stream(ReaderStream::new(file)), len)
            .file_name(request.file_name())
            .mime_str("application/octet-stream")?)
    }

    /// Creates a new version. Only `200 OK` counts as success.
    pub async fn upload_version(
        &self,
        request: &UploadRequest,
    ) -> Result<CreatedVersion, Error> {
        let data = request.payload().to_json()?;
        tracing::debug!("Request body: {data}");

        let form = Form::new()
            .text("data", data.clone())
            .part(FILE_PART, self.file_part(request).await?);

        let resp = self
            .client
            .post(self.url("version")?)
            .header(AUTHORIZATION, self.authorization()?)
            .multipart(form)
            .send()
            .await
            .map_err(|source| {
                Error::Transport {
                    source,
                    request_body: data.clone(),
                }
            })?;

        let status = resp.status();
        tracing::debug!("Response code: {}", status.as_u16());

        let body = resp.bytes().await.map_err(|source| {
            Error::Transport {
                source,
                request_body: data.clone(),
            }
        })?;

        if status != StatusCode::OK {
            return Err(Error::Status {
                status,
                response_body: body_text(&body),
                request_body: data,
            });
        }

        tracing::debug!("Response body:\n{}", body_text(&body));

        serde_json::from_slice(&body).map_err(|source| {
            Error::InvalidResponse {
                source,
                response_body: body_text(&body),
                request_body: data,
            }
        })
    }

    /// Replaces the long-form description of a project.
    pub async fn modify_project_body(
        &self,
        update: &ProjectUpdate,
    ) -> Result<(), Error> {
        let url = self.url(&format!("project/{}", update.project_id))?;

        let resp = self
            .client
            .patch(url)
            .header(AUTHORIZATION, self.authorization()?)
            .json(update)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body = resp.bytes().await?;
        Err(Error::Status {
            status,
            response_body: body_text(&body),
            request_body: serde_json::to_string(update)?,
        })
    }

    /// Dispatches the project update on its own task. The caller decides
    /// whether and when to await it; the outcome never feeds into the upload.
    pub fn spawn_project_update(
        self: &Arc<Self>,
        update: ProjectUpdate,
    ) -> tokio::task::JoinHandle<Result<(), Error>> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.modify_project_body(&update).await })
    }
}
