use std::sync::Arc;

use modup_cli_core::{WithConfig, WithEndpoints, WithProgressConfig, prefixes};
use modup_client::{CreatedVersion, ModrinthClient};
use modup_manifests::{ClientConfig, NewForConfig, UploadInputs, UploadRequest, ValidationError};
use secrecy::{ExposeSecret, SecretString};

use crate::actions::Outputs;

#[derive(Default, clap::ValueEnum, Clone, Debug)]
pub enum LogLevel {
    Debug,
    Trace,
    #[default]
    Info,
    Error,
    Warn,
}

impl From<LogLevel> for tracing::Level {
    fn from(val: LogLevel) -> Self {
        match val {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
        }
    }
}

/// Uploads a new version of a project to Modrinth.
///
/// Every input can be given as a flag or through the `INPUT_*` variable a
/// GitHub Actions runner sets for an action input of the same name.
#[derive(clap::Parser, Debug, Clone)]
#[clap(name = "modrinth-upload", args_override_self = true)]
pub struct Cli {
    #[clap(
        long,
        global = true,
        default_value = "info",
        env = "LOG_LEVEL",
        help = "the verbosity level to print logs at."
    )]
    pub log_level: LogLevel,

    #[clap(flatten)]
    config: WithConfig,

    #[clap(flatten)]
    endpoints: WithEndpoints,

    #[clap(flatten)]
    progress: WithProgressConfig,

    #[clap(flatten)]
    upload: UploadArgs,
}

#[derive(clap::Args, Debug, Clone)]
struct UploadArgs {
    #[clap(
        long,
        env = "INPUT_TOKEN",
        hide_env_values = true,
        help = "the API token, sent verbatim as the Authorization header."
    )]
    token: Option<SecretString>,

    #[clap(long, env = "INPUT_FILE_PATH", default_value = "", help = "the artifact to upload.")]
    file_path: String,

    #[clap(long, env = "INPUT_NAME", default_value = "", help = "display name of the version.")]
    name: String,

    #[clap(long, env = "INPUT_VERSION", default_value = "", help = "the version number.")]
    version: String,

    #[clap(long, env = "INPUT_CHANGELOG", default_value = "")]
    changelog: String,

    #[clap(
        long,
        env = "INPUT_RELATIONS",
        default_value = "",
        help = "comma separated `project_id:dependency_type` pairs."
    )]
    relations: String,

    #[clap(
        long,
        env = "INPUT_GAME_VERSIONS",
        default_value = "",
        help = "comma separated game versions."
    )]
    game_versions: String,

    #[clap(
        long,
        env = "INPUT_RELEASE_TYPE",
        default_value = "",
        help = "alpha, beta or release (default)."
    )]
    release_type: String,

    #[clap(long, env = "INPUT_LOADERS", default_value = "", help = "comma separated loaders.")]
    loaders: String,

    #[clap(long, env = "INPUT_FEATURED", default_value = "")]
    featured: String,

    #[clap(long, env = "INPUT_PROJECT_ID", default_value = "")]
    project_id: String,

    #[clap(
        long,
        env = "INPUT_STAGING",
        default_value = "",
        help = "if true, upload to the staging api."
    )]
    staging: String,

    #[clap(
        long,
        env = "INPUT_NEW_PROJECT_BODY",
        default_value = "",
        help = "if set, replaces the project description."
    )]
    new_project_body: String,
}

impl UploadArgs {
    fn inputs(&self) -> UploadInputs {
        UploadInputs {
            file_path: self.file_path.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
            changelog: self.changelog.clone(),
            relations: self.relations.clone(),
            game_versions: self.game_versions.clone(),
            release_type: self.release_type.clone(),
            loaders: self.loaders.clone(),
            featured: self.featured.clone(),
            project_id: self.project_id.clone(),
            staging: self.staging.clone(),
            new_project_body: self.new_project_body.clone(),
        }
    }

    fn validate(&self) -> crate::Result<(SecretString, UploadRequest)> {
        let token = self
            .token
            .clone()
            .filter(|it| !it.expose_secret().is_empty());

        match (token, self.inputs().validate()) {
            (Some(token), Ok(request)) => Ok((token, request)),
            (token, result) => {
                let mut errors = vec![];
                if token.is_none() {
                    errors.push(ValidationError::MissingInput { name: "token" });
                }
                if let Err(errs) = result {
                    errors.extend(errs.into_errors());
                }
                Err(modup_manifests::ValidationErrors::new(errors).into())
            },
        }
    }
}

impl Cli {
    pub async fn run(
        self,
        outputs: &Outputs,
    ) -> crate::Result<CreatedVersion> {
        let progress = self.progress.create_manager();

        progress.println(prefixes::VALIDATING, "inputs");
        let (token, request) = self.upload.validate()?;

        let config = ClientConfig::new(self.config.config_dir.as_deref())?
            .with_overrides(self.endpoints.api_url, self.endpoints.staging_api_url)?;

        let client = Arc::new(ModrinthClient::new(&config, request.staging, token)?);

        let project_update = request.project_update().map(|update| {
            progress.println(prefixes::UPDATING, &format!("project {}", update.project_id));
            client.spawn_project_update(update)
        });

        progress.println(
            prefixes::UPLOADING,
            &format!("{} {}", request.name, request.version_number),
        );
        let spinner = progress.add_spinner(prefixes::UPLOADING);
        spinner.set_message(request.file_name());

        let uploaded = client.upload_version(&request).await;
        spinner.finish_and_clear();

        if let Some(handle) = project_update {
            settle_project_update(handle, &progress).await;
        }

        let created = uploaded?;
        tracing::info!(
            "Published {}@{} as {}",
            request.name,
            created
                .version_number
                .as_deref()
                .unwrap_or(&request.version_number),
            created.id
        );

        outputs.set("id", &created.id)?;

        progress.complete(format!("{} ({})", request.version_number, created.id));
        Ok(created)
    }
}

/// Awaits the description update and logs how it went. Its outcome never
/// changes the result of the upload.
async fn settle_project_update(
    handle: tokio::task::JoinHandle<Result<(), modup_client::Error>>,
    progress: &modup_cli_core::ProgressManager,
) {
    match handle.await {
        Ok(Ok(())) => tracing::info!("Updated project body"),
        Ok(Err(e)) => {
            tracing::warn!("Failed to update project body: {e}");
            progress.warn("project body was not updated");
        },
        Err(e) => tracing::warn!("Project body update did not complete: {e}"),
    }
}
