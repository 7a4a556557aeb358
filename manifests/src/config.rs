use std::path::PathBuf;

use config::File;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use validator::Validate;

use crate::Error;

pub const DEFAULT_API_URL: &str = "https://api.modrinth.com/v2";
pub const DEFAULT_STAGING_API_URL: &str = "https://staging-api.modrinth.com/v2";
pub const DEFAULT_USER_AGENT: &str = "github.com/RubixDev/modrinth-upload";

pub trait NewForConfig
where
    Self: Sized + DeserializeOwned + Validate, {
    const NAME: &'static str;
    const ENV: &'static str;

    fn new<S: AsRef<str>>(dir: Option<S>) -> crate::Result<Self> {
        let file_name = format!(
            "{}",
            PathBuf::from(
                dir.map(|s| String::from(s.as_ref()))
                    .unwrap_or("./".into())
            )
            .join(Self::NAME)
            .display()
        );

        let this: Self = config::ConfigBuilder::<config::builder::DefaultState>::default()
            .add_source(File::with_name(&file_name).required(false))
            .add_source(config::Environment::with_prefix(Self::ENV))
            .build()
            .map_err(Error::from_with_source_init(file_name.clone()))?
            .try_deserialize()
            .map_err(Error::from_with_source_init(file_name.clone()))?;

        this.validate()
            .map_err(Error::from_with_source_init(file_name.clone()))?;

        tracing::debug!("loaded {} configuration from {file_name}", Self::NAME);

        Ok(this)
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

fn default_staging_api_url() -> String {
    DEFAULT_STAGING_API_URL.into()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.into()
}

/// Endpoints and identity used when talking to the package-hosting API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Validate)]
pub struct ClientConfig {
    /// Production API base, e.g. `https://api.modrinth.com/v2`
    #[validate(url)]
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Staging API base, selected when the `staging` input is true
    #[validate(url)]
    #[serde(default = "default_staging_api_url")]
    pub staging_api_url: String,

    #[validate(length(min = 1))]
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            staging_api_url: default_staging_api_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl NewForConfig for ClientConfig {
    const NAME: &'static str = "modrinth-upload";
    const ENV: &'static str = "MODRINTH_UPLOAD";
}

impl ClientConfig {
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        staging_api_url: Option<String>,
    ) -> crate::Result<Self> {
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        if let Some(staging_api_url) = staging_api_url {
            self.staging_api_url = staging_api_url;
        }
        self.validate()?;
        Ok(self)
    }

    /// Picks the endpoint for this invocation. The returned url always ends in
    /// `/` so that relative joins (`version`, `project/{id}`) extend the path.
    pub fn base_url(
        &self,
        staging: bool,
    ) -> crate::Result<url::Url> {
        let raw = if staging {
            &self.staging_api_url
        } else {
            &self.api_url
        };

        Ok(url::Url::parse(&format!(
            "{}/",
            raw.trim_end_matches('/')
        ))?)
    }
}
