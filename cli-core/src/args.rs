use crate::progress::ProgressManager;

/// Shared progress configuration for CLI commands.
/// Use with `#[clap(flatten)]` in command arg structs.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct WithProgressConfig {
    /// Disable progress output (useful for CI/scripts)
    #[clap(long, default_value_t = false, help = "disable progress output")]
    pub no_progress: bool,
}

impl WithProgressConfig {
    pub fn progress_enabled(&self) -> bool {
        !self.no_progress
    }

    pub fn create_manager(&self) -> ProgressManager {
        ProgressManager::new(self.progress_enabled())
    }
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct WithConfig {
    #[clap(
        short = 'd',
        long = "config-dir",
        help = "directory holding an optional modrinth-upload.toml."
    )]
    pub config_dir: Option<String>,
}

/// Endpoint overrides, applied on top of the loaded configuration.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct WithEndpoints {
    #[clap(long, help = "the production api base url.")]
    pub api_url: Option<String>,

    #[clap(long, help = "the staging api base url.")]
    pub staging_api_url: Option<String>,
}
