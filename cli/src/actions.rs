//! Workflow commands understood by GitHub Actions runners.

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

const MULTILINE_DELIMITER: &str = "MODRINTH_UPLOAD_EOF";

/// Escapes a message for use in a `::command::message` line.
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Formats an `::error::` annotation that fails the step visibly.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Where step outputs go: the `GITHUB_OUTPUT` file when the runner provides
/// one, and stdout in every case.
#[derive(Debug, Clone, Default)]
pub struct Outputs {
    file: Option<PathBuf>,
}

impl Outputs {
    pub fn from_env() -> Self {
        Self {
            file: std::env::var_os("GITHUB_OUTPUT")
                .filter(|it| !it.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn to_file(path: impl AsRef<Path>) -> Self {
        Self {
            file: Some(path.as_ref().to_path_buf()),
        }
    }

    pub fn stdout_only() -> Self {
        Self { file: None }
    }

    pub fn set(
        &self,
        name: &str,
        value: &str,
    ) -> std::io::Result<()> {
        if let Some(path) = &self.file {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            file.write_all(format_output(name, value).as_bytes())?;
        }

        println!("{name}={value}");
        tracing::debug!("set output {name}");
        Ok(())
    }
}

fn format_output(
    name: &str,
    value: &str,
) -> String {
    if value.contains('\n') {
        format!("{name}<<{MULTILINE_DELIMITER}\n{value}\n{MULTILINE_DELIMITER}\n")
    } else {
        format!("{name}={value}\n")
    }
}
