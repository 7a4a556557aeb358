use std::path::{Path, PathBuf};

use tracing::Level;

pub fn logging() {
    use std::sync::Once;

    static ONCE: Once = Once::new();

    ONCE.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_test_writer()
            .init();
    });
}

/// A file on disk that lives as long as the value does.
pub struct Artifact {
    _dir: tempfile::TempDir,
    path: PathBuf,
}

impl Artifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn path_str(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

pub fn artifact(
    file_name: &str,
    contents: &[u8],
) -> Artifact {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(file_name);
    std::fs::write(&path, contents).expect("write artifact");

    Artifact { _dir: dir, path }
}
