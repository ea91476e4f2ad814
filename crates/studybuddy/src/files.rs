//! on-disk storage for uploaded resource files.
//!
//! files live under `<media root>/resources/` with a generated name of the form
//! `<16 hex chars>_<sanitised original name>`. resources keep the path relative
//! to the media root.

use std::path::{Component, Path, PathBuf};

use rand::Rng;
use tokio::fs;
use tracing::{debug, warn};

/// directory under the media root holding resource files.
const RESOURCE_DIR: &str = "resources";

/// longest kept part of the original file name.
const MAX_NAME_LEN: usize = 100;

/// errors from the file store.
#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    /// the upload exceeded the configured limit
    #[error("file is larger than {limit} bytes")]
    TooLarge {
        /// the configured limit
        limit: usize,
    },
    /// the stored path is not inside the media root
    #[error("invalid stored path: {0}")]
    InvalidPath(String),
    /// filesystem failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// stores uploaded files under a media root.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    max_bytes: usize,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    /// the configured upload limit.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// write an upload and return its path relative to the media root.
    pub async fn store(&self, original_name: &str, data: &[u8]) -> Result<String, FileStoreError> {
        if data.len() > self.max_bytes {
            return Err(FileStoreError::TooLarge {
                limit: self.max_bytes,
            });
        }

        let prefix: [u8; 8] = rand::rng().random();
        let relative = format!(
            "{RESOURCE_DIR}/{}_{}",
            hex::encode(prefix),
            sanitize_file_name(original_name)
        );

        let dir = self.root.join(RESOURCE_DIR);
        fs::create_dir_all(&dir).await?;
        fs::write(self.root.join(&relative), data).await?;

        debug!(path = %relative, bytes = data.len(), "file stored");
        Ok(relative)
    }

    /// absolute path of a stored file.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, FileStoreError> {
        let path = Path::new(relative);
        let safe = path
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || relative.is_empty() {
            return Err(FileStoreError::InvalidPath(relative.to_string()));
        }
        Ok(self.root.join(path))
    }

    /// read a stored file.
    pub async fn read(&self, relative: &str) -> Result<Vec<u8>, FileStoreError> {
        Ok(fs::read(self.resolve(relative)?).await?)
    }

    /// remove a stored file. failures are logged and otherwise ignored.
    pub async fn remove(&self, relative: &str) {
        let path = match self.resolve(relative) {
            Ok(path) => path,
            Err(e) => {
                warn!(path = %relative, "not removing file: {e}");
                return;
            }
        };
        match fs::remove_file(&path).await {
            Ok(()) => debug!(path = %relative, "file removed"),
            Err(e) => warn!(path = %relative, "failed to remove file: {e}"),
        }
    }
}

/// reduce an uploaded file name to a safe single path segment.
///
/// keeps ascii letters, digits, dots, dashes and underscores; everything else
/// becomes an underscore. directory parts are dropped.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_LEN)
        .collect();

    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed.to_string()
    }
}
