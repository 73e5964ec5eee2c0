//! Image upload storage
//!
//! Writes uploaded images into a single flat directory and hands back the
//! public paths they are served under. Filenames go through a strict
//! allow-list, and every file in a batch is checked against the
//! [`UploadPolicy`] (extension, declared content type, size) before the
//! first byte hits disk. Writes themselves are
//! best effort: a failure part-way through leaves earlier files in place.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::config::ServerConfig;

/// URL prefix uploads are served under
pub const UPLOAD_URL_PREFIX: &str = "/static/uploads";

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Sent by clients that do not sniff the file type
const GENERIC_CONTENT_TYPE: &str = "application/octet-stream";

/// One file part from a form submission
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// Client-supplied name. Empty for an unset file input.
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn is_unset(&self) -> bool {
        self.filename.is_empty()
    }
}

/// Upload error type
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("filename '{filename}' has no usable characters")]
    InvalidFilename { filename: String },

    #[error("'{filename}' is not an accepted image type")]
    UnsupportedType { filename: String },

    #[error("'{filename}' is {size} bytes, limit is {max}")]
    TooLarge {
        filename: String,
        size: usize,
        max: usize,
    },

    #[error("failed to write upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Size and type limits applied to each file
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_bytes: usize,
}

impl UploadPolicy {
    /// Check a file against the policy, returning its sanitized name.
    pub fn check(&self, file: &IncomingFile) -> Result<String, UploadError> {
        let name = sanitize_filename(&file.filename).ok_or_else(|| {
            UploadError::InvalidFilename {
                filename: file.filename.clone(),
            }
        })?;

        let allowed = Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| ALLOWED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        let declared_ok = file
            .content_type
            .as_deref()
            .map(|ct| ct.starts_with("image/") || ct == GENERIC_CONTENT_TYPE)
            .unwrap_or(true);
        if !allowed || !declared_ok {
            return Err(UploadError::UnsupportedType {
                filename: file.filename.clone(),
            });
        }

        if file.bytes.len() > self.max_bytes {
            return Err(UploadError::TooLarge {
                filename: file.filename.clone(),
                size: file.bytes.len(),
                max: self.max_bytes,
            });
        }

        Ok(name)
    }
}

/// Flat directory of uploaded images
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    policy: UploadPolicy,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, policy: UploadPolicy) -> Self {
        Self {
            dir: dir.into(),
            policy,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            config.upload_dir(),
            UploadPolicy {
                max_bytes: config.max_upload_bytes,
            },
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir).await
    }

    /// Store every named file, returning public paths in input order.
    ///
    /// Unset file inputs (empty names) are skipped. Same-named files
    /// overwrite each other.
    pub async fn save_all(&self, files: &[IncomingFile]) -> Result<Vec<String>, UploadError> {
        let accepted = files
            .iter()
            .filter(|f| !f.is_unset())
            .map(|f| self.policy.check(f).map(|name| (name, f)))
            .collect::<Result<Vec<_>, _>>()?;

        if accepted.is_empty() {
            return Ok(Vec::new());
        }

        self.ensure_dir().await?;

        let mut stored = Vec::with_capacity(accepted.len());
        for (name, file) in accepted {
            fs::write(self.dir.join(&name), &file.bytes).await?;
            tracing::debug!(file = %name, bytes = file.bytes.len(), "stored upload");
            stored.push(format!("{UPLOAD_URL_PREFIX}/{name}"));
        }

        Ok(stored)
    }
}

/// Reduce a client filename to `[A-Za-z0-9._-]`.
///
/// Path separators and whitespace become `_`, anything else outside the
/// allow-list is dropped, and leading/trailing `.` and `_` are trimmed so the
/// result can neither climb directories nor hide as a dotfile. Returns `None`
/// when nothing is left.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let spaced: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    let trimmed = filtered.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
