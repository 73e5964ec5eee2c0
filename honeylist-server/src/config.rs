//! Server configuration - paths, bind address and upload limits
//!
//! Built once at process start and handed to the components that need it.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default per-file upload limit (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Files accepted per form submission. Bounds the whole request body.
const MAX_FILES_PER_REQUEST: usize = 16;

/// Headroom for the text fields and multipart framing.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:5050)
    pub bind_addr: SocketAddr,

    /// SQLite database file (default: listings.db)
    pub db_path: PathBuf,

    /// Static asset root, served under `/static` (default: static)
    pub static_dir: PathBuf,

    /// Largest single uploaded file, in bytes
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Config rooted in a single directory (for testing)
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            db_path: root.join("listings.db"),
            static_dir: root.join("static"),
            ..Self::default()
        }
    }

    /// Directory uploaded images are written to
    pub fn upload_dir(&self) -> PathBuf {
        self.static_dir.join("uploads")
    }

    /// Limit for a whole multipart request body
    pub fn max_request_bytes(&self) -> usize {
        self.max_upload_bytes
            .saturating_mul(MAX_FILES_PER_REQUEST)
            .saturating_add(FORM_OVERHEAD_BYTES)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5050)),
            db_path: PathBuf::from("listings.db"),
            static_dir: PathBuf::from("static"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
