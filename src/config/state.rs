// Application state module
// Shared per-process state handed to every connection

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Notify;

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,

    /// Absolute base directory for all file writes
    pub work_dir: PathBuf,

    /// Fired once when SIGINT/SIGTERM is received
    pub shutdown: Arc<Notify>,
}

impl AppState {
    /// Build state from the loaded config, resolving `storage.work_dir`.
    ///
    /// The directory must already exist; it is canonicalized once here so
    /// every request joins against the same absolute path.
    pub fn new(config: &Config) -> io::Result<Self> {
        let work_dir = Path::new(&config.storage.work_dir).canonicalize()?;
        Ok(Self::with_work_dir(config, work_dir))
    }

    /// Build state with an explicit, already-resolved work directory
    pub fn with_work_dir(config: &Config, work_dir: PathBuf) -> Self {
        Self {
            config: config.clone(),
            work_dir,
            shutdown: Arc::new(Notify::new()),
        }
    }
}
