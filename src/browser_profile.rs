//! Throwaway Chrome profile directories
//!
//! Every session gets its own uuid-named profile so a crashed earlier run can
//! never leave a SingletonLock that blocks the next one.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Prefix of every profile directory created by this crate
pub const PROFILE_PREFIX: &str = "gbb_chrome_";

/// RAII wrapper for Chrome profile directory
///
/// Removes the directory on drop. Drop it only after the browser process
/// has exited, or Chrome may still hold files open.
#[derive(Debug)]
pub struct BrowserProfile {
    path: PathBuf,
}

impl BrowserProfile {
    /// Get reference to the profile directory path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for BrowserProfile {
    fn drop(&mut self) {
        if self.path.exists() {
            info!("BrowserProfile cleanup: removing {}", self.path.display());
            if let Err(e) = std::fs::remove_dir_all(&self.path) {
                warn!("Failed to cleanup profile directory {}: {}", self.path.display(), e);
            }
        }
    }
}

/// Create a unique Chrome profile directory under the system temp dir
pub fn create_unique_profile() -> Result<BrowserProfile> {
    create_unique_profile_in(&std::env::temp_dir())
}

/// Create a unique Chrome profile directory under `parent`
pub fn create_unique_profile_in(parent: &Path) -> Result<BrowserProfile> {
    let path = parent.join(format!("{PROFILE_PREFIX}{}", Uuid::new_v4()));

    debug!("Creating unique Chrome profile: {}", path.display());

    // create_dir (not create_dir_all) so a uuid collision fails loudly
    std::fs::create_dir(&path)
        .with_context(|| format!("Failed to create profile directory: {}", path.display()))?;

    Ok(BrowserProfile { path })
}
