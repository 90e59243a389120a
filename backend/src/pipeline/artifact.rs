//! Scratch files of the transform chain.
//!
//! Every file a job creates is owned by an `Artifact`, which removes it when
//! dropped. A stage claims its output path before running, so a failed or
//! interrupted stage still cleans up whatever it half-wrote, and replacing the
//! current artifact with the stage output drops (and deletes) the input.

use log::{debug, warn};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Random name shared by every file of one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobToken(String);

impl JobToken {
    /// Picks a fresh token, retrying while `<dir>/<token>.pdf` already exists.
    ///
    /// Collisions are only avoided locally; concurrent allocations are not
    /// serialized. A directory that cannot be inspected is an error.
    pub async fn allocate(dir: &Path) -> io::Result<Self> {
        loop {
            let token = Self(Uuid::new_v4().simple().to_string()[..8].to_string());
            if !tokio::fs::try_exists(token.path(dir, ".pdf")).await? {
                return Ok(token);
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<dir>/<token><suffix>`
    pub fn path(&self, dir: &Path, suffix: &str) -> PathBuf {
        dir.join(format!("{}{}", self.0, suffix))
    }
}

/// A file deleted when this handle goes out of scope.
#[derive(Debug)]
pub struct Artifact {
    path: PathBuf,
}

impl Artifact {
    /// Takes ownership of `path`, whether or not the file exists yet.
    pub fn claim(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Artifact {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("removed {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("could not remove {}: {}", self.path.display(), e),
        }
    }
}
