//! Archive member extraction
//!
//! Unpacking an archive to disk is an external collaborator, abstracted as
//! [`ArchiveStore`] so the resolution engine stays testable without a real
//! `ar`. Extraction happens inside a [`Workspace`], a per-invocation
//! temporary directory whose removal is tied to `Drop` so that every exit
//! path of the archive resolver, including early aborts, tears it down.

use crate::error::{Result, collaborator_error, io_error};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};
use std::{env, fs, process};

/// Distinguishes workspaces created by the same process.
static WORKSPACE_SEQ: AtomicU64 = AtomicU64::new(0);

/// A scoped on-disk extraction workspace.
///
/// The directory is created on construction and removed when the value is
/// dropped.
#[derive(Debug)]
pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    /// Creates a fresh workspace directory under the system temp dir.
    pub fn create() -> Result<Self> {
        let seq = WORKSPACE_SEQ.fetch_add(1, Ordering::Relaxed);
        let dir = env::temp_dir().join(format!("resolve-{}-{seq}", process::id()));
        fs::create_dir_all(&dir)
            .map_err(|err| io_error(format!("failed to create workspace: {err}")))?;
        log::debug!("created workspace {}", dir.display());
        Ok(Workspace { dir })
    }

    /// The workspace directory path.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.dir
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_dir_all(&self.dir) {
            log::warn!("failed to remove workspace {}: {err}", self.dir.display());
        }
    }
}

/// A capability that unpacks an archive's object members to a location.
pub trait ArchiveStore {
    /// Unpacks every member of `archive` into `dest` and returns the member
    /// paths in a deterministic order.
    ///
    /// # Errors
    /// Fails with [`Error::Collaborator`](crate::Error::Collaborator) if the
    /// extraction utility cannot be launched, or with
    /// [`Error::Io`](crate::Error::Io) if the members cannot be listed.
    fn unpack(&self, archive: &Path, dest: &Path) -> Result<Vec<PathBuf>>;
}

/// An archive store backed by the system `ar` utility.
#[derive(Debug, Default, Clone)]
pub struct ArExtractor;

impl ArchiveStore for ArExtractor {
    fn unpack(&self, archive: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
        // `ar x` writes members into the current directory, so hand it an
        // absolute archive path and run it inside the workspace.
        let archive = archive
            .canonicalize()
            .map_err(|err| io_error(format!("cannot resolve {}: {err}", archive.display())))?;
        log::debug!("extracting {} into {}", archive.display(), dest.display());
        let output = Command::new("ar")
            .arg("x")
            .arg(&archive)
            .current_dir(dest)
            .output()
            .map_err(|err| collaborator_error(format!("failed to launch ar: {err}")))?;
        if !output.status.success() {
            return Err(collaborator_error(format!(
                "ar failed on {}: {}",
                archive.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let mut members = Vec::new();
        let entries = fs::read_dir(dest)
            .map_err(|err| io_error(format!("failed to list workspace: {err}")))?;
        for entry in entries {
            let entry = entry.map_err(|err| io_error(format!("failed to list member: {err}")))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("o") {
                members.push(path);
            }
        }
        // Sorted member list makes pass order deterministic.
        members.sort();
        Ok(members)
    }
}
