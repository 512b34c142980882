//! Fixture file writer.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::assembler::{Fixture, FixtureSet};
use crate::errors::FixtureError;

/// Unix permission bits of written fixture files.
pub const FILE_MODE: u32 = 0o644;

/// Options for fixture writing.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Whether to overwrite existing fixture files (default: false).
    pub force: bool,
}

/// Writes a rendered [`FixtureSet`] into a directory.
///
/// Existing files are checked before anything is written, so a refused
/// overwrite leaves the directory untouched. Every file is staged as a
/// hidden sibling before the first one is renamed into place.
#[derive(Debug, Clone)]
pub struct FixtureWriter {
    dir: PathBuf,
    options: WriteOptions,
}

impl FixtureWriter {
    /// Creates a writer targeting `dir`.
    pub fn new<P: AsRef<Path>>(dir: P, options: WriteOptions) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            options,
        }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes every fixture of `set`, returning the paths written in order.
    ///
    /// A staging failure removes the temporaries and leaves existing
    /// fixtures untouched. Targets occupied by a directory are rejected
    /// before staging. A rename that still fails partway (the filesystem
    /// going read-only, say) leaves earlier targets replaced and later ones
    /// stale; the remaining temporaries are removed.
    ///
    /// # Errors
    ///
    /// - [`FixtureError::AlreadyExists`] if a target exists and `force` is off
    /// - [`FixtureError::Io`] if the directory or a file cannot be written
    pub fn write_all(&self, set: &FixtureSet) -> Result<Vec<PathBuf>, FixtureError> {
        fs::create_dir_all(&self.dir).map_err(|e| FixtureError::io(&self.dir, e))?;

        let targets: Vec<PathBuf> = set
            .fixtures()
            .iter()
            .map(|f| self.dir.join(f.name))
            .collect();
        if let Some(dir) = targets.iter().find(|p| p.is_dir()) {
            return Err(FixtureError::io(
                dir,
                io::Error::new(io::ErrorKind::Other, "target is a directory"),
            ));
        }
        if !self.options.force {
            if let Some(existing) = targets.iter().find(|p| p.exists()) {
                return Err(FixtureError::AlreadyExists(existing.clone()));
            }
        }

        let mut staged = Vec::with_capacity(targets.len());
        for fixture in set.fixtures() {
            match stage(&self.dir, fixture) {
                Ok(tmp) => staged.push(tmp),
                Err(e) => {
                    discard(&staged);
                    return Err(e);
                }
            }
        }

        for (i, ((tmp, target), fixture)) in staged
            .iter()
            .zip(&targets)
            .zip(set.fixtures())
            .enumerate()
        {
            if let Err(e) = fs::rename(tmp, target) {
                discard(&staged[i..]);
                return Err(FixtureError::io(target, e));
            }
            info!(path = %target.display(), entries = fixture.entries, "wrote fixture");
        }
        Ok(targets)
    }
}

/// Writes `fixture` to its hidden temporary, removing it again on failure.
fn stage(dir: &Path, fixture: &Fixture) -> Result<PathBuf, FixtureError> {
    let tmp = dir.join(format!(".{}.tmp", fixture.name));
    let result = fs::write(&tmp, fixture.json.as_bytes())
        .map_err(|e| FixtureError::io(&tmp, e))
        .and_then(|()| set_mode(&tmp));
    match result {
        Ok(()) => Ok(tmp),
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

fn discard(staged: &[PathBuf]) {
    for tmp in staged {
        if let Err(e) = fs::remove_file(tmp) {
            warn!(path = %tmp.display(), error = %e, "failed to remove staged fixture");
        }
    }
}

#[cfg(unix)]
fn set_mode(path: &Path) -> Result<(), FixtureError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(FILE_MODE))
        .map_err(|e| FixtureError::io(path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path) -> Result<(), FixtureError> {
    Ok(())
}
