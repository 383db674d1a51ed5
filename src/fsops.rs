//! Filesystem primitives shared by the preparation tools.
//!
//! Everything here is synchronous; callers on the async side run the batch
//! operations under `tokio::task::spawn_blocking`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Remove the directory tree at `path` if it exists. Returns whether
/// anything was removed.
pub fn remove_dir_if_exists(path: &Path) -> io::Result<bool> {
    if path.exists() {
        info!("Deleting {:?}", path);
        fs::remove_dir_all(path)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Remove whatever sits at `path`: a directory tree, a file, or a symlink
/// (including one whose target is gone).
fn remove_existing(path: &Path) -> io::Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };

    if meta.is_dir() {
        info!("Deleting {:?}", path);
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Copy the tree at `src` to `dst`, preserving permission bits and
/// recreating symlinked entries as symlinks.
pub fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(io::Error::from)?;
        let rel = match entry.path().strip_prefix(src) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let target = dst.join(rel);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else if file_type.is_symlink() {
            let link = fs::read_link(entry.path())?;
            std::os::unix::fs::symlink(&link, &target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Replace `dst` with the tree at `src`, either by copying or by
/// symlinking. Any previous `dst` is removed first; the parent directory
/// is created when missing.
pub fn duplicate(src: &Path, dst: &Path, symlink: bool) -> io::Result<()> {
    remove_existing(dst)?;

    if let Some(parent) = dst.parent() {
        if !parent.exists() {
            info!("Creating parent directory {:?} for {:?}", parent, dst);
            fs::create_dir_all(parent)?;
        }
    }

    if symlink {
        info!("Symlinking {:?} to {:?}", src, dst);
        std::os::unix::fs::symlink(src, dst)?;
    } else {
        info!("Copying {:?} to {:?}", src, dst);
        copy_tree(src, dst)?;
    }
    Ok(())
}

/// Scoped relocation of a path.
///
/// Moves `original` to `parked` on construction and moves it back either
/// through [`restore`](Self::restore) or, if the surrounding operation
/// bails out first, in `Drop`. Both paths must live on the same
/// filesystem, since the relocation is a rename.
#[derive(Debug)]
pub struct MovedAside {
    original: PathBuf,
    parked: PathBuf,
    restored: bool,
}

impl MovedAside {
    /// Move `original` out of the way to `parked`.
    pub fn new(original: impl Into<PathBuf>, parked: impl Into<PathBuf>) -> io::Result<Self> {
        let original = original.into();
        let parked = parked.into();
        debug!("Moving {:?} aside to {:?}", original, parked);
        fs::rename(&original, &parked)?;
        Ok(Self {
            original,
            parked,
            restored: false,
        })
    }

    /// Move the path back to its original location.
    pub fn restore(mut self) -> io::Result<()> {
        self.restored = true;
        self.put_back()
    }

    fn put_back(&self) -> io::Result<()> {
        if let Some(parent) = self.original.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("Restoring {:?} from {:?}", self.original, self.parked);
        fs::rename(&self.parked, &self.original)
    }
}

impl Drop for MovedAside {
    fn drop(&mut self) {
        if !self.restored {
            if let Err(err) = self.put_back() {
                warn!(
                    "Failed to restore {:?} from {:?}: {}",
                    self.original, self.parked, err
                );
            }
        }
    }
}
