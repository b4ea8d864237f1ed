//! File access for catalog descriptor files.

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::{
    fs::{self, Permissions},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::error::{Error, Result};

/// Owner write permission bit.
#[cfg(unix)]
const OWNER_WRITE: u32 = 0o200;

/// File operations the catalog manager needs.
pub trait DescriptorStore {
    /// Return true when a file exists at `path`.
    fn exists(&self, path: &Path) -> Result<bool>;

    /// Read a file as UTF-8 text.
    fn read(&self, path: &Path) -> Result<String>;

    /// Write text to a file, preparing its directory first.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Resolve a file name relative to a base directory.
    fn resolve_path(&self, base: &Path, file_name: &str) -> PathBuf {
        base.join(file_name)
    }
}

/// Descriptor store backed by the local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl DescriptorStore for FsStore {
    fn exists(&self, path: &Path) -> Result<bool> {
        path.try_exists()
            .map(|exists| exists && path.is_file())
            .map_err(|error| Error::DescriptorLookup {
                path: path.to_path_buf(),
                source: error,
            })
    }

    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|error| Error::DescriptorRead {
            path: path.to_path_buf(),
            source: error,
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            prepare_directory(parent)?;
        }

        fs::write(path, contents).map_err(|error| Error::DescriptorWrite {
            path: path.to_path_buf(),
            source: error,
        })
    }
}

/// Create a directory if needed and make it writable by its owner.
fn prepare_directory(dir: &Path) -> Result<()> {
    let write_error = |error| Error::DescriptorWrite {
        path: dir.to_path_buf(),
        source: error,
    };

    fs::create_dir_all(dir).map_err(write_error)?;

    let mut permissions = fs::metadata(dir).map_err(write_error)?.permissions();
    if permissions.readonly() {
        debug!("Clearing read-only flag on {}", dir.display());
        allow_owner_write(&mut permissions);
        fs::set_permissions(dir, permissions).map_err(write_error)?;
    }

    Ok(())
}

/// Add the owner write bit, leaving group and other bits alone.
#[cfg(unix)]
fn allow_owner_write(permissions: &mut Permissions) {
    permissions.set_mode(permissions.mode() | OWNER_WRITE);
}

/// Clear the read-only attribute.
#[cfg(not(unix))]
#[allow(
    clippy::permissions_set_readonly_false,
    reason = "only the read-only attribute exists on this platform"
)]
fn allow_owner_write(permissions: &mut Permissions) {
    permissions.set_readonly(false);
}
