//!
//! The registry advisory lock.
//!

use std::fs::File;
use std::fs::OpenOptions;
use std::path::Path;
use std::path::PathBuf;

use fs2::FileExt;

use crate::error::Error;

///
/// The registry advisory lock.
///
/// The registry has a single writer. The exclusive lock on the lock file is held while
/// the writer is alive, and is released by the OS when the writer process dies.
///
#[derive(Debug)]
pub struct Lock {
    /// The locked file.
    file: File,
}

impl Lock {
    /// The lock file extension appended to the registry file name.
    pub const EXTENSION: &'static str = "lock";

    ///
    /// Acquires the lock of the registry at `registry_path`.
    ///
    pub fn acquire(registry_path: &Path) -> Result<Self, Error> {
        let path = Self::path(registry_path);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path.as_path())
            .map_err(|error| Error::Registry {
                error,
                path: path.clone(),
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self { file }),
            Err(error) if error.kind() == fs2::lock_contended_error().kind() => {
                Err(Error::configuration(format!(
                    "Registry {registry_path:?} is used by another deployment run"
                )))
            }
            Err(error) => Err(Error::Registry { error, path }),
        }
    }

    ///
    /// Returns the lock file path of the registry at `registry_path`.
    ///
    pub fn path(registry_path: &Path) -> PathBuf {
        let mut file_name = registry_path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(".");
        file_name.push(Self::EXTENSION);
        registry_path.with_file_name(file_name)
    }
}

impl Drop for Lock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
