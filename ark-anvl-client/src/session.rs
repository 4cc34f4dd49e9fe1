//! File-backed storage for the registry session cookie.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::{RegistryError, RegistryResult};

/// File name of the session store under the home directory.
pub const SESSION_FILE_NAME: &str = ".ark_session";

/// Persists the session cookie between invocations.
///
/// The file holds the bare `name=value` cookie and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns `~/.ark_session`, if a home directory is known.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(SESSION_FILE_NAME))
    }

    /// Creates a store at [`SessionStore::default_path`].
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Session` if no home directory is known.
    pub fn at_default() -> RegistryResult<Self> {
        Self::default_path()
            .map(Self::new)
            .ok_or_else(|| RegistryError::session("cannot locate home directory"))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored cookie. A missing or empty file yields `None`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Session` if the file exists but cannot be read.
    pub fn load(&self) -> RegistryResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let cookie = contents.trim();
                Ok((!cookie.is_empty()).then(|| cookie.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.error("read", &e)),
        }
    }

    /// Writes the cookie, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Session` if the file cannot be written.
    pub fn save(&self, cookie: &str) -> RegistryResult<()> {
        let mut file = open_private(&self.path).map_err(|e| self.error("open", &e))?;
        // an older file keeps its mode through open, so tighten it as well
        restrict_permissions(&self.path).map_err(|e| self.error("protect", &e))?;
        writeln!(file, "{cookie}").map_err(|e| self.error("write", &e))?;
        log::debug!("session saved to {}", self.path.display());
        Ok(())
    }

    /// Removes the stored cookie. Returns false if there was none.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Session` if the file exists but cannot be
    /// removed.
    pub fn clear(&self) -> RegistryResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.error("remove", &e)),
        }
    }

    fn error(&self, action: &str, err: &std::io::Error) -> RegistryError {
        RegistryError::session(format!(
            "failed to {action} session file {}: {err}",
            self.path.display()
        ))
    }
}

/// Opens `path` for writing; a new file is created readable by its owner
/// only.
fn open_private(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
