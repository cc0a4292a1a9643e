use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use realty_core::models::AdminInfo;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("not signed in; run `realty login` first")]
    NotSignedIn,

    #[error("session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session file {path} is unreadable: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A stored admin sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<AdminInfo>,
}

impl Session {
    /// Read the stored session; a missing file means nobody is signed in.
    pub fn load(path: &Path) -> Result<Option<Session>, SessionError> {
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SessionError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let session: Session =
            serde_json::from_str(&contents).map_err(|source| SessionError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Some(session).filter(|s| !s.token.trim().is_empty()))
    }

    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        let io_err = |source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let body = serde_json::to_string_pretty(self).map_err(|source| SessionError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
        write_private(path, body.as_bytes()).map_err(io_err)?;
        tracing::info!(path = %path.display(), "session stored");
        Ok(())
    }

    /// Remove the stored session. Returns whether one existed.
    pub fn clear(path: &Path) -> Result<bool, SessionError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(SessionError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Write `contents` readable by the owner only. An existing file is narrowed
/// to the same mode before it is overwritten.
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    fs::write(path, contents)
}

/// The admin gate: a token must be on file before any admin request is made.
pub fn require_token(path: &Path) -> Result<String, SessionError> {
    match Session::load(path)? {
        Some(session) => Ok(session.token),
        None => Err(SessionError::NotSignedIn),
    }
}
