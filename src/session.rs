//! Persisted session key.
//!
//! Holds the `id_usuario` of whoever signed in last, stored as a tiny TOML
//! file so it survives restarts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    id_usuario: Option<String>,
}

/// Session state backed by a file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    id_usuario: Option<String>,
}

impl SessionStore {
    /// Load the session from `path`. A missing file is an empty session.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self { path, id_usuario: None });
        }

        let content = std::fs::read_to_string(&path)?;
        let file: SessionFile =
            toml::from_str(&content).map_err(|e| AppError::session(format!("{}: {e}", path.display())))?;

        let id_usuario = file.id_usuario.filter(|id| !id.trim().is_empty());
        Ok(Self { path, id_usuario })
    }

    /// An empty session that is not backed by disk until signed in.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            id_usuario: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn user_id(&self) -> Option<&str> {
        self.id_usuario.as_deref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.id_usuario.is_some()
    }

    /// Store `id` as the current user and persist it.
    pub fn sign_in(&mut self, id: &str) -> Result<()> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::validation("Ingresa tu ID de usuario"));
        }

        let file = SessionFile {
            id_usuario: Some(id.to_string()),
        };
        let content = toml::to_string(&file).map_err(|e| AppError::session(e.to_string()))?;
        std::fs::write(&self.path, content)?;

        self.id_usuario = Some(id.to_string());
        tracing::info!("Session started for user {}", id);
        Ok(())
    }

    /// Forget the current user and remove the session file.
    pub fn sign_out(&mut self) -> Result<()> {
        self.id_usuario = None;
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        tracing::info!("Session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::load(dir.path().join("session.toml")).unwrap();
        assert!(!session.is_signed_in());
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn test_sign_in_persists_across_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        let mut session = SessionStore::load(&path).unwrap();
        session.sign_in(" 101 ").unwrap();
        assert_eq!(session.user_id(), Some("101"));

        let reloaded = SessionStore::load(&path).unwrap();
        assert_eq!(reloaded.user_id(), Some("101"));
    }

    #[test]
    fn test_sign_in_rejects_blank_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = SessionStore::load(dir.path().join("session.toml")).unwrap();
        assert!(matches!(session.sign_in("   "), Err(AppError::Validation(_))));
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_sign_out_clears_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        let mut session = SessionStore::load(&path).unwrap();
        session.sign_in("5").unwrap();
        session.sign_out().unwrap();

        assert!(!session.is_signed_in());
        assert!(!path.exists());
        // Signing out twice is fine.
        session.sign_out().unwrap();
    }

    #[test]
    fn test_blank_stored_id_counts_as_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "id_usuario = \"\"\n").unwrap();

        let session = SessionStore::load(&path).unwrap();
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_corrupt_file_is_session_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "id_usuario = [").unwrap();

        assert!(matches!(SessionStore::load(&path), Err(AppError::Session(_))));
    }
}
