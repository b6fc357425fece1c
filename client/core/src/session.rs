use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::{Config, ConfigError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "en" => Ok(Language::En),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unsupported theme: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub language: Language,
    pub theme: Theme,
}

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub preferences: Preferences,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("email", &self.email)
            .field("preferences", &self.preferences)
            .finish()
    }
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn logged_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == Session::default()
    }

    pub fn sign_in(&mut self, token: impl Into<String>, email: impl Into<String>) {
        self.token = Some(token.into());
        self.email = Some(email.into());
    }

    /// Forget the identity but keep preferences.
    pub fn sign_out(&mut self) {
        self.token = None;
        self.email = None;
    }
}

/// Mirrors every change to a TOML file, or keeps working in memory when
/// there is no usable location.
#[derive(Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    session: Session,
}

impl SessionStore {
    /// Store in the platform data directory, or in memory if there is none.
    pub fn open_default() -> Self {
        match Config::project_dirs() {
            Some(dirs) => Self::open(dirs.data_dir().join("session.toml")),
            None => {
                tracing::warn!("no data directory available, session will not persist");
                Self::in_memory()
            }
        }
    }

    /// A missing file is an empty session; an unreadable one is logged and
    /// treated the same way.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let session = match read_session(&path) {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "discarding unreadable session"
                );
                Session::default()
            }
        };
        Self {
            path: Some(path),
            session,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Apply a change and persist it if anything actually changed.
    pub fn update(&mut self, change: impl FnOnce(&mut Session)) {
        let before = self.session.clone();
        change(&mut self.session);
        if self.session != before {
            self.persist();
        }
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(err) = write_session(path, &self.session) {
            tracing::warn!(path = %path.display(), error = %err, "failed to persist session");
        }
    }
}

fn read_session(path: &Path) -> Result<Session, ConfigError> {
    if !path.exists() {
        return Ok(Session::default());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// An empty session removes the file instead of writing an empty one.
fn write_session(path: &Path, session: &Session) -> Result<(), ConfigError> {
    if session.is_empty() {
        return match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        };
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(session)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        let mut store = SessionStore::open(&path);
        assert!(!store.session().logged_in());
        store.update(|s| s.sign_in("jwt", "alice@example.com"));
        assert!(path.exists());

        let reopened = SessionStore::open(&path);
        assert_eq!(reopened.session().token(), Some("jwt"));
        assert_eq!(reopened.session().email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_empty_session_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        let mut store = SessionStore::open(&path);
        store.update(|s| s.sign_in("jwt", "a@b.c"));
        assert!(path.exists());
        store.update(Session::sign_out);
        assert!(!path.exists());
    }

    #[test]
    fn test_sign_out_keeps_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        let mut store = SessionStore::open(&path);
        store.update(|s| {
            s.sign_in("jwt", "a@b.c");
            s.preferences.language = Language::En;
        });
        store.update(Session::sign_out);

        let reopened = SessionStore::open(&path);
        assert!(!reopened.session().logged_in());
        assert!(reopened.session().email.is_none());
        assert_eq!(reopened.session().preferences.language, Language::En);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "token = [").unwrap();

        let store = SessionStore::open(&path);
        assert!(store.session().is_empty());
    }

    #[test]
    fn test_unwritable_location_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let mut store = SessionStore::open(blocker.join("session.toml"));
        store.update(|s| s.sign_in("jwt", "a@b.c"));
        assert_eq!(store.session().token(), Some("jwt"));
    }

    #[test]
    fn test_in_memory_store() {
        let mut store = SessionStore::in_memory();
        assert!(store.path().is_none());
        store.update(|s| s.preferences.theme = Theme::Dark);
        assert_eq!(store.session().preferences.theme, Theme::Dark);
    }

    #[test]
    fn test_blank_token_is_not_logged_in() {
        let session = Session {
            token: Some(String::new()),
            ..Session::default()
        };
        assert!(!session.logged_in());
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut session = Session::default();
        session.sign_in("very-secret", "a@b.c");
        assert!(!format!("{:?}", session).contains("very-secret"));
    }

    #[test]
    fn test_preference_parsing() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("fr".parse::<Language>().is_err());
    }
}
