//! Application context: theme and session.
//!
//! Loaded once from a [`ContextStore`] at startup and handed to whatever
//! needs it. Every mutation writes back through the store; logging out
//! clears the session but keeps the theme.

use crate::palette::{Palette, Theme};
use crate::result::{HaulrouteError, HaulrouteResult};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Signed-in user as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account email
    pub email: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub picture: Option<String>,
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for backend calls
    pub access_token: String,
    /// Profile, once fetched
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl Session {
    /// Session for a freshly issued token
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            user: None,
        }
    }

    /// Attach the user profile
    #[must_use]
    pub fn with_user(mut self, user: UserProfile) -> Self {
        self.user = Some(user);
        self
    }
}

/// On-disk shape of the context
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedContext {
    /// Selected theme
    #[serde(default)]
    pub theme: Theme,
    /// Stored token, if signed in
    #[serde(default)]
    pub access_token: Option<String>,
    /// Stored profile
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// Persistent backing for [`AppContext`]
pub trait ContextStore {
    /// Read the stored context; `None` when nothing has been stored yet
    fn load(&self) -> HaulrouteResult<Option<PersistedContext>>;

    /// Replace the stored context
    fn save(&self, context: &PersistedContext) -> HaulrouteResult<()>;
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at `path`; the file is created on first save
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContextStore for FileStore {
    fn load(&self) -> HaulrouteResult<Option<PersistedContext>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn save(&self, context: &PersistedContext) -> HaulrouteResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(context)?)?;
        Ok(())
    }
}

/// In-memory store holding the serialized JSON
#[derive(Debug, Default)]
pub struct MemoryStore {
    json: RefCell<Option<String>>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with raw JSON
    #[must_use]
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            json: RefCell::new(Some(json.into())),
        }
    }

    /// Raw stored JSON
    #[must_use]
    pub fn json(&self) -> Option<String> {
        self.json.borrow().clone()
    }
}

impl ContextStore for MemoryStore {
    fn load(&self) -> HaulrouteResult<Option<PersistedContext>> {
        match self.json.borrow().as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, context: &PersistedContext) -> HaulrouteResult<()> {
        *self.json.borrow_mut() = Some(serde_json::to_string(context)?);
        Ok(())
    }
}

/// Theme and session shared by the views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppContext {
    theme: Theme,
    session: Option<Session>,
}

impl AppContext {
    /// Load from `store`. A missing or unreadable store yields the
    /// defaults; a stored profile without a token is discarded.
    pub fn load(store: &dyn ContextStore) -> Self {
        let persisted = match store.load() {
            Ok(persisted) => persisted.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "context store unreadable; using defaults");
                PersistedContext::default()
            }
        };

        let session = match persisted.access_token {
            Some(token) if !token.is_empty() => Some(Session {
                access_token: token,
                user: persisted.user,
            }),
            _ => None,
        };
        debug!(theme = %persisted.theme, signed_in = session.is_some(), "context loaded");

        Self {
            theme: persisted.theme,
            session,
        }
    }

    /// Current theme
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Colors for the current theme
    #[must_use]
    pub const fn palette(&self) -> Palette {
        self.theme.palette()
    }

    /// Current session
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Check if a user is signed in
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// `Authorization` header value for backend calls
    #[must_use]
    pub fn bearer(&self) -> Option<String> {
        self.session
            .as_ref()
            .map(|session| format!("Bearer {}", session.access_token))
    }

    /// Select a theme and persist it
    pub fn set_theme(&mut self, theme: Theme, store: &dyn ContextStore) -> HaulrouteResult<()> {
        self.theme = theme;
        self.persist(store)
    }

    /// Switch between light and dark and persist
    pub fn toggle_theme(&mut self, store: &dyn ContextStore) -> HaulrouteResult<Theme> {
        self.set_theme(self.theme.toggled(), store)?;
        Ok(self.theme)
    }

    /// Start a session and persist it
    pub fn login(&mut self, session: Session, store: &dyn ContextStore) -> HaulrouteResult<()> {
        if session.access_token.is_empty() {
            return Err(HaulrouteError::Store {
                message: "refusing to store an empty access token".to_string(),
            });
        }
        self.session = Some(session);
        self.persist(store)
    }

    /// Replace the profile of the current session
    pub fn update_user(&mut self, user: UserProfile, store: &dyn ContextStore) -> HaulrouteResult<()> {
        let Some(session) = self.session.as_mut() else {
            return Err(HaulrouteError::Store {
                message: "no session to attach a user to".to_string(),
            });
        };
        session.user = Some(user);
        self.persist(store)
    }

    /// Clear the session, keep the theme
    pub fn logout(&mut self, store: &dyn ContextStore) -> HaulrouteResult<()> {
        self.session = None;
        debug!("session cleared");
        self.persist(store)
    }

    fn persist(&self, store: &dyn ContextStore) -> HaulrouteResult<()> {
        store.save(&PersistedContext {
            theme: self.theme,
            access_token: self.session.as_ref().map(|s| s.access_token.clone()),
            user: self.session.as_ref().and_then(|s| s.user.clone()),
        })
    }
}
