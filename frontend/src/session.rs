//! 会话存储
//!
//! The session is three flat string keys in persistent key-value storage.
//! Reads never fail: an unavailable store reads as an empty session, and an
//! empty session means "not signed in".

use fertiflow_shared::Role;
use fertiflow_shared::protocol::LoginResponse;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::web::LocalStorage;

/// Persisted session keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Token,
    Role,
    DisplayName,
}

impl SessionKey {
    pub const ALL: [SessionKey; 3] = [SessionKey::Token, SessionKey::Role, SessionKey::DisplayName];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::Token => "token",
            SessionKey::Role => "role",
            SessionKey::DisplayName => "fullname",
        }
    }
}

// =========================================================
// 存储后端抽象
// =========================================================

/// Synchronous string storage. Implementations must not panic; failures
/// surface as `None` / `false`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

/// In-process store used by tests and when `localStorage` is unavailable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.insert(key.to_string(), value.to_string());
                true
            }
            Err(_) => false,
        }
    }

    fn remove(&self, key: &str) -> bool {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.remove(key);
                true
            }
            Err(_) => false,
        }
    }
}

// =========================================================
// 会话模型
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<Role>,
    pub display_name: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.role.is_some()
    }

    /// The role that gates navigation. A role without a token does not count.
    pub fn active_role(&self) -> Option<Role> {
        if self.is_authenticated() {
            self.role
        } else {
            None
        }
    }

    /// Letter shown in the identity badge.
    pub fn initial(&self) -> String {
        self.display_name
            .as_deref()
            .and_then(|name| name.trim().chars().next())
            .map(|c| c.to_uppercase().collect::<String>())
            .unwrap_or_else(|| match self.role {
                Some(Role::Admin) => "A".to_string(),
                _ => "F".to_string(),
            })
    }

    pub fn role_label(&self) -> &'static str {
        match self.role {
            Some(Role::Admin) => Role::Admin.label(),
            _ => Role::Farmer.label(),
        }
    }

    /// Title and subtitle heading the identity menu.
    pub fn account_heading(&self) -> (&'static str, &'static str) {
        match self.role {
            Some(Role::Admin) => ("Administrator Account", "Full system access"),
            _ => ("Farmer Account", "Order management"),
        }
    }

    /// Name for greetings, falling back to the role label.
    pub fn greeting_name(&self) -> String {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.role_label().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("login response carried an empty token")]
    EmptyToken,
    #[error("unrecognized role {0:?}")]
    UnknownRole(String),
}

// =========================================================
// 会话存储
// =========================================================

#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()))
    }

    /// `localStorage` when the host allows it, otherwise a memory store that
    /// lasts for the page load.
    pub fn browser() -> Self {
        if LocalStorage::available() {
            Self::new(Arc::new(LocalStorage))
        } else {
            log::warn!("[Session] localStorage unavailable, session will not persist");
            Self::in_memory()
        }
    }

    /// Empty strings read as absent.
    pub fn get(&self, key: SessionKey) -> Option<String> {
        self.backend
            .get(key.as_str())
            .filter(|value| !value.is_empty())
    }

    pub fn set(&self, key: SessionKey, value: &str) -> bool {
        self.backend.set(key.as_str(), value)
    }

    pub fn clear(&self) {
        for key in SessionKey::ALL {
            if !self.backend.remove(key.as_str()) {
                log::warn!("[Session] could not remove {}", key.as_str());
            }
        }
    }

    pub fn load(&self) -> Session {
        let role = self.get(SessionKey::Role).and_then(|raw| {
            let role = Role::parse(&raw);
            if role.is_none() {
                log::warn!("[Session] ignoring stored role {:?}", raw);
            }
            role
        });

        Session {
            token: self.get(SessionKey::Token),
            role,
            display_name: self.get(SessionKey::DisplayName),
        }
    }

    /// Replaces whatever was stored with the session from a login response.
    /// Nothing is written when the response is unusable.
    pub fn begin(&self, login: &LoginResponse) -> Result<Session, SessionError> {
        if login.token.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }
        let role =
            Role::parse(&login.role).ok_or_else(|| SessionError::UnknownRole(login.role.clone()))?;

        self.clear();
        self.set(SessionKey::Token, &login.token);
        self.set(SessionKey::Role, role.as_str());
        let display_name = login
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        if let Some(name) = &display_name {
            self.set(SessionKey::DisplayName, name);
        }

        Ok(Session {
            token: Some(login.token.clone()),
            role: Some(role),
            display_name,
        })
    }
}
