//! Editing session state.
//!
//! The session is owned by whoever drives the editor (the CLI loads it
//! from storage and saves it back). Nothing in segmentation reads it.

use crate::core::comic::Comic;
use crate::core::current_timestamp;
use crate::core::story::Story;
use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Required prefix of a Gemini API key.
pub const API_KEY_PREFIX: &str = "AIza";

/// Keys must be strictly longer than this many characters.
pub const API_KEY_MIN_LEN: usize = 20;

/// A locally logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Username as entered (trimmed).
    pub username: String,

    /// Unix timestamp of the login.
    pub logged_in_at: i64,
}

/// An API key that passed the local format check.
///
/// The key is never sent anywhere; the check only looks at its shape.
///
/// # Examples
///
/// ```
/// use panelize::core::ApiKey;
///
/// let key = ApiKey::parse("AIzaSyA-1234567890abcdefXYZ").unwrap();
/// assert_eq!(key.masked(), "AIza…fXYZ");
/// assert!(ApiKey::parse("sk-not-a-gemini-key-at-all").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validates and wraps a raw key.
    pub fn parse(raw: &str) -> Result<Self> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(ValidationError::MissingApiKey.into());
        }
        if !key.starts_with(API_KEY_PREFIX) {
            return Err(ValidationError::InvalidApiKey {
                reason: format!("must start with {API_KEY_PREFIX}"),
            }
            .into());
        }
        if key.chars().count() <= API_KEY_MIN_LEN {
            return Err(ValidationError::InvalidApiKey {
                reason: format!("must be longer than {API_KEY_MIN_LEN} characters"),
            }
            .into());
        }
        Ok(Self(key.to_string()))
    }

    /// Returns the key with everything but the first and last four characters hidden.
    #[must_use]
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        let head: String = chars.iter().take(4).collect();
        let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
        format!("{head}…{tail}")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}

/// The editor's session: who is logged in, their key, and their work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Logged-in user, if any.
    pub user: Option<User>,

    /// Stored API key, if any.
    pub api_key: Option<ApiKey>,

    /// Story being edited.
    pub story: Story,

    /// Comic being edited.
    pub comic: Comic,
}

impl Session {
    /// Creates a logged-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs a user in.
    ///
    /// Both fields must be non-blank. The password is checked for presence
    /// only and is not kept.
    pub fn login(&mut self, username: &str, password: &str) -> Result<&User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ValidationError::MissingUsername.into());
        }
        if password.trim().is_empty() {
            return Err(ValidationError::MissingPassword.into());
        }
        tracing::info!(username, "user logged in");
        Ok(self.user.insert(User {
            username: username.to_string(),
            logged_in_at: current_timestamp(),
        }))
    }

    /// Logs out, clearing the key, the story and the comic.
    pub fn logout(&mut self) {
        if let Some(user) = &self.user {
            tracing::info!(username = %user.username, "user logged out");
        }
        *self = Self::default();
    }

    /// Returns whether a user is logged in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Returns the logged-in user.
    pub fn require_user(&self) -> Result<&User> {
        self.user
            .as_ref()
            .ok_or_else(|| ValidationError::NotLoggedIn.into())
    }

    /// Validates and stores an API key, replacing any previous one.
    pub fn set_api_key(&mut self, raw: &str) -> Result<&ApiKey> {
        let key = ApiKey::parse(raw)?;
        Ok(self.api_key.insert(key))
    }

    /// Removes the stored API key.
    pub fn clear_api_key(&mut self) -> Option<ApiKey> {
        self.api_key.take()
    }

    /// Returns the stored API key.
    pub fn require_api_key(&self) -> Result<&ApiKey> {
        self.api_key
            .as_ref()
            .ok_or_else(|| ValidationError::MissingApiKey.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const GOOD_KEY: &str = "AIzaSyA-1234567890abcdefXYZ";

    fn validation(result: Result<impl Sized>) -> Option<ValidationError> {
        match result {
            Err(Error::Validation(e)) => Some(e),
            _ => None,
        }
    }

    #[test]
    fn test_api_key_trims() {
        let key = ApiKey::parse(&format!("  {GOOD_KEY}\n")).unwrap();
        assert_eq!(serde_json::to_value(&key).unwrap(), GOOD_KEY);
    }

    #[test]
    fn test_api_key_rejections() {
        assert_eq!(validation(ApiKey::parse("   ")), Some(ValidationError::MissingApiKey));
        assert!(matches!(
            validation(ApiKey::parse("sk-1234567890123456789012")),
            Some(ValidationError::InvalidApiKey { .. })
        ));
        // Exactly 20 characters is not enough.
        assert!(matches!(
            validation(ApiKey::parse("AIza0123456789abcdef")),
            Some(ValidationError::InvalidApiKey { .. })
        ));
        assert!(ApiKey::parse("AIza0123456789abcdefg").is_ok());
    }

    #[test]
    fn test_api_key_debug_is_masked() {
        let key = ApiKey::parse(GOOD_KEY).unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains(GOOD_KEY));
        assert!(debug.contains("AIza"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let mut session = Session::new();
        assert_eq!(
            validation(session.login(" ", "secret")),
            Some(ValidationError::MissingUsername)
        );
        assert_eq!(
            validation(session.login("dana", "")),
            Some(ValidationError::MissingPassword)
        );
        assert!(!session.is_logged_in());

        let user = session.login("  dana ", "secret").unwrap();
        assert_eq!(user.username, "dana");
        assert!(session.is_logged_in());
    }

    #[test]
    fn test_logout_clears_everything() {
        let mut session = Session::new();
        session.login("dana", "pw").unwrap();
        session.set_api_key(GOOD_KEY).unwrap();
        session.story = Story::sample();
        session.comic.add_panel(crate::core::ArtStyle::Comic);

        session.logout();
        assert_eq!(session, Session::default());
        assert_eq!(validation(session.require_user()), Some(ValidationError::NotLoggedIn));
        assert_eq!(
            validation(session.require_api_key()),
            Some(ValidationError::MissingApiKey)
        );
    }

    #[test]
    fn test_invalid_key_keeps_previous() {
        let mut session = Session::new();
        session.set_api_key(GOOD_KEY).unwrap();
        assert!(session.set_api_key("bad").is_err());
        assert_eq!(
            session.require_api_key().unwrap(),
            &ApiKey::parse(GOOD_KEY).unwrap()
        );
        assert!(session.clear_api_key().is_some());
        assert!(session.api_key.is_none());
    }
}
