//! Session persistence.
//!
//! Each part of the [`Session`] lives under its own fixed key, so a
//! partially written store still loads: missing keys fall back to defaults.

use crate::core::{ApiKey, Comic, Session, Story, User};
use crate::error::Result;
use crate::storage::traits::Storage;

/// Key of the logged-in user.
pub const USER_KEY: &str = "comic_creator_user";

/// Key of the API key.
pub const API_KEY_KEY: &str = "comic_creator_api_key";

/// Key of the story text.
pub const STORY_KEY: &str = "comic_creator_story";

/// Key of the comic panels.
pub const COMIC_KEY: &str = "comic_creator_comic";

/// All session keys, in the order they are written.
pub const SESSION_KEYS: [&str; 4] = [USER_KEY, API_KEY_KEY, STORY_KEY, COMIC_KEY];

/// Writes `session` to `storage`.
///
/// Absent optional parts (no user, no key) are removed rather than stored
/// as `null`.
///
/// # Errors
///
/// Returns an error if a value cannot be serialized or written.
pub fn save_session<S: Storage>(storage: &mut S, session: &Session) -> Result<()> {
    match &session.user {
        Some(user) => storage.save(USER_KEY, user)?,
        None => {
            storage.remove_item(USER_KEY)?;
        }
    }
    match &session.api_key {
        Some(key) => storage.save(API_KEY_KEY, key)?,
        None => {
            storage.remove_item(API_KEY_KEY)?;
        }
    }
    storage.save(STORY_KEY, &session.story)?;
    storage.save(COMIC_KEY, &session.comic)?;
    tracing::debug!(panels = session.comic.panel_count(), "session saved");
    Ok(())
}

/// Reads the session from `storage`.
///
/// # Errors
///
/// Returns an error if a stored value is not valid JSON for its type.
pub fn load_session<S: Storage>(storage: &S) -> Result<Session> {
    let user: Option<User> = storage.load(USER_KEY)?;
    let api_key: Option<ApiKey> = storage.load(API_KEY_KEY)?;
    let story: Story = storage.load(STORY_KEY)?.unwrap_or_default();
    let comic: Comic = storage.load(COMIC_KEY)?.unwrap_or_default();
    Ok(Session {
        user,
        api_key,
        story,
        comic,
    })
}

/// Removes every session key. Returns how many were present.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn clear_session<S: Storage>(storage: &mut S) -> Result<usize> {
    let mut removed = 0;
    for key in SESSION_KEYS {
        if storage.remove_item(key)? {
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ArtStyle;
    use crate::segmenting::SentenceSegmenter;
    use crate::storage::SqliteStorage;

    fn setup() -> SqliteStorage {
        let mut storage = SqliteStorage::in_memory().unwrap();
        storage.init().unwrap();
        storage
    }

    #[test]
    fn test_empty_store_loads_default_session() {
        let storage = setup();
        assert_eq!(load_session(&storage).unwrap(), Session::default());
    }

    #[test]
    fn test_save_and_load_session() {
        let mut storage = setup();
        let mut session = Session::new();
        session.login("dana", "secret").unwrap();
        session.set_api_key("AIzaSyA-1234567890abcdefXYZ").unwrap();
        session.story = Story::new("One. Two. Three.");
        session.comic = Comic::from_story(
            "t",
            session.story.clone(),
            &SentenceSegmenter::new(),
            ArtStyle::Sketch,
        );

        save_session(&mut storage, &session).unwrap();
        let loaded = load_session(&storage).unwrap();
        assert_eq!(loaded, session);
        assert_eq!(storage.keys().unwrap().len(), SESSION_KEYS.len());
    }

    #[test]
    fn test_logout_removes_user_and_key() {
        let mut storage = setup();
        let mut session = Session::new();
        session.login("dana", "secret").unwrap();
        session.set_api_key("AIzaSyA-1234567890abcdefXYZ").unwrap();
        save_session(&mut storage, &session).unwrap();

        session.logout();
        save_session(&mut storage, &session).unwrap();

        assert!(storage.get_item(USER_KEY).unwrap().is_none());
        assert!(storage.get_item(API_KEY_KEY).unwrap().is_none());
        assert!(!load_session(&storage).unwrap().is_logged_in());
    }

    #[test]
    fn test_clear_session() {
        let mut storage = setup();
        storage.set_item("unrelated", "1").unwrap();
        save_session(&mut storage, &Session::new()).unwrap();

        assert_eq!(clear_session(&mut storage).unwrap(), 2);
        assert_eq!(storage.keys().unwrap(), vec!["unrelated"]);
        assert_eq!(clear_session(&mut storage).unwrap(), 0);
    }
}
