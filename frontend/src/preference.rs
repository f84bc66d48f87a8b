use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;

pub const DARK_MODE_KEY: &str = "darkMode";

/// Durable string key-value storage.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process storage. Clones share the same entries, so a clone outlives a
/// `DisplayPreference` the way a browser's storage outlives a page.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::KeyValueStore;
    use crate::error::{Result, TodoError};

    /// `window.localStorage`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStorage;

    impl LocalStorage {
        fn storage() -> Option<web_sys::Storage> {
            web_sys::window().and_then(|window| window.local_storage().ok().flatten())
        }
    }

    impl KeyValueStore for LocalStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            Self::storage().and_then(|storage| storage.get_item(key).ok().flatten())
        }

        fn set_item(&self, key: &str, value: &str) -> Result<()> {
            let storage = Self::storage()
                .ok_or_else(|| TodoError::Storage("localStorage is unavailable".to_string()))?;
            storage
                .set_item(key, value)
                .map_err(|e| TodoError::Storage(format!("{e:?}")))
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Theme::Light => "#eae0c8",
            Theme::Dark => "#222",
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Theme::Light => "light-mode",
            Theme::Dark => "dark-mode",
        }
    }

    /// Caption of the button that switches away from this theme.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "🌙 Dark Mode",
            Theme::Dark => "☀️ Light Mode",
        }
    }
}

/// The dark-mode flag, read once at startup and written through on change.
#[derive(Debug, Clone)]
pub struct DisplayPreference<S> {
    storage: S,
    dark: bool,
}

impl<S: KeyValueStore> DisplayPreference<S> {
    pub fn load(storage: S) -> Self {
        let dark = storage.get_item(DARK_MODE_KEY).as_deref() == Some("true");
        Self { storage, dark }
    }

    pub fn get(&self) -> bool {
        self.dark
    }

    pub fn theme(&self) -> Theme {
        Theme::from_dark(self.dark)
    }

    /// Records the new value and returns the theme to apply. The in-memory
    /// value follows the request even when it could not be persisted.
    pub fn set(&mut self, dark: bool) -> Result<Theme> {
        self.dark = dark;
        self.storage
            .set_item(DARK_MODE_KEY, if dark { "true" } else { "false" })?;
        Ok(self.theme())
    }
}
