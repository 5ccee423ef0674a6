//! Application settings storage.
//!
//! A flat set of user preferences persisted as a single pretty-printed JSON
//! object. Each setter is deduplicated: writing the value already stored
//! does nothing (no disk write, no notification), so subscribers only hear
//! about real changes.

use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::events::{Listeners, SettingsEvent};
use crate::storage::data_dir;

/// Persisted user preferences.
///
/// Every field carries a serde default so keys absent from the file (or a
/// file that fails to parse entirely) fall back cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_work_duration")]
    pub work_duration: u32,
    #[serde(default = "default_short_break_duration")]
    pub short_break_duration: u32,
    #[serde(default = "default_long_break_duration")]
    pub long_break_duration: u32,
    #[serde(default = "default_sessions_until_long_break")]
    pub sessions_until_long_break: u32,
    #[serde(default)]
    pub auto_start_breaks: bool,
    #[serde(default)]
    pub auto_start_pomodoros: bool,
    #[serde(default = "default_true")]
    pub notification_sound: bool,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_theme")]
    pub theme: String,
}

// Default functions
fn default_work_duration() -> u32 {
    25
}
fn default_short_break_duration() -> u32 {
    5
}
fn default_long_break_duration() -> u32 {
    15
}
fn default_sessions_until_long_break() -> u32 {
    4
}
fn default_true() -> bool {
    true
}
fn default_theme() -> String {
    "dark".into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_duration: default_work_duration(),
            short_break_duration: default_short_break_duration(),
            long_break_duration: default_long_break_duration(),
            sessions_until_long_break: default_sessions_until_long_break(),
            auto_start_breaks: false,
            auto_start_pomodoros: false,
            notification_sound: true,
            api_key: String::new(),
            theme: default_theme(),
        }
    }
}

/// Settings backed by a JSON file, with typed accessors and change
/// notification.
#[derive(Debug)]
pub struct SettingsStore {
    settings: Settings,
    path: PathBuf,
    listeners: Listeners<SettingsEvent>,
}

impl SettingsStore {
    /// Open the store at the default location, `<data_dir>/settings.json`.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be prepared.
    pub fn open_default() -> Result<Self> {
        Ok(Self::with_path(data_dir()?.join("settings.json")))
    }

    /// Open a store backed by the given file.
    ///
    /// A missing or unparseable file yields the defaults.
    pub fn with_path(path: PathBuf) -> Self {
        let settings = std::fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        Self {
            settings,
            path,
            listeners: Listeners::new(),
        }
    }

    /// Register a callback invoked for every event the store emits.
    pub fn subscribe(&mut self, callback: impl FnMut(&SettingsEvent) + 'static) {
        self.listeners.subscribe(callback);
    }

    /// The full settings document.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Typed accessors ──────────────────────────────────────────────

    pub fn work_duration(&self) -> u32 {
        self.settings.work_duration
    }

    pub fn set_work_duration(&mut self, minutes: u32) {
        if self.settings.work_duration == minutes {
            return;
        }
        self.settings.work_duration = minutes;
        self.persist_and_notify(SettingsEvent::WorkDurationChanged {
            minutes,
            at: Utc::now(),
        });
    }

    pub fn short_break_duration(&self) -> u32 {
        self.settings.short_break_duration
    }

    pub fn set_short_break_duration(&mut self, minutes: u32) {
        if self.settings.short_break_duration == minutes {
            return;
        }
        self.settings.short_break_duration = minutes;
        self.persist_and_notify(SettingsEvent::ShortBreakDurationChanged {
            minutes,
            at: Utc::now(),
        });
    }

    pub fn long_break_duration(&self) -> u32 {
        self.settings.long_break_duration
    }

    pub fn set_long_break_duration(&mut self, minutes: u32) {
        if self.settings.long_break_duration == minutes {
            return;
        }
        self.settings.long_break_duration = minutes;
        self.persist_and_notify(SettingsEvent::LongBreakDurationChanged {
            minutes,
            at: Utc::now(),
        });
    }

    pub fn sessions_until_long_break(&self) -> u32 {
        self.settings.sessions_until_long_break
    }

    pub fn set_sessions_until_long_break(&mut self, sessions: u32) {
        if self.settings.sessions_until_long_break == sessions {
            return;
        }
        self.settings.sessions_until_long_break = sessions;
        self.persist_and_notify(SettingsEvent::SessionsUntilLongBreakChanged {
            sessions,
            at: Utc::now(),
        });
    }

    pub fn auto_start_breaks(&self) -> bool {
        self.settings.auto_start_breaks
    }

    pub fn set_auto_start_breaks(&mut self, enabled: bool) {
        if self.settings.auto_start_breaks == enabled {
            return;
        }
        self.settings.auto_start_breaks = enabled;
        self.persist_and_notify(SettingsEvent::AutoStartBreaksChanged {
            enabled,
            at: Utc::now(),
        });
    }

    pub fn auto_start_pomodoros(&self) -> bool {
        self.settings.auto_start_pomodoros
    }

    pub fn set_auto_start_pomodoros(&mut self, enabled: bool) {
        if self.settings.auto_start_pomodoros == enabled {
            return;
        }
        self.settings.auto_start_pomodoros = enabled;
        self.persist_and_notify(SettingsEvent::AutoStartPomodorosChanged {
            enabled,
            at: Utc::now(),
        });
    }

    pub fn notification_sound(&self) -> bool {
        self.settings.notification_sound
    }

    pub fn set_notification_sound(&mut self, enabled: bool) {
        if self.settings.notification_sound == enabled {
            return;
        }
        self.settings.notification_sound = enabled;
        self.persist_and_notify(SettingsEvent::NotificationSoundChanged {
            enabled,
            at: Utc::now(),
        });
    }

    pub fn api_key(&self) -> &str {
        &self.settings.api_key
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) {
        let key = key.into();
        if self.settings.api_key == key {
            return;
        }
        self.settings.api_key = key.clone();
        self.persist_and_notify(SettingsEvent::ApiKeyChanged {
            key,
            at: Utc::now(),
        });
    }

    pub fn theme(&self) -> &str {
        &self.settings.theme
    }

    pub fn set_theme(&mut self, theme: impl Into<String>) {
        let theme = theme.into();
        if self.settings.theme == theme {
            return;
        }
        self.settings.theme = theme.clone();
        self.persist_and_notify(SettingsEvent::ThemeChanged {
            theme,
            at: Utc::now(),
        });
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn persist_and_notify(&mut self, event: SettingsEvent) {
        // The in-memory value is already updated; a failed write simply
        // leaves the previous file contents behind.
        let _ = self.save();
        self.listeners.emit(&event);
        self.listeners.emit(&SettingsEvent::Changed { at: Utc::now() });
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.settings)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::with_path(dir.path().join("settings.json"))
    }

    fn recorded(store: &mut SettingsStore) -> Rc<RefCell<Vec<SettingsEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        store.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        events
    }

    #[test]
    fn defaults_when_no_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.work_duration(), 25);
        assert_eq!(store.short_break_duration(), 5);
        assert_eq!(store.long_break_duration(), 15);
        assert_eq!(store.sessions_until_long_break(), 4);
        assert!(!store.auto_start_breaks());
        assert!(!store.auto_start_pomodoros());
        assert!(store.notification_sound());
        assert_eq!(store.api_key(), "");
        assert_eq!(store.theme(), "dark");
    }

    #[test]
    fn setter_persists_and_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        {
            let mut store = SettingsStore::with_path(path.clone());
            store.set_work_duration(50);
            store.set_theme("light");
        }
        let store = SettingsStore::with_path(path);
        assert_eq!(store.work_duration(), 50);
        assert_eq!(store.theme(), "light");
    }

    #[test]
    fn setter_emits_field_then_generic() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let events = recorded(&mut store);
        store.set_work_duration(30);
        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            SettingsEvent::WorkDurationChanged { minutes: 30, .. }
        ));
        assert!(matches!(events[1], SettingsEvent::Changed { .. }));
    }

    #[test]
    fn unchanged_write_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let events = recorded(&mut store);
        store.set_work_duration(30);
        store.set_work_duration(30);
        // One change, one field event + one generic event.
        assert_eq!(events.borrow().len(), 2);
        assert_eq!(store.work_duration(), 30);
    }

    #[test]
    fn unchanged_default_write_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let events = recorded(&mut store);
        store.set_notification_sound(true); // already the default
        assert!(events.borrow().is_empty());
        assert!(!dir.path().join("settings.json").exists());
    }

    #[test]
    fn unknown_keys_in_file_are_ignored_and_missing_keys_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"work_duration": 40, "legacy_key": 1}"#).unwrap();
        let store = SettingsStore::with_path(path);
        assert_eq!(store.work_duration(), 40);
        assert_eq!(store.short_break_duration(), 5);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json at all").unwrap();
        let store = SettingsStore::with_path(path);
        assert_eq!(*store.settings(), Settings::default());
    }

    #[test]
    fn api_key_change_carries_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let events = recorded(&mut store);
        store.set_api_key("secret");
        assert!(matches!(
            &events.borrow()[0],
            SettingsEvent::ApiKeyChanged { key, .. } if key == "secret"
        ));
    }
}
