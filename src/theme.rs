use crate::errors::AppResult;
use crate::models::Theme;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// External user-preference collaborator for the light/dark theme. The core
/// only reads and writes through this seam.
pub trait ThemeStore: Send + Sync {
    fn get(&self) -> Theme;
    fn set(&self, theme: Theme) -> AppResult<()>;
}

#[derive(Debug)]
pub struct InMemoryThemeStore {
    theme: Mutex<Theme>,
}

impl InMemoryThemeStore {
    pub fn new(initial: Theme) -> Self {
        Self {
            theme: Mutex::new(initial),
        }
    }
}

impl Default for InMemoryThemeStore {
    fn default() -> Self {
        Self::new(Theme::Light)
    }
}

impl ThemeStore for InMemoryThemeStore {
    fn get(&self) -> Theme {
        *self.theme.lock().expect("theme lock")
    }

    fn set(&self, theme: Theme) -> AppResult<()> {
        *self.theme.lock().expect("theme lock") = theme;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ThemePreference {
    theme: Theme,
}

/// JSON-file preference store under the app data dir. Missing or unreadable
/// files fall back to light.
#[derive(Debug)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("theme.json"),
        }
    }
}

impl ThemeStore for FileThemeStore {
    fn get(&self) -> Theme {
        let Ok(raw) = std::fs::read_to_string(&self.path) else {
            return Theme::Light;
        };
        match serde_json::from_str::<ThemePreference>(&raw) {
            Ok(preference) => preference.theme,
            Err(error) => {
                tracing::warn!(error = %error, path = %self.path.display(), "unreadable theme preference, falling back to light");
                Theme::Light
            }
        }
    }

    fn set(&self, theme: Theme) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating preference dir {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(&ThemePreference { theme })?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("writing theme preference {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_store_round_trips() {
        let store = InMemoryThemeStore::default();
        assert_eq!(store.get(), Theme::Light);
        store.set(Theme::Dark).expect("set theme");
        assert_eq!(store.get(), Theme::Dark);
    }

    #[test]
    fn file_store_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileThemeStore::new(dir.path());
        assert_eq!(store.get(), Theme::Light);

        store.set(Theme::Dark).expect("persist theme");
        assert_eq!(store.get(), Theme::Dark);

        let reopened = FileThemeStore::new(dir.path());
        assert_eq!(reopened.get(), Theme::Dark);
    }

    #[test]
    fn corrupt_preference_falls_back_to_light() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("theme.json"), "{not json").expect("write corrupt file");
        let store = FileThemeStore::new(dir.path());
        assert_eq!(store.get(), Theme::Light);
    }
}
