//! Appearance preference (light, dark or follow the system) and the shared
//! Tailwind class constants that keep forms and cards consistent.

use super::storage::{APPEARANCE_KEY, KeyValueStore};
use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
    #[default]
    System,
}

impl Appearance {
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::System];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::System => "System",
        }
    }

    /// Whether the dark palette applies, given the OS preference.
    #[must_use]
    pub fn is_dark(self, system_prefers_dark: bool) -> bool {
        match self {
            Self::Light => false,
            Self::Dark => true,
            Self::System => system_prefers_dark,
        }
    }

    /// Stored preference; unknown or missing values mean `System`.
    pub fn load<K: KeyValueStore>(storage: &K) -> Self {
        storage
            .get(APPEARANCE_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// # Errors
    /// Returns `AppError::Storage` when the preference cannot be written.
    pub fn save<K: KeyValueStore>(self, storage: &K) -> Result<(), super::AppError> {
        storage.set(APPEARANCE_KEY, self.as_str())
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Appearance {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(format!("unknown appearance `{other}`")),
        }
    }
}

/// Toggles the `dark` class on the document root.
#[cfg(target_arch = "wasm32")]
pub fn apply_appearance(appearance: Appearance) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let prefers_dark = window
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());
    let Some(root) = window.document().and_then(|document| document.document_element()) else {
        return;
    };
    let classes = root.class_list();
    let result = if appearance.is_dark(prefers_dark) {
        classes.add_1("dark")
    } else {
        classes.remove_1("dark")
    };
    if result.is_err() {
        tracing::warn!(%appearance, "failed to apply appearance");
    }
}

/// Applies the stored preference before the first render.
#[cfg(target_arch = "wasm32")]
pub fn initialize_appearance() {
    apply_appearance(Appearance::load(&super::storage::BrowserStorage));
}

pub struct Theme;

impl Theme {
    /// Text input; pair with `INPUT_ERROR` when the field has a validation error.
    pub const INPUT: &'static str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white";

    pub const INPUT_ERROR: &'static str = "border-red-500 dark:border-red-400";

    pub const LABEL: &'static str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";

    /// Inline validation message under a field.
    pub const FIELD_ERROR: &'static str = "mt-1 text-sm text-red-600 dark:text-red-400";

    pub const CARD: &'static str = "rounded-xl border border-gray-200 bg-white p-6 shadow-sm dark:border-gray-700 dark:bg-gray-800";

    pub const LINK: &'static str = "font-medium text-blue-700 hover:underline dark:text-blue-400";

    pub const MUTED: &'static str = "text-sm text-gray-500 dark:text-gray-400";
}

#[cfg(test)]
mod tests {
    use super::Appearance;
    use crate::app_lib::storage::{APPEARANCE_KEY, KeyValueStore, MemoryStorage};

    #[test]
    fn load_defaults_to_system() {
        let storage = MemoryStorage::new();
        assert_eq!(Appearance::load(&storage), Appearance::System);

        storage.set(APPEARANCE_KEY, "sepia").ok();
        assert_eq!(Appearance::load(&storage), Appearance::System);
    }

    #[test]
    fn save_round_trips_through_storage() {
        let storage = MemoryStorage::new();
        assert!(Appearance::Dark.save(&storage).is_ok());
        assert_eq!(storage.get(APPEARANCE_KEY).as_deref(), Some("dark"));
        assert_eq!(Appearance::load(&storage), Appearance::Dark);
    }

    #[test]
    fn system_follows_os_preference() {
        assert!(Appearance::System.is_dark(true));
        assert!(!Appearance::System.is_dark(false));
        assert!(Appearance::Dark.is_dark(false));
        assert!(!Appearance::Light.is_dark(true));
    }
}
