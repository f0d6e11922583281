//! Theme preference, resolution and the injected theme context.
//!
//! A reader picks light, dark, or "follow the system". Renderers never see the
//! preference directly: they ask the [`ThemeContext`] for the resolved
//! [`ThemeVariant`]. The context is passed by reference to every renderer and
//! only its owner can change it, so there is one writer and any number of
//! readers for the lifetime of a render.
//!
//! Persistence is somebody else's job. In the browser the page script keeps
//! the preference in `localStorage`; on the build side the store is seeded
//! from `config.toml` and the `--theme` flag. Both sit behind [`ThemeStore`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the reader asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

/// A concrete rendering variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Light,
    Dark,
}

impl ThemeVariant {
    pub const ALL: [ThemeVariant; 2] = [ThemeVariant::Light, ThemeVariant::Dark];

    /// Value of the `data-theme` / `data-variant` attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeVariant::Light => "light",
            ThemeVariant::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ThemePreference {
    pub const ALL: [ThemePreference; 3] = [
        ThemePreference::Light,
        ThemePreference::Dark,
        ThemePreference::System,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }

    /// Resolve against the OS signal. No signal means light.
    pub fn resolve(self, system: Option<ThemeVariant>) -> ThemeVariant {
        match self {
            ThemePreference::Light => ThemeVariant::Light,
            ThemePreference::Dark => ThemeVariant::Dark,
            ThemePreference::System => system.unwrap_or_default(),
        }
    }

    /// Next preference for the two-state toggle button.
    ///
    /// The toggle flips the *resolved* variant, so `system` becomes whichever
    /// explicit variant is not currently showing.
    pub fn toggled(self, system: Option<ThemeVariant>) -> ThemePreference {
        match self.resolve(system) {
            ThemeVariant::Dark => ThemePreference::Light,
            ThemeVariant::Light => ThemePreference::Dark,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme preference: {0} (expected light, dark or system)")]
pub struct ParsePreferenceError(String);

impl FromStr for ThemePreference {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            _ => Err(ParsePreferenceError(s.to_string())),
        }
    }
}

/// Where the preference is persisted between sessions.
pub trait ThemeStore {
    /// The stored preference, if one was ever saved.
    fn get(&self) -> Option<ThemePreference>;
    fn set(&mut self, preference: ThemePreference);
}

/// Store that lives as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    preference: Option<ThemePreference>,
}

impl MemoryThemeStore {
    pub fn new(initial: Option<ThemePreference>) -> Self {
        Self {
            preference: initial,
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn get(&self) -> Option<ThemePreference> {
        self.preference
    }

    fn set(&mut self, preference: ThemePreference) {
        self.preference = Some(preference);
    }
}

/// Theme state handed to renderers.
pub struct ThemeContext<S: ThemeStore = MemoryThemeStore> {
    store: S,
    preference: ThemePreference,
    system: Option<ThemeVariant>,
}

impl<S: ThemeStore> ThemeContext<S> {
    /// Start a session from whatever the store holds, or `system`.
    pub fn new(store: S, system: Option<ThemeVariant>) -> Self {
        let preference = store.get().unwrap_or_default();
        Self {
            store,
            preference,
            system,
        }
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub fn variant(&self) -> ThemeVariant {
        self.preference.resolve(self.system)
    }

    /// Explicit user choice: remembered in the store.
    pub fn set_preference(&mut self, preference: ThemePreference) {
        tracing::debug!(from = %self.preference, to = %preference, "theme preference changed");
        self.preference = preference;
        self.store.set(preference);
    }

    /// Dark ↔ light toggle.
    pub fn toggle(&mut self) -> ThemeVariant {
        let next = self.preference.toggled(self.system);
        self.set_preference(next);
        self.variant()
    }

    /// New OS signal; only matters while the preference is `system`.
    pub fn set_system(&mut self, system: Option<ThemeVariant>) {
        self.system = system;
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl ThemeContext<MemoryThemeStore> {
    /// Context with a fixed preference and no OS signal.
    pub fn fixed(preference: ThemePreference) -> Self {
        Self::new(MemoryThemeStore::new(Some(preference)), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_preferences_ignore_system() {
        assert_eq!(
            ThemePreference::Light.resolve(Some(ThemeVariant::Dark)),
            ThemeVariant::Light
        );
        assert_eq!(
            ThemePreference::Dark.resolve(Some(ThemeVariant::Light)),
            ThemeVariant::Dark
        );
    }

    #[test]
    fn system_follows_signal() {
        assert_eq!(
            ThemePreference::System.resolve(Some(ThemeVariant::Dark)),
            ThemeVariant::Dark
        );
    }

    #[test]
    fn system_without_signal_falls_back_to_light() {
        assert_eq!(ThemePreference::System.resolve(None), ThemeVariant::Light);
    }

    #[test]
    fn toggle_cycles_dark_light_dark() {
        let mut ctx = ThemeContext::fixed(ThemePreference::Dark);
        assert_eq!(ctx.toggle(), ThemeVariant::Light);
        assert_eq!(ctx.toggle(), ThemeVariant::Dark);
        assert_eq!(ctx.preference(), ThemePreference::Dark);
    }

    #[test]
    fn toggle_from_system_flips_resolved_variant() {
        let store = MemoryThemeStore::new(None);
        let mut ctx = ThemeContext::new(store, Some(ThemeVariant::Dark));
        assert_eq!(ctx.preference(), ThemePreference::System);
        assert_eq!(ctx.toggle(), ThemeVariant::Light);
        assert_eq!(ctx.preference(), ThemePreference::Light);
    }

    #[test]
    fn context_starts_from_stored_preference() {
        let store = MemoryThemeStore::new(Some(ThemePreference::Dark));
        let ctx = ThemeContext::new(store, None);
        assert_eq!(ctx.variant(), ThemeVariant::Dark);
    }

    #[test]
    fn context_defaults_to_system() {
        let ctx = ThemeContext::new(MemoryThemeStore::default(), Some(ThemeVariant::Dark));
        assert_eq!(ctx.preference(), ThemePreference::System);
        assert_eq!(ctx.variant(), ThemeVariant::Dark);
    }

    #[test]
    fn set_preference_persists() {
        let mut ctx = ThemeContext::new(MemoryThemeStore::default(), None);
        ctx.set_preference(ThemePreference::Dark);
        assert_eq!(ctx.store().get(), Some(ThemePreference::Dark));
    }

    #[test]
    fn system_signal_change_applies_only_to_system() {
        let mut ctx = ThemeContext::new(MemoryThemeStore::default(), Some(ThemeVariant::Light));
        ctx.set_system(Some(ThemeVariant::Dark));
        assert_eq!(ctx.variant(), ThemeVariant::Dark);

        ctx.set_preference(ThemePreference::Light);
        ctx.set_system(Some(ThemeVariant::Dark));
        assert_eq!(ctx.variant(), ThemeVariant::Light);
    }

    #[test]
    fn parse_preference() {
        assert_eq!("Dark".parse::<ThemePreference>(), Ok(ThemePreference::Dark));
        assert_eq!(" system ".parse::<ThemePreference>(), Ok(ThemePreference::System));
        assert!("sepia".parse::<ThemePreference>().is_err());
    }

    #[test]
    fn preference_serializes_lowercase() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            theme: ThemePreference,
        }
        let s = toml::to_string(&Wrapper {
            theme: ThemePreference::System,
        })
        .unwrap();
        assert!(s.contains("theme = \"system\""));
        let w: Wrapper = toml::from_str("theme = \"dark\"").unwrap();
        assert_eq!(w.theme, ThemePreference::Dark);
    }
}
