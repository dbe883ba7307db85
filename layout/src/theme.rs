//! Light/dark theme preference.
//!
//! The server may render the resolved theme into the root `data-bs-theme`
//! attribute. When it does, that value wins over the browser's stored
//! preference and is copied into storage so both converge. Otherwise the
//! stored value is used, then the configured default. Invalid values from
//! either source coerce to the default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ChromeConfig;
use crate::store::{ParseError, PreferenceStore, persist};
use crate::surface::{ClassPatch, Surface, Target};

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

/// Button class marking the selected theme option.
pub const ACTIVE_CLASS: &str = "active";
/// Filled button style for the selected theme option.
pub const SELECTED_BUTTON_CLASS: &str = "btn-primary";
/// Outline button style for unselected theme options.
pub const UNSELECTED_BUTTON_CLASS: &str = "btn-outline-secondary";

/// Color theme applied to the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Wire value used for attributes, storage, and button values.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse `raw`, falling back to `fallback` when absent or invalid.
    #[must_use]
    pub fn coerce(raw: Option<&str>, fallback: Self) -> Self {
        let Some(raw) = raw else {
            return fallback;
        };
        match raw.parse() {
            Ok(theme) => theme,
            Err(err) => {
                log::debug!("{err}; using {fallback}");
                fallback
            }
        }
    }

    /// Theme selected by the switch: checked means dark.
    #[must_use]
    pub fn from_switch(checked: bool) -> Self {
        if checked { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

impl FromStr for Theme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ParseError { kind: "theme", value: other.to_owned() }),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of start-up theme resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeResolution {
    /// Theme to apply.
    pub theme: Theme,
    /// Whether storage must be updated to match the server-rendered theme.
    pub write_back: bool,
}

/// Resolve the start-up theme from the server attribute and stored value.
#[must_use]
pub fn resolve_initial(server: Option<&str>, stored: Option<&str>, default: Theme) -> ThemeResolution {
    if let Some(Ok(theme)) = server.map(str::parse::<Theme>) {
        return ThemeResolution { theme, write_back: stored != Some(theme.as_str()) };
    }
    ThemeResolution { theme: Theme::coerce(stored, default), write_back: false }
}

/// Class patch for a theme option button whose `value` attribute is `value`.
///
/// A button is selected only on an exact match; buttons without a value are
/// always unselected.
#[must_use]
pub fn button_patch(value: Option<&str>, theme: Theme) -> ClassPatch {
    let selected = value == Some(theme.as_str());
    ClassPatch::new()
        .with(ACTIVE_CLASS, selected)
        .with(SELECTED_BUTTON_CLASS, selected)
        .with(UNSELECTED_BUTTON_CLASS, !selected)
}

/// Owns the active theme and every control that reflects it.
#[derive(Debug, Clone)]
pub struct ThemeController {
    theme: Theme,
    default: Theme,
    storage_key: String,
    has_switch: bool,
    button_values: Vec<Option<String>>,
}

impl ThemeController {
    /// Resolve and apply the start-up theme.
    ///
    /// `server_attr` is the root `data-bs-theme` value as rendered by the
    /// server; `button_values` holds the `value` attribute of each theme
    /// option button in document order.
    pub fn start<S, F>(
        server_attr: Option<&str>,
        has_switch: bool,
        button_values: Vec<Option<String>>,
        config: &ChromeConfig,
        store: &mut S,
        surface: &mut F,
    ) -> Self
    where
        S: PreferenceStore,
        F: Surface,
    {
        let stored = store.get(&config.theme_storage_key);
        let resolution = resolve_initial(server_attr, stored.as_deref(), config.default_theme);
        if resolution.write_back {
            persist(store, &config.theme_storage_key, resolution.theme.as_str());
        }
        log::debug!("initial theme {} (server={server_attr:?}, stored={stored:?})", resolution.theme);

        let mut controller = Self {
            theme: resolution.theme,
            default: config.default_theme,
            storage_key: config.theme_storage_key.clone(),
            has_switch,
            button_values,
        };
        controller.render(surface);
        controller
    }

    /// Apply a requested theme value, coercing invalid or absent input to the default.
    pub fn apply<F: Surface>(&mut self, requested: Option<&str>, surface: &mut F) -> Theme {
        self.theme = Theme::coerce(requested, self.default);
        self.render(surface);
        self.theme
    }

    /// Handle a change event from the theme switch: apply and persist.
    pub fn on_switch_changed<S, F>(&mut self, checked: bool, store: &mut S, surface: &mut F) -> Theme
    where
        S: PreferenceStore,
        F: Surface,
    {
        self.theme = Theme::from_switch(checked);
        self.render(surface);
        persist(store, &self.storage_key, self.theme.as_str());
        self.theme
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    fn render<F: Surface>(&self, surface: &mut F) {
        surface.set_theme(self.theme);
        if self.has_switch {
            surface.set_toggle_checked(self.theme.is_dark());
        }
        for (index, value) in self.button_values.iter().enumerate() {
            surface.apply_classes(Target::ThemeButton(index), &button_patch(value.as_deref(), self.theme));
        }
    }
}
