//! The presentation environment: where theme custom properties live and
//! where arbitrary color notations can be turned into computed colors.

use crate::oklch::{ColorConverter, NumericConverter, parse_rgb_function};
use crate::theme::Theme;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub trait PresentationEnvironment: Send + Sync {
    /// The computed value of a custom property, trimmed. `None` when unset
    /// or when no rendering surface is attached.
    fn custom_property(&self, name: &str) -> Option<String>;

    /// The final `rgb(r, g, b)` color for an arbitrary notation.
    fn computed_color(&self, notation: &str) -> Option<String>;

    fn can_compute_colors(&self) -> bool {
        true
    }
}

/// Accepts `primary` as well as `--primary`.
pub fn normalize_property_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        name.to_string()
    } else {
        format!("--{name}")
    }
}

/// No rendering surface: every query comes back empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl PresentationEnvironment for Headless {
    fn custom_property(&self, _name: &str) -> Option<String> {
        None
    }

    fn computed_color(&self, _notation: &str) -> Option<String> {
        None
    }

    fn can_compute_colors(&self) -> bool {
        false
    }
}

/// An in-memory environment backed by a theme's custom properties.
///
/// Properties can change while resolvers hold the environment, as a host page
/// restyling itself would. Cached colors go stale until the caches are cleared.
#[derive(Debug, Default)]
pub struct ThemeEnvironment {
    properties: RwLock<HashMap<String, String>>,
}

impl ThemeEnvironment {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            properties: RwLock::new(theme.custom_properties().into_iter().collect()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.properties.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.properties.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_property(&self, name: &str, value: impl Into<String>) {
        self.write()
            .insert(normalize_property_name(name), value.into());
    }

    /// Replace every property with `theme`'s. Overrides are dropped.
    pub fn set_theme(&self, theme: &Theme) {
        *self.write() = theme.custom_properties().into_iter().collect();
    }

    pub fn with_overrides<K, V>(self, overrides: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in overrides {
            self.set_property(name.as_ref(), value);
        }
        self
    }
}

impl PresentationEnvironment for ThemeEnvironment {
    fn custom_property(&self, name: &str) -> Option<String> {
        let properties = self.read();
        let value = properties.get(&normalize_property_name(name))?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    fn computed_color(&self, notation: &str) -> Option<String> {
        let color = parse_rgb_function(notation).or_else(|| NumericConverter.to_hex(notation))?;
        let (r, g, b) = color.rgb();
        Some(format!("rgb({r}, {g}, {b})"))
    }
}
