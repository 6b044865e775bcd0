use crate::badge::{DEFAULT_FALLBACK_ICON, DEFAULT_ICON_COLOR};
use crate::environment::ThemeEnvironment;
use crate::oklch::{ConverterStrategy, fallback_color};
use crate::shade::DEFAULT_BORDER_LEVELS;
use crate::theme::Theme;
use crate::token::ResolvedColor;
use anyhow::{Context, anyhow};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    /// Custom property overrides applied on top of the theme.
    pub theme_variables: BTreeMap<String, String>,
    pub fallback_color: ResolvedColor,
    pub fallback_icon: String,
    pub icon_color: String,
    pub border_levels: i32,
    pub converter: ConverterStrategy,
    /// External `icon-nodes.json`. The bundled subset is used when unset.
    pub icons: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::light(),
            theme_variables: BTreeMap::new(),
            fallback_color: fallback_color(),
            fallback_icon: DEFAULT_FALLBACK_ICON.to_string(),
            icon_color: DEFAULT_ICON_COLOR.to_string(),
            border_levels: DEFAULT_BORDER_LEVELS,
            converter: ConverterStrategy::default(),
            icons: None,
        }
    }
}

impl Config {
    pub fn environment(&self) -> ThemeEnvironment {
        ThemeEnvironment::from_theme(&self.theme).with_overrides(&self.theme_variables)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<BTreeMap<String, String>>,
    fallback_color: Option<String>,
    fallback_icon: Option<String>,
    icon_color: Option<String>,
    border_levels: Option<i32>,
    converter: Option<ConverterStrategy>,
    icons: Option<PathBuf>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let mut config =
        parse_config(&contents).with_context(|| format!("invalid config {}", path.display()))?;
    // Icon tables named in a config file are relative to that file.
    if let (Some(icons), Some(dir)) = (config.icons.as_mut(), path.parent()) {
        if icons.is_relative() {
            *icons = dir.join(&*icons);
        }
    }
    Ok(config)
}

/// Parse config text. JSON5 is accepted, so comments and trailing commas are fine.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme =
            Theme::from_name(theme_name).ok_or_else(|| anyhow!("unknown theme {theme_name:?}"))?;
    }
    if let Some(vars) = parsed.theme_variables {
        config.theme_variables = vars;
    }
    if let Some(v) = parsed.fallback_color {
        config.fallback_color = ResolvedColor::from_hex(&v)
            .ok_or_else(|| anyhow!("fallbackColor must be a #rrggbb color, got {v:?}"))?;
    }
    if let Some(v) = parsed.fallback_icon {
        config.fallback_icon = v;
    }
    if let Some(v) = parsed.icon_color {
        config.icon_color = v;
    }
    if let Some(v) = parsed.border_levels {
        config.border_levels = v;
    }
    if let Some(v) = parsed.converter {
        config.converter = v;
    }
    if let Some(v) = parsed.icons {
        config.icons = Some(v);
    }
    Ok(config)
}
