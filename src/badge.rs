use crate::config::Config;
use crate::environment::PresentationEnvironment;
use crate::error::{Error, Result};
use crate::icons::{IconDefinition, IconElement, IconLookup, IconTable, normalize_icon_name};
use crate::oklch::select_converter;
use crate::resolver::TokenResolver;
use crate::shade::DEFAULT_BORDER_LEVELS;
use crate::symbol::{BadgeColors, SymbolDescriptor, synthesize};
use crate::token::ResolvedColor;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_FALLBACK_ICON: &str = "circle-user";
pub const DEFAULT_ICON_COLOR: &str = "#ffffff";

#[derive(Debug, Clone)]
pub struct BadgeOptions {
    pub fallback_icon: String,
    pub icon_color: String,
    /// How many shade levels darker the border is than the background.
    pub border_levels: i32,
}

impl Default for BadgeOptions {
    fn default() -> Self {
        Self {
            fallback_icon: DEFAULT_FALLBACK_ICON.to_string(),
            icon_color: DEFAULT_ICON_COLOR.to_string(),
            border_levels: DEFAULT_BORDER_LEVELS,
        }
    }
}

/// Turns `(color token, icon name)` pairs into badge symbols.
///
/// Owns both caches. Bad colors and unknown icons degrade to fallbacks; only a
/// fallback icon missing from the table is reported as an error.
pub struct BadgeRenderer {
    resolver: TokenResolver,
    icons: IconLookup,
    options: BadgeOptions,
}

impl BadgeRenderer {
    pub fn new(resolver: TokenResolver, icons: IconLookup) -> Self {
        Self {
            resolver,
            icons,
            options: BadgeOptions::default(),
        }
    }

    /// Bundled icons, numeric conversion, default options.
    pub fn with_environment(environment: Arc<dyn PresentationEnvironment>) -> Result<Self> {
        let table = IconTable::bundled()?;
        Ok(Self::new(
            TokenResolver::with_environment(environment),
            IconLookup::new(Arc::new(table)),
        ))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let environment: Arc<dyn PresentationEnvironment> = Arc::new(config.environment());
        let converter = select_converter(config.converter, environment.clone());
        let resolver =
            TokenResolver::new(environment, converter).with_fallback(config.fallback_color.clone());
        let table = match &config.icons {
            Some(path) => IconTable::from_path(path)?,
            None => IconTable::bundled()?,
        };
        let icons = IconLookup::new(Arc::new(table));
        Ok(Self::new(resolver, icons).with_options(BadgeOptions {
            fallback_icon: config.fallback_icon.clone(),
            icon_color: config.icon_color.clone(),
            border_levels: config.border_levels,
        }))
    }

    pub fn with_options(mut self, options: BadgeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &BadgeOptions {
        &self.options
    }

    pub fn resolver(&self) -> &TokenResolver {
        &self.resolver
    }

    pub fn icons(&self) -> &IconLookup {
        &self.icons
    }

    pub fn resolve_color(&self, token: &str) -> ResolvedColor {
        self.resolver.resolve(token)
    }

    pub fn border_color(&self, token: &str) -> ResolvedColor {
        self.resolver.shifted(token, self.options.border_levels)
    }

    pub fn lookup_icon(&self, icon_ref: &str) -> Option<IconDefinition> {
        self.icons.lookup(icon_ref)
    }

    /// Compose a badge for already-resolved icon geometry.
    pub fn synthesize(
        &self,
        elements: &[IconElement],
        background: &str,
        icon_color: Option<&str>,
    ) -> SymbolDescriptor {
        let colors = BadgeColors {
            background: self.resolve_color(background),
            border: self.border_color(background),
            icon: self.resolve_color(icon_color.unwrap_or(&self.options.icon_color)),
        };
        synthesize(elements, &colors)
    }

    /// Look the icon up and compose its badge, substituting the fallback icon
    /// for unknown names.
    pub fn symbol(
        &self,
        icon_ref: &str,
        background: &str,
        icon_color: Option<&str>,
    ) -> Result<SymbolDescriptor> {
        let elements = match self.icons.lookup(icon_ref) {
            Some(elements) => elements,
            None => {
                debug!(icon = icon_ref, fallback = %self.options.fallback_icon, "using fallback icon");
                self.fallback_icon()?
            }
        };
        Ok(self.synthesize(&elements, background, icon_color))
    }

    fn fallback_icon(&self) -> Result<IconDefinition> {
        self.icons
            .lookup(&self.options.fallback_icon)
            .ok_or_else(|| Error::FallbackIconMissing(normalize_icon_name(&self.options.fallback_icon)))
    }

    pub fn preload_icons<'a>(&self, icon_refs: impl IntoIterator<Item = &'a str>) {
        self.icons.preload(icon_refs);
    }

    pub fn clear_color_cache(&self) {
        self.resolver.clear_cache();
    }

    pub fn clear_icon_cache(&self) {
        self.icons.clear_cache();
    }

    /// Drop every cached color and icon. Required after a theme change.
    pub fn clear_caches(&self) {
        self.clear_color_cache();
        self.clear_icon_cache();
    }
}
