use crate::cache::{CacheStats, Cached, ResolutionCache};
use crate::environment::{PresentationEnvironment, normalize_property_name};
use crate::oklch::{ColorConverter, NumericConverter, convert_with, fallback_color};
use crate::palette;
use crate::shade;
use crate::token::{ColorToken, ResolvedColor, ThemeAlias, TokenError};
use std::sync::Arc;
use tracing::{debug, warn};

/// Returned by [`TokenResolver::theme_color`] for unset properties.
const UNSET_THEME_COLOR: (u8, u8, u8) = (0, 0, 0);

/// Resolves color tokens to hex against a palette and the active theme.
///
/// Results, fallbacks included, are cached under the original token text.
/// Call [`TokenResolver::clear_cache`] after switching themes.
pub struct TokenResolver {
    environment: Arc<dyn PresentationEnvironment>,
    converter: Arc<dyn ColorConverter>,
    fallback: ResolvedColor,
    cache: Arc<ResolutionCache<ResolvedColor>>,
    /// Keyed by `--property`, apart from token text.
    theme_cache: ResolutionCache<ResolvedColor>,
}

impl TokenResolver {
    pub fn new(
        environment: Arc<dyn PresentationEnvironment>,
        converter: Arc<dyn ColorConverter>,
    ) -> Self {
        Self {
            environment,
            converter,
            fallback: fallback_color(),
            cache: Arc::new(ResolutionCache::new()),
            theme_cache: ResolutionCache::new(),
        }
    }

    /// Numeric conversion against `environment`.
    pub fn with_environment(environment: Arc<dyn PresentationEnvironment>) -> Self {
        Self::new(environment, Arc::new(NumericConverter))
    }

    pub fn with_fallback(mut self, fallback: ResolvedColor) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_cache(mut self, cache: Arc<ResolutionCache<ResolvedColor>>) -> Self {
        self.cache = cache;
        self
    }

    pub fn fallback(&self) -> &ResolvedColor {
        &self.fallback
    }

    pub fn resolve(&self, text: &str) -> ResolvedColor {
        let resolved = self.cache.get_or_insert_with(text, || {
            let color = match ColorToken::parse(text) {
                Ok(token) => self.resolve_token(&token),
                Err(err) => Err(err.to_string()),
            };
            Cached::Hit(color.unwrap_or_else(|reason| {
                warn!(token = text, %reason, fallback = %self.fallback, "color token not resolved");
                self.fallback.clone()
            }))
        });
        resolved.into_option().unwrap_or_else(|| self.fallback.clone())
    }

    /// Resolve a parsed token without touching the cache.
    pub fn resolve_token(&self, token: &ColorToken) -> Result<ResolvedColor, String> {
        match token {
            ColorToken::Literal(color) => Ok(color.clone()),
            ColorToken::Palette { family, shade } => palette::lookup(family, *shade)
                .and_then(ResolvedColor::from_hex)
                .ok_or_else(|| TokenError::UnknownFamily(family.to_string()).to_string()),
            ColorToken::Alias(alias) => self.resolve_alias(*alias),
        }
    }

    fn resolve_alias(&self, alias: ThemeAlias) -> Result<ResolvedColor, String> {
        let property = alias.custom_property();
        let value = self
            .environment
            .custom_property(&property)
            .ok_or_else(|| format!("{property} is not set in the presentation environment"))?;
        Ok(self.convert_value(&value))
    }

    fn convert_value(&self, value: &str) -> ResolvedColor {
        if value.starts_with('#') {
            return ResolvedColor::from_hex(value).unwrap_or_else(|| {
                warn!(value, fallback = %self.fallback, "malformed hex in theme variable");
                self.fallback.clone()
            });
        }
        convert_with(self.converter.as_ref(), value, &self.fallback)
    }

    /// Resolve `text` shifted by `levels` (positive is darker). Tokens that
    /// are not palette references resolve as-is.
    pub fn shifted(&self, text: &str, levels: i32) -> ResolvedColor {
        match ColorToken::parse(text) {
            Ok(token @ ColorToken::Palette { .. }) => {
                let shifted = shade::shift(&token, levels);
                self.resolve(&shifted.to_string())
            }
            _ => self.resolve(text),
        }
    }

    pub fn darker(&self, text: &str, levels: u32) -> ResolvedColor {
        self.shifted(text, levels.min(i32::MAX as u32) as i32)
    }

    pub fn lighter(&self, text: &str, levels: u32) -> ResolvedColor {
        self.shifted(text, -(levels.min(i32::MAX as u32) as i32))
    }

    /// Any custom property as hex; black when the property is unset.
    pub fn theme_color(&self, name: &str) -> ResolvedColor {
        let property = normalize_property_name(name);
        let resolved = self.theme_cache.get_or_insert_with(&property, || {
            Cached::Hit(match self.environment.custom_property(&property) {
                Some(value) => self.convert_value(&value),
                None => {
                    let (r, g, b) = UNSET_THEME_COLOR;
                    ResolvedColor::from_rgb(r, g, b)
                }
            })
        });
        resolved.into_option().unwrap_or_else(|| self.fallback.clone())
    }

    /// The design-system aliases in declaration order.
    pub fn chart_colors(&self) -> Vec<(ThemeAlias, ResolvedColor)> {
        ThemeAlias::ALL
            .iter()
            .map(|alias| (*alias, self.resolve(&alias.name())))
            .collect()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        debug!(
            entries = self.cache.len(),
            theme_entries = self.theme_cache.len(),
            "clearing color cache"
        );
        self.cache.clear();
        self.theme_cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{Headless, ThemeEnvironment};
    use crate::theme::Theme;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingConverter {
        calls: AtomicUsize,
    }

    impl ColorConverter for CountingConverter {
        fn to_hex(&self, notation: &str) -> Option<ResolvedColor> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            NumericConverter.to_hex(notation)
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    fn light() -> TokenResolver {
        TokenResolver::with_environment(Arc::new(ThemeEnvironment::from_theme(&Theme::light())))
    }

    #[test]
    fn resolves_palette_tokens() {
        let resolver = light();
        assert_eq!(resolver.resolve("blue-500"), "#3b82f6");
        assert_eq!(resolver.resolve("bg-red-700"), resolver.resolve("red-700"));
        assert_eq!(resolver.resolve("red-700"), "#b91c1c");
    }

    #[test]
    fn literal_hex_is_lowercased() {
        let resolver = light();
        assert_eq!(resolver.resolve("#ABCDEF"), "#abcdef");
        assert_eq!(resolver.resolve("#abcdef"), "#abcdef");
    }

    #[test]
    fn bad_tokens_fall_back() {
        let resolver = light();
        for bad in ["blue", "blue-550", "mauve-500", "light-blue-500", "#xyz", ""] {
            assert_eq!(resolver.resolve(bad), "#3b82f6", "{bad}");
        }
    }

    #[test]
    fn resolves_aliases_through_converter() {
        let resolver = light();
        assert_eq!(resolver.resolve("primary"), "#171717");
        assert_eq!(resolver.resolve("chart-1"), "#f54900");
        assert_eq!(resolver.resolve("bg-chart-2"), "#009689");
    }

    #[test]
    fn headless_aliases_fall_back() {
        let resolver = TokenResolver::with_environment(Arc::new(Headless));
        assert_eq!(resolver.resolve("primary"), "#3b82f6");
        assert_eq!(resolver.resolve("green-500"), "#22c55e");
    }

    #[test]
    fn hex_theme_values_pass_through() {
        let env = ThemeEnvironment::from_theme(&Theme::light());
        env.set_property("--accent", "#FF0000");
        let resolver = TokenResolver::with_environment(Arc::new(env));
        assert_eq!(resolver.resolve("accent"), "#ff0000");
    }

    #[test]
    fn second_resolution_is_served_from_cache() {
        let converter = Arc::new(CountingConverter {
            calls: AtomicUsize::new(0),
        });
        let resolver = TokenResolver::new(
            Arc::new(ThemeEnvironment::from_theme(&Theme::light())),
            converter.clone(),
        );
        let first = resolver.resolve("primary");
        let second = resolver.resolve("primary");
        assert_eq!(first, second);
        assert_eq!(converter.calls.load(Ordering::SeqCst), 1);

        resolver.clear_cache();
        resolver.resolve("primary");
        assert_eq!(converter.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn shifts_and_resolves() {
        let resolver = light();
        assert_eq!(resolver.darker("blue-500", 2), "#1d4ed8");
        assert_eq!(resolver.shifted("blue-500", 4), "#1e3a8a");
        assert_eq!(resolver.lighter("bg-blue-500", 2), "#93c5fd");
        assert_eq!(resolver.lighter("blue-900", 10), "#eff6ff");
        assert_eq!(resolver.darker("#123456", 2), "#123456");
        assert_eq!(resolver.darker("primary", 2), resolver.resolve("primary"));
    }

    #[test]
    fn theme_color_defaults_to_black() {
        let resolver = light();
        assert_eq!(resolver.theme_color("--missing"), "#000000");
        assert_eq!(resolver.theme_color("primary"), "#171717");
        assert_eq!(resolver.theme_color("--foreground"), "#0a0a0a");
    }

    #[test]
    fn chart_colors_cover_every_alias() {
        let colors = light().chart_colors();
        assert_eq!(colors.len(), 8);
        assert_eq!(colors[0].0, ThemeAlias::Primary);
        assert_eq!(colors[3], (ThemeAlias::Chart(1), light().resolve("chart-1")));
    }

    #[test]
    fn custom_fallback_is_used() {
        let fallback = ResolvedColor::from_hex("#777777").unwrap();
        let resolver = light().with_fallback(fallback);
        assert_eq!(resolver.resolve("nope"), "#777777");
    }

    #[test]
    fn theme_colors_and_tokens_cache_separately() {
        let resolver = light();
        assert_eq!(resolver.resolve("--primary"), "#3b82f6");
        assert_eq!(resolver.theme_color("primary"), "#171717");

        let resolver = light();
        assert_eq!(resolver.theme_color("primary"), "#171717");
        assert_eq!(resolver.resolve("--primary"), "#3b82f6");
        assert_eq!(resolver.theme_color("--primary"), "#171717");
    }

    #[test]
    fn clearing_drops_theme_colors_too() {
        let env = Arc::new(ThemeEnvironment::from_theme(&Theme::light()));
        let resolver = TokenResolver::with_environment(env.clone());
        assert_eq!(resolver.theme_color("background"), "#ffffff");
        env.set_theme(&Theme::dark());
        assert_eq!(resolver.theme_color("background"), "#ffffff");
        resolver.clear_cache();
        assert_eq!(resolver.theme_color("background"), "#0a0a0a");
    }
}
