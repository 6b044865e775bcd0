use crate::palette::{self, Shade};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A concrete `#rrggbb` color, always lowercase and seven characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResolvedColor(String);

impl ResolvedColor {
    pub(crate) fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{r:02x}{g:02x}{b:02x}"))
    }

    /// Accepts `#rgb` and `#rrggbb` in any case.
    pub(crate) fn from_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => Some(Self(format!("#{}", digits.to_ascii_lowercase()))),
            3 => {
                let expanded: String = digits
                    .chars()
                    .flat_map(|c| [c, c])
                    .map(|c| c.to_ascii_lowercase())
                    .collect();
                Some(Self(format!("#{expanded}")))
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&self.0[range], 16).unwrap_or(0);
        (channel(1..3), channel(3..5), channel(5..7))
    }
}

impl fmt::Display for ResolvedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResolvedColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for ResolvedColor {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Design-system colors exposed by the active theme as custom properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeAlias {
    Primary,
    Secondary,
    Accent,
    Chart(u8),
}

impl ThemeAlias {
    pub const ALL: [ThemeAlias; 8] = [
        ThemeAlias::Primary,
        ThemeAlias::Secondary,
        ThemeAlias::Accent,
        ThemeAlias::Chart(1),
        ThemeAlias::Chart(2),
        ThemeAlias::Chart(3),
        ThemeAlias::Chart(4),
        ThemeAlias::Chart(5),
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "primary" => Some(Self::Primary),
            "secondary" => Some(Self::Secondary),
            "accent" => Some(Self::Accent),
            "chart-1" => Some(Self::Chart(1)),
            "chart-2" => Some(Self::Chart(2)),
            "chart-3" => Some(Self::Chart(3)),
            "chart-4" => Some(Self::Chart(4)),
            "chart-5" => Some(Self::Chart(5)),
            _ => None,
        }
    }

    pub fn name(self) -> String {
        match self {
            Self::Primary => "primary".to_string(),
            Self::Secondary => "secondary".to_string(),
            Self::Accent => "accent".to_string(),
            Self::Chart(n) => format!("chart-{n}"),
        }
    }

    pub fn custom_property(self) -> String {
        format!("--{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("empty color token")]
    Empty,
    #[error("malformed hex color {0:?}")]
    MalformedHex(String),
    #[error("expected <family>-<shade>, got {0:?}")]
    Arity(String),
    #[error("unknown palette family {0:?}")]
    UnknownFamily(String),
    #[error("unknown palette shade {0:?}")]
    UnknownShade(String),
}

/// A semantic color reference, parsed once at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorToken {
    Literal(ResolvedColor),
    Alias(ThemeAlias),
    Palette { family: &'static str, shade: Shade },
}

impl ColorToken {
    pub fn parse(text: &str) -> Result<Self, TokenError> {
        let text = text.trim();
        let text = text.strip_prefix("bg-").unwrap_or(text);
        if text.is_empty() {
            return Err(TokenError::Empty);
        }
        if text.starts_with('#') {
            return ResolvedColor::from_hex(text)
                .map(Self::Literal)
                .ok_or_else(|| TokenError::MalformedHex(text.to_string()));
        }
        if let Some(alias) = ThemeAlias::from_name(text) {
            return Ok(Self::Alias(alias));
        }

        let parts: Vec<&str> = text.split('-').collect();
        let [family_name, shade] = parts.as_slice() else {
            return Err(TokenError::Arity(text.to_string()));
        };
        let family = palette::family(family_name)
            .ok_or_else(|| TokenError::UnknownFamily(family_name.to_string()))?;
        let shade: Shade = shade
            .parse()
            .map_err(|_| TokenError::UnknownShade(shade.to_string()))?;
        Ok(Self::Palette {
            family: family.name,
            shade,
        })
    }

    pub fn palette(family: &'static str, shade: Shade) -> Self {
        Self::Palette { family, shade }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(color) => write!(f, "{color}"),
            Self::Alias(alias) => write!(f, "{}", alias.name()),
            Self::Palette { family, shade } => write!(f, "{family}-{shade}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_shape() {
        assert_eq!(
            ColorToken::parse("blue-500"),
            Ok(ColorToken::palette("blue", Shade::S500))
        );
        assert_eq!(
            ColorToken::parse("bg-red-700"),
            Ok(ColorToken::palette("red", Shade::S700))
        );
        assert_eq!(
            ColorToken::parse("chart-3"),
            Ok(ColorToken::Alias(ThemeAlias::Chart(3)))
        );
        assert_eq!(
            ColorToken::parse("bg-primary"),
            Ok(ColorToken::Alias(ThemeAlias::Primary))
        );
        match ColorToken::parse("#3B82F6") {
            Ok(ColorToken::Literal(color)) => assert_eq!(color, "#3b82f6"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!(ColorToken::parse(""), Err(TokenError::Empty));
        assert_eq!(ColorToken::parse("bg-"), Err(TokenError::Empty));
        assert!(matches!(ColorToken::parse("blue"), Err(TokenError::Arity(_))));
        assert!(matches!(
            ColorToken::parse("light-blue-500"),
            Err(TokenError::Arity(_))
        ));
        assert!(matches!(
            ColorToken::parse("chart-9"),
            Err(TokenError::UnknownFamily(_))
        ));
        assert!(matches!(
            ColorToken::parse("blue-550"),
            Err(TokenError::UnknownShade(_))
        ));
        assert!(matches!(
            ColorToken::parse("#12345"),
            Err(TokenError::MalformedHex(_))
        ));
        assert!(matches!(
            ColorToken::parse("#gggggg"),
            Err(TokenError::MalformedHex(_))
        ));
    }

    #[test]
    fn expands_short_hex() {
        let color = ResolvedColor::from_hex("#FfF").unwrap();
        assert_eq!(color, "#ffffff");
        assert_eq!(color.rgb(), (255, 255, 255));
    }

    #[test]
    fn formats_rgb_with_padding() {
        assert_eq!(ResolvedColor::from_rgb(1, 2, 255).as_str(), "#0102ff");
    }

    #[test]
    fn display_round_trips_through_parse() {
        for text in ["blue-500", "chart-2", "accent", "#0a0b0c"] {
            let token = ColorToken::parse(text).unwrap();
            assert_eq!(token.to_string(), text);
        }
    }
}
