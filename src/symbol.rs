use crate::icons::IconElement;
use crate::token::ResolvedColor;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

pub const SYMBOL_PREFIX: &str = "image://data:image/svg+xml;utf8,";

pub const CANVAS_SIZE: u32 = 48;
pub const BADGE_RADIUS: u32 = 22;
pub const BORDER_WIDTH: u32 = 3;
pub const ICON_INSET: u32 = 12;
pub const ICON_SIZE: u32 = 24;
pub const ICON_STROKE_WIDTH: u32 = 2;

/// Colors for one badge, already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeColors {
    pub background: ResolvedColor,
    pub border: ResolvedColor,
    pub icon: ResolvedColor,
}

/// A self-contained `image://data:` reference to a badge SVG.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolDescriptor(Arc<str>);

impl SymbolDescriptor {
    pub fn from_svg(svg: &str) -> Self {
        let encoded = urlencoding::encode(svg);
        let mut uri = String::with_capacity(SYMBOL_PREFIX.len() + encoded.len());
        uri.push_str(SYMBOL_PREFIX);
        uri.push_str(&encoded);
        Self(Arc::from(uri))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The embedded SVG markup.
    pub fn svg(&self) -> Option<String> {
        let payload = self.0.strip_prefix(SYMBOL_PREFIX)?;
        urlencoding::decode(payload).ok().map(|svg| svg.into_owned())
    }
}

impl Serialize for SymbolDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl fmt::Display for SymbolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Badge markup: a bordered circle with the icon centered on top.
///
/// Icon attribute values are XML-escaped, so a stray `"` or `<` in icon data
/// cannot break out of the attribute.
pub fn badge_svg(elements: &[IconElement], colors: &BadgeColors) -> String {
    let size = CANVAS_SIZE;
    let center = CANVAS_SIZE / 2;
    let mut svg = String::with_capacity(512);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\">"
    ));
    svg.push_str(&format!(
        "<circle cx=\"{center}\" cy=\"{center}\" r=\"{BADGE_RADIUS}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{BORDER_WIDTH}\"/>",
        colors.background, colors.border
    ));
    svg.push_str(&format!("<g transform=\"translate({ICON_INSET}, {ICON_INSET})\">"));
    svg.push_str(&format!(
        "<svg width=\"{ICON_SIZE}\" height=\"{ICON_SIZE}\" viewBox=\"0 0 {ICON_SIZE} {ICON_SIZE}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{ICON_STROKE_WIDTH}\" stroke-linecap=\"round\" stroke-linejoin=\"round\">",
        colors.icon
    ));
    for element in elements {
        svg.push_str(&element_svg(element));
    }
    svg.push_str("</svg></g></svg>");
    svg
}

fn element_svg(element: &IconElement) -> String {
    let mut tag = format!("<{}", element.tag);
    for (key, value) in &element.attributes {
        tag.push_str(&format!(" {key}=\"{}\"", escape_xml(value)));
    }
    tag.push_str("/>");
    tag
}

pub fn synthesize(elements: &[IconElement], colors: &BadgeColors) -> SymbolDescriptor {
    SymbolDescriptor::from_svg(&badge_svg(elements, colors))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> BadgeColors {
        BadgeColors {
            background: ResolvedColor::from_hex("#3b82f6").unwrap(),
            border: ResolvedColor::from_hex("#1d4ed8").unwrap(),
            icon: ResolvedColor::from_hex("#ffffff").unwrap(),
        }
    }

    fn element(tag: &str, attrs: &[(&str, &str)]) -> IconElement {
        IconElement {
            tag: tag.to_string(),
            attributes: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn lays_out_the_badge() {
        let svg = badge_svg(&[element("circle", &[("cx", "12"), ("cy", "10"), ("r", "3")])], &colors());
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"48\" height=\"48\" viewBox=\"0 0 48 48\">"));
        assert!(svg.contains(
            "<circle cx=\"24\" cy=\"24\" r=\"22\" fill=\"#3b82f6\" stroke=\"#1d4ed8\" stroke-width=\"3\"/>"
        ));
        assert!(svg.contains("<g transform=\"translate(12, 12)\">"));
        assert!(svg.contains("stroke=\"#ffffff\" stroke-width=\"2\" stroke-linecap=\"round\" stroke-linejoin=\"round\""));
        assert!(svg.contains("<circle cx=\"12\" cy=\"10\" r=\"3\"/>"));
        assert!(svg.ends_with("</svg></g></svg>"));
    }

    #[test]
    fn keeps_element_order() {
        let svg = badge_svg(
            &[element("path", &[("d", "M1 1")]), element("rect", &[("x", "2")])],
            &colors(),
        );
        let path = svg.find("<path d=\"M1 1\"/>").unwrap();
        let rect = svg.find("<rect x=\"2\"/>").unwrap();
        assert!(path < rect);
    }

    #[test]
    fn attributeless_elements_self_close() {
        assert_eq!(element_svg(&element("g", &[])), "<g/>");
    }

    #[test]
    fn encodes_as_data_uri() {
        let symbol = synthesize(&[element("path", &[("d", "M0 0h24")])], &colors());
        let uri = symbol.as_str();
        assert!(uri.starts_with(SYMBOL_PREFIX));
        let payload = &uri[SYMBOL_PREFIX.len()..];
        assert!(!payload.contains('<'));
        assert!(!payload.contains('#'));
        assert!(!payload.contains(' '));
        assert!(payload.contains("%233b82f6"));
        let svg = symbol.svg().unwrap();
        assert!(svg.contains("fill=\"#3b82f6\""));
        assert!(svg.contains("<path d=\"M0 0h24\"/>"));
    }

    #[test]
    fn escapes_attribute_values() {
        let svg = badge_svg(&[element("path", &[("d", "M0 0\"/><script/>")])], &colors());
        assert!(svg.contains("<path d=\"M0 0&quot;/&gt;&lt;script/&gt;\"/>"));
        assert!(!svg.contains("<script"));
    }
}
