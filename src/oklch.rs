//! OKLCH notation parsing and conversion to sRGB hex.
//!
//! Two strategies sit behind [`ColorConverter`]: a deterministic numeric
//! transform (Oklab → LMS → linear sRGB → gamma-encoded sRGB) and a
//! converter that asks the presentation environment for the computed color.
//! Channels are clamped to the sRGB cube; there is no gamut mapping.

use crate::environment::PresentationEnvironment;
use crate::token::ResolvedColor;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Rendered whenever a color cannot be resolved (blue-500).
pub const FALLBACK_HEX: &str = "#3b82f6";

static OKLCH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^oklch\(\s*([+-]?(?:\d+\.?\d*|\.\d+))(%?)\s+([+-]?(?:\d+\.?\d*|\.\d+))(%?)\s+([+-]?(?:\d+\.?\d*|\.\d+))(?:deg)?\s*(?:/\s*(?:\d+\.?\d*|\.\d+)%?\s*)?\)$",
    )
    .unwrap()
});

static RGB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^rgba?\(\s*(\d{1,3})\s*[,\s]\s*(\d{1,3})\s*[,\s]\s*(\d{1,3})").unwrap()
});

/// Lightness in `0..=1`, non-negative chroma, hue in `0..360`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Oklch {
    pub fn parse(notation: &str) -> Option<Self> {
        let caps = OKLCH_RE.captures(notation.trim())?;
        let number = |idx: usize| caps.get(idx)?.as_str().parse::<f64>().ok();
        let percent = |idx: usize| caps.get(idx).is_some_and(|m| !m.as_str().is_empty());

        let mut l = number(1)?;
        if percent(2) {
            l /= 100.0;
        }
        let mut c = number(3)?;
        if percent(4) {
            // 100% chroma is 0.4 in CSS Color 4.
            c = c / 100.0 * 0.4;
        }
        let h = number(5)?;
        if !(l.is_finite() && c.is_finite() && h.is_finite()) {
            return None;
        }
        Some(Self {
            l: l.clamp(0.0, 1.0),
            c: c.max(0.0),
            h: h.rem_euclid(360.0),
        })
    }

    pub fn to_linear_srgb(self) -> (f64, f64, f64) {
        let h = self.h.to_radians();
        let a = self.c * h.cos();
        let b = self.c * h.sin();

        let l_ = self.l + 0.396_337_777_4 * a + 0.215_803_757_3 * b;
        let m_ = self.l - 0.105_561_345_8 * a - 0.063_854_172_8 * b;
        let s_ = self.l - 0.089_484_177_5 * a - 1.291_485_548_0 * b;

        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s = s_ * s_ * s_;

        (
            4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s,
            -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s,
            -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701_0 * s,
        )
    }

    pub fn to_hex(self) -> ResolvedColor {
        let (r, g, b) = self.to_linear_srgb();
        ResolvedColor::from_rgb(encode_channel(r), encode_channel(g), encode_channel(b))
    }
}

fn encode_channel(linear: f64) -> u8 {
    let encoded = if linear <= 0.003_130_8 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    };
    let scaled = (encoded.clamp(0.0, 1.0) * 255.0).round();
    if scaled.is_nan() { 0 } else { scaled as u8 }
}

/// Parse an `rgb(r, g, b)` / `rgba(...)` string as reported by a rendering host.
pub fn parse_rgb_function(text: &str) -> Option<ResolvedColor> {
    let caps = RGB_RE.captures(text.trim())?;
    let channel = |idx: usize| -> Option<u8> {
        let value: u16 = caps.get(idx)?.as_str().parse().ok()?;
        Some(value.min(255) as u8)
    };
    Some(ResolvedColor::from_rgb(channel(1)?, channel(2)?, channel(3)?))
}

/// Converts a color notation string into a hex color, or `None` when it can't.
pub trait ColorConverter: Send + Sync {
    fn to_hex(&self, notation: &str) -> Option<ResolvedColor>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NumericConverter;

impl ColorConverter for NumericConverter {
    fn to_hex(&self, notation: &str) -> Option<ResolvedColor> {
        let notation = notation.trim();
        if notation.starts_with('#') {
            return ResolvedColor::from_hex(notation);
        }
        Oklch::parse(notation).map(Oklch::to_hex)
    }

    fn name(&self) -> &'static str {
        "numeric"
    }
}

/// Delegates to the host: the notation is handed over and the computed
/// `rgb()` value read back.
pub struct EnvironmentConverter {
    environment: Arc<dyn PresentationEnvironment>,
}

impl EnvironmentConverter {
    pub fn new(environment: Arc<dyn PresentationEnvironment>) -> Self {
        Self { environment }
    }
}

impl ColorConverter for EnvironmentConverter {
    fn to_hex(&self, notation: &str) -> Option<ResolvedColor> {
        let computed = self.environment.computed_color(notation.trim())?;
        parse_rgb_function(&computed).or_else(|| ResolvedColor::from_hex(computed.trim()))
    }

    fn name(&self) -> &'static str {
        "environment"
    }
}

/// Tries each converter in order.
pub struct ConverterChain {
    converters: Vec<Arc<dyn ColorConverter>>,
}

impl ConverterChain {
    pub fn new(converters: Vec<Arc<dyn ColorConverter>>) -> Self {
        Self { converters }
    }
}

impl ColorConverter for ConverterChain {
    fn to_hex(&self, notation: &str) -> Option<ResolvedColor> {
        self.converters
            .iter()
            .find_map(|converter| converter.to_hex(notation))
    }

    fn name(&self) -> &'static str {
        "chain"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterStrategy {
    Numeric,
    Environment,
    #[default]
    Auto,
}

/// Pick a converter for `strategy` based on what the environment can do.
///
/// `Auto` prefers the numeric transform and falls back to the environment for
/// notations it does not understand, when the environment can compute colors.
pub fn select_converter(
    strategy: ConverterStrategy,
    environment: Arc<dyn PresentationEnvironment>,
) -> Arc<dyn ColorConverter> {
    let capable = environment.can_compute_colors();
    let converter: Arc<dyn ColorConverter> = match strategy {
        ConverterStrategy::Numeric => Arc::new(NumericConverter),
        ConverterStrategy::Environment if capable => Arc::new(EnvironmentConverter::new(environment)),
        ConverterStrategy::Environment => {
            warn!("presentation environment cannot compute colors, using numeric conversion");
            Arc::new(NumericConverter)
        }
        ConverterStrategy::Auto if capable => Arc::new(ConverterChain::new(vec![
            Arc::new(NumericConverter),
            Arc::new(EnvironmentConverter::new(environment)),
        ])),
        ConverterStrategy::Auto => Arc::new(NumericConverter),
    };
    debug!(converter = converter.name(), "selected color converter");
    converter
}

/// Convert with `converter`, degrading to `fallback` on failure.
pub fn convert_with(
    converter: &dyn ColorConverter,
    notation: &str,
    fallback: &ResolvedColor,
) -> ResolvedColor {
    match converter.to_hex(notation) {
        Some(color) => color,
        None => {
            warn!(notation, fallback = %fallback, "could not convert color notation");
            fallback.clone()
        }
    }
}

/// Numeric conversion with the default fallback color.
pub fn convert_to_hex(notation: &str) -> ResolvedColor {
    convert_with(&NumericConverter, notation, &fallback_color())
}

pub fn fallback_color() -> ResolvedColor {
    ResolvedColor::from_rgb(0x3b, 0x82, 0xf6)
}
