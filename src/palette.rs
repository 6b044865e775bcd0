use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A rung on the palette shade ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Shade {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
    S950,
}

/// Every valid shade, lightest first.
pub const SHADE_LADDER: [Shade; 11] = [
    Shade::S50,
    Shade::S100,
    Shade::S200,
    Shade::S300,
    Shade::S400,
    Shade::S500,
    Shade::S600,
    Shade::S700,
    Shade::S800,
    Shade::S900,
    Shade::S950,
];

impl Shade {
    pub const MIN: Shade = Shade::S50;
    pub const MAX: Shade = Shade::S950;

    pub const fn value(self) -> u16 {
        match self {
            Shade::S50 => 50,
            Shade::S100 => 100,
            Shade::S200 => 200,
            Shade::S300 => 300,
            Shade::S400 => 400,
            Shade::S500 => 500,
            Shade::S600 => 600,
            Shade::S700 => 700,
            Shade::S800 => 800,
            Shade::S900 => 900,
            Shade::S950 => 950,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_value(value: u16) -> Option<Self> {
        SHADE_LADDER.iter().copied().find(|shade| shade.value() == value)
    }

    /// Clamp `value` to the ladder and snap it to the nearest rung.
    ///
    /// A value exactly between two rungs snaps to the one closer to `origin`,
    /// so a single-level shift out of 50 or 950 moves exactly one rung.
    pub fn snap(value: i64, origin: Shade) -> Shade {
        let clamped = value.clamp(Shade::MIN.value() as i64, Shade::MAX.value() as i64);
        let origin = origin.value() as i64;
        let mut best = Shade::MIN;
        let mut best_distance = i64::MAX;
        for shade in SHADE_LADDER {
            let distance = (shade.value() as i64 - clamped).abs();
            let closer_to_origin = distance == best_distance
                && (shade.value() as i64 - origin).abs() < (best.value() as i64 - origin).abs();
            if distance < best_distance || closer_to_origin {
                best = shade;
                best_distance = distance;
            }
        }
        best
    }
}

impl fmt::Display for Shade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl From<Shade> for u16 {
    fn from(shade: Shade) -> Self {
        shade.value()
    }
}

impl TryFrom<u16> for Shade {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Shade::from_value(value).ok_or_else(|| format!("{value} is not a palette shade"))
    }
}

impl FromStr for Shade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u16 = s.parse().map_err(|_| format!("{s:?} is not a palette shade"))?;
        Shade::try_from(value)
    }
}

/// One named color family: a hex value for each rung of [`SHADE_LADDER`].
#[derive(Debug)]
pub struct Family {
    pub name: &'static str,
    pub shades: [&'static str; 11],
}

impl Family {
    pub fn hex(&self, shade: Shade) -> &'static str {
        self.shades[shade.index()]
    }
}

pub static PALETTE: [Family; 22] = [
    Family {
        name: "slate",
        shades: [
            "#f8fafc", "#f1f5f9", "#e2e8f0", "#cbd5e1", "#94a3b8", "#64748b", "#475569", "#334155",
            "#1e293b", "#0f172a", "#020617",
        ],
    },
    Family {
        name: "gray",
        shades: [
            "#f9fafb", "#f3f4f6", "#e5e7eb", "#d1d5db", "#9ca3af", "#6b7280", "#4b5563", "#374151",
            "#1f2937", "#111827", "#030712",
        ],
    },
    Family {
        name: "zinc",
        shades: [
            "#fafafa", "#f4f4f5", "#e4e4e7", "#d4d4d8", "#a1a1aa", "#71717a", "#52525b", "#3f3f46",
            "#27272a", "#18181b", "#09090b",
        ],
    },
    Family {
        name: "neutral",
        shades: [
            "#fafafa", "#f5f5f5", "#e5e5e5", "#d4d4d4", "#a3a3a3", "#737373", "#525252", "#404040",
            "#262626", "#171717", "#0a0a0a",
        ],
    },
    Family {
        name: "stone",
        shades: [
            "#fafaf9", "#f5f5f4", "#e7e5e4", "#d6d3d1", "#a8a29e", "#78716c", "#57534e", "#44403c",
            "#292524", "#1c1917", "#0c0a09",
        ],
    },
    Family {
        name: "red",
        shades: [
            "#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444", "#dc2626", "#b91c1c",
            "#991b1b", "#7f1d1d", "#450a0a",
        ],
    },
    Family {
        name: "orange",
        shades: [
            "#fff7ed", "#ffedd5", "#fed7aa", "#fdba74", "#fb923c", "#f97316", "#ea580c", "#c2410c",
            "#9a3412", "#7c2d12", "#431407",
        ],
    },
    Family {
        name: "amber",
        shades: [
            "#fffbeb", "#fef3c7", "#fde68a", "#fcd34d", "#fbbf24", "#f59e0b", "#d97706", "#b45309",
            "#92400e", "#78350f", "#451a03",
        ],
    },
    Family {
        name: "yellow",
        shades: [
            "#fefce8", "#fef9c3", "#fef08a", "#fde047", "#facc15", "#eab308", "#ca8a04", "#a16207",
            "#854d0e", "#713f12", "#422006",
        ],
    },
    Family {
        name: "lime",
        shades: [
            "#f7fee7", "#ecfccb", "#d9f99d", "#bef264", "#a3e635", "#84cc16", "#65a30d", "#4d7c0f",
            "#3f6212", "#365314", "#1a2e05",
        ],
    },
    Family {
        name: "green",
        shades: [
            "#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e", "#16a34a", "#15803d",
            "#166534", "#14532d", "#052e16",
        ],
    },
    Family {
        name: "emerald",
        shades: [
            "#ecfdf5", "#d1fae5", "#a7f3d0", "#6ee7b7", "#34d399", "#10b981", "#059669", "#047857",
            "#065f46", "#064e3b", "#022c22",
        ],
    },
    Family {
        name: "teal",
        shades: [
            "#f0fdfa", "#ccfbf1", "#99f6e4", "#5eead4", "#2dd4bf", "#14b8a6", "#0d9488", "#0f766e",
            "#115e59", "#134e4a", "#042f2e",
        ],
    },
    Family {
        name: "cyan",
        shades: [
            "#ecfeff", "#cffafe", "#a5f3fc", "#67e8f9", "#22d3ee", "#06b6d4", "#0891b2", "#0e7490",
            "#155e75", "#164e63", "#083344",
        ],
    },
    Family {
        name: "sky",
        shades: [
            "#f0f9ff", "#e0f2fe", "#bae6fd", "#7dd3fc", "#38bdf8", "#0ea5e9", "#0284c7", "#0369a1",
            "#075985", "#0c4a6e", "#082f49",
        ],
    },
    Family {
        name: "blue",
        shades: [
            "#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb", "#1d4ed8",
            "#1e40af", "#1e3a8a", "#172554",
        ],
    },
    Family {
        name: "indigo",
        shades: [
            "#eef2ff", "#e0e7ff", "#c7d2fe", "#a5b4fc", "#818cf8", "#6366f1", "#4f46e5", "#4338ca",
            "#3730a3", "#312e81", "#1e1b4b",
        ],
    },
    Family {
        name: "violet",
        shades: [
            "#f5f3ff", "#ede9fe", "#ddd6fe", "#c4b5fd", "#a78bfa", "#8b5cf6", "#7c3aed", "#6d28d9",
            "#5b21b6", "#4c1d95", "#2e1065",
        ],
    },
    Family {
        name: "purple",
        shades: [
            "#faf5ff", "#f3e8ff", "#e9d5ff", "#d8b4fe", "#c084fc", "#a855f7", "#9333ea", "#7e22ce",
            "#6b21a8", "#581c87", "#3b0764",
        ],
    },
    Family {
        name: "fuchsia",
        shades: [
            "#fdf4ff", "#fae8ff", "#f5d0fe", "#f0abfc", "#e879f9", "#d946ef", "#c026d3", "#a21caf",
            "#86198f", "#701a75", "#4a044e",
        ],
    },
    Family {
        name: "pink",
        shades: [
            "#fdf2f8", "#fce7f3", "#fbcfe8", "#f9a8d4", "#f472b6", "#ec4899", "#db2777", "#be185d",
            "#9d174d", "#831843", "#500724",
        ],
    },
    Family {
        name: "rose",
        shades: [
            "#fff1f2", "#ffe4e6", "#fecdd3", "#fda4af", "#fb7185", "#f43f5e", "#e11d48", "#be123c",
            "#9f1239", "#881337", "#4c0519",
        ],
    },
];

pub fn family(name: &str) -> Option<&'static Family> {
    PALETTE.iter().find(|family| family.name == name)
}

pub fn lookup(family_name: &str, shade: Shade) -> Option<&'static str> {
    family(family_name).map(|family| family.hex(shade))
}

pub fn family_names() -> impl Iterator<Item = &'static str> {
    PALETTE.iter().map(|family| family.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_complete_lowercase_hex() {
        assert_eq!(PALETTE.len(), 22);
        for family in &PALETTE {
            for hex in family.shades {
                assert_eq!(hex.len(), 7, "{}: {hex}", family.name);
                assert!(hex.starts_with('#'));
                assert!(
                    hex[1..]
                        .chars()
                        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
                    "{}: {hex}",
                    family.name
                );
            }
        }
    }

    #[test]
    fn looks_up_known_shades() {
        assert_eq!(lookup("blue", Shade::S500), Some("#3b82f6"));
        assert_eq!(lookup("blue", Shade::S700), Some("#1d4ed8"));
        assert_eq!(lookup("red", Shade::S950), Some("#450a0a"));
        assert_eq!(lookup("magenta", Shade::S500), None);
    }

    #[test]
    fn parses_only_ladder_values() {
        assert_eq!("500".parse::<Shade>(), Ok(Shade::S500));
        assert_eq!("50".parse::<Shade>(), Ok(Shade::S50));
        assert!("550".parse::<Shade>().is_err());
        assert!("abc".parse::<Shade>().is_err());
        assert!("-100".parse::<Shade>().is_err());
    }

    #[test]
    fn snaps_to_ladder() {
        assert_eq!(Shade::snap(700, Shade::S500), Shade::S700);
        assert_eq!(Shade::snap(-500, Shade::S900), Shade::S50);
        assert_eq!(Shade::snap(5000, Shade::S100), Shade::S950);
        assert_eq!(Shade::snap(150, Shade::S50), Shade::S100);
        assert_eq!(Shade::snap(850, Shade::S950), Shade::S900);
        assert_eq!(Shade::snap(1050, Shade::S950), Shade::S950);
    }

    #[test]
    fn ladder_is_ordered() {
        for pair in SHADE_LADDER.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].value() < pair[1].value());
        }
        for (idx, shade) in SHADE_LADDER.iter().enumerate() {
            assert_eq!(shade.index(), idx);
        }
    }
}
