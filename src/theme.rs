use serde::{Deserialize, Serialize};

/// Design-system custom properties for one presentation theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub background: String,
    pub foreground: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub chart: [String; 5],
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: "oklch(1 0 0)".to_string(),
            foreground: "oklch(0.145 0 0)".to_string(),
            primary: "oklch(0.205 0 0)".to_string(),
            secondary: "oklch(0.97 0 0)".to_string(),
            accent: "oklch(0.97 0 0)".to_string(),
            chart: [
                "oklch(0.646 0.222 41.116)".to_string(),
                "oklch(0.6 0.118 184.704)".to_string(),
                "oklch(0.398 0.07 227.392)".to_string(),
                "oklch(0.828 0.189 84.429)".to_string(),
                "oklch(0.769 0.188 70.08)".to_string(),
            ],
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: "oklch(0.145 0 0)".to_string(),
            foreground: "oklch(0.985 0 0)".to_string(),
            primary: "oklch(0.922 0 0)".to_string(),
            secondary: "oklch(0.269 0 0)".to_string(),
            accent: "oklch(0.269 0 0)".to_string(),
            chart: [
                "oklch(0.488 0.243 264.376)".to_string(),
                "oklch(0.696 0.17 162.48)".to_string(),
                "oklch(0.769 0.188 70.08)".to_string(),
                "oklch(0.627 0.265 303.9)".to_string(),
                "oklch(0.645 0.246 16.439)".to_string(),
            ],
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light" | "default" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }

    /// `(name, value)` pairs, names including the leading `--`.
    pub fn custom_properties(&self) -> Vec<(String, String)> {
        let mut props = vec![
            ("--background".to_string(), self.background.clone()),
            ("--foreground".to_string(), self.foreground.clone()),
            ("--primary".to_string(), self.primary.clone()),
            ("--secondary".to_string(), self.secondary.clone()),
            ("--accent".to_string(), self.accent.clone()),
        ];
        for (idx, value) in self.chart.iter().enumerate() {
            props.push((format!("--chart-{}", idx + 1), value.clone()));
        }
        props
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
