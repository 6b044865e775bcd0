use crate::badge::BadgeRenderer;
use crate::config::load_config;
use crate::dataset::{self, NodeKind};
use crate::render::{write_output_png, write_output_text};
use crate::symbol::SymbolDescriptor;
use crate::token::ResolvedColor;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "svbadge", version, about = "Render colored icon badges for relationship diagrams")]
pub struct Args {
    /// Config file (JSON/JSON5: theme, themeVariables, fallbacks)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Icon table (icon-nodes.json), overriding the bundled set
    #[arg(long = "icons", global = true)]
    pub icons: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a color token (hex, palette shade, or theme alias) to hex
    Color {
        token: String,
        /// Shift by this many shade levels (positive is darker)
        #[arg(short = 's', long = "shift", default_value_t = 0, allow_negative_numbers = true)]
        shift: i32,
    },
    /// Render one badge symbol
    Symbol {
        icon: String,
        /// Background color token
        #[arg(short = 'b', long = "color", default_value = "blue-500")]
        color: String,
        /// Icon stroke color
        #[arg(long = "icon-color")]
        icon_color: Option<String>,
        /// Output file. Defaults to stdout for uri/svg.
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
        #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "uri")]
        output_format: OutputFormat,
        /// Pixel size for PNG output
        #[arg(long = "size", default_value_t = 96)]
        size: u32,
    },
    /// Render badges for every node of a dataset as JSON
    Dataset {
        /// Dataset YAML file or '-' for stdin
        #[arg(short = 'i', long = "input")]
        input: Option<PathBuf>,
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Uri,
    Svg,
    Png,
}

#[derive(Debug, Serialize)]
struct NodeBadge<'a> {
    kind: NodeKind,
    id: &'a str,
    name: &'a str,
    color: ResolvedColor,
    border: ResolvedColor,
    symbol: SymbolDescriptor,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(icons) = args.icons {
        config.icons = Some(icons);
    }
    let renderer = BadgeRenderer::from_config(&config)?;

    match args.command {
        Command::Color { token, shift } => {
            let color = renderer.resolver().shifted(&token, shift);
            println!("{color}");
        }
        Command::Symbol {
            icon,
            color,
            icon_color,
            output,
            output_format,
            size,
        } => {
            let symbol = renderer.symbol(&icon, &color, icon_color.as_deref())?;
            write_symbol(&symbol, output_format, output.as_deref(), size)?;
        }
        Command::Dataset { input, output } => {
            let yaml = read_input(input.as_deref())?;
            let json = render_dataset(&renderer, &yaml)?;
            write_output_text(&json, output.as_deref())?;
        }
    }
    Ok(())
}

fn write_symbol(
    symbol: &SymbolDescriptor,
    format: OutputFormat,
    output: Option<&Path>,
    size: u32,
) -> Result<()> {
    match format {
        OutputFormat::Uri => write_output_text(symbol.as_str(), output),
        OutputFormat::Svg => write_output_text(&decoded_svg(symbol)?, output),
        OutputFormat::Png => {
            let output = output.ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
            write_output_png(&decoded_svg(symbol)?, output, size)
        }
    }
}

fn decoded_svg(symbol: &SymbolDescriptor) -> Result<String> {
    symbol
        .svg()
        .ok_or_else(|| anyhow::anyhow!("symbol does not embed SVG markup"))
}

fn render_dataset(renderer: &BadgeRenderer, yaml: &str) -> Result<String> {
    let data = dataset::read(yaml)?;
    renderer.preload_icons(data.icon_names());
    let badges = data
        .nodes()
        .into_iter()
        .map(|node| {
            Ok(NodeBadge {
                kind: node.kind,
                id: node.id,
                name: node.name,
                color: renderer.resolve_color(node.color),
                border: renderer.border_color(node.color),
                symbol: renderer.symbol(node.icon, node.color, None)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(serde_json::to_string_pretty(&badges)?)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn parses_subcommands() {
        let args = Args::parse_from(["svbadge", "-c", "cfg.json", "color", "blue-500", "-s", "-2"]);
        assert_eq!(args.config.as_deref(), Some(Path::new("cfg.json")));
        assert_eq!(args.icons, None);
        assert!(matches!(args.command, Command::Color { ref token, shift: -2 } if token == "blue-500"));

        let args = Args::parse_from(["svbadge", "symbol", "CircleUser", "-b", "red-500", "-e", "svg"]);
        match args.command {
            Command::Symbol {
                icon,
                color,
                output_format,
                ..
            } => {
                assert_eq!(icon, "CircleUser");
                assert_eq!(color, "red-500");
                assert_eq!(output_format, OutputFormat::Svg);
            }
            other => panic!("unexpected {other:?}"),
        }

        let args = Args::parse_from(["svbadge", "dataset", "-i", "d.yaml", "--icons", "lucide.json"]);
        assert_eq!(args.icons.as_deref(), Some(Path::new("lucide.json")));
    }

    #[test]
    fn renders_dataset_json() {
        let renderer = BadgeRenderer::from_config(&Config::default()).unwrap();
        let yaml = r#"
locations:
  - { id: hq, name: HQ, color: blue-500, icon: Building }
people:
  - { id: ada, name: Ada, location: hq, color: bg-red-500, icon: Unknown }
swarms: []
"#;
        let json = render_dataset(&renderer, yaml).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let nodes = value.as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0]["kind"], "location");
        assert_eq!(nodes[0]["color"], "#3b82f6");
        assert_eq!(nodes[0]["border"], "#1d4ed8");
        assert_eq!(nodes[1]["color"], "#ef4444");
        assert_eq!(nodes[1]["border"], "#b91c1c");
        let fallback = renderer.symbol("circle-user", "bg-red-500", None).unwrap();
        assert_eq!(nodes[1]["symbol"], fallback.as_str());
    }
}
