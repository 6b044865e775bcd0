pub mod badge;
pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dataset;
pub mod environment;
pub mod error;
pub mod icons;
pub mod oklch;
pub mod palette;
pub mod render;
pub mod resolver;
pub mod shade;
pub mod symbol;
pub mod theme;
pub mod token;

pub use badge::{BadgeOptions, BadgeRenderer};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, load_config};
pub use environment::{Headless, PresentationEnvironment, ThemeEnvironment};
pub use error::{Error, Result};
pub use icons::{IconDefinition, IconElement, IconLookup, IconTable, normalize_icon_name};
pub use oklch::{ColorConverter, ConverterStrategy, convert_to_hex};
pub use palette::{SHADE_LADDER, Shade};
pub use resolver::TokenResolver;
pub use symbol::SymbolDescriptor;
pub use theme::Theme;
pub use token::{ColorToken, ResolvedColor, ThemeAlias};
