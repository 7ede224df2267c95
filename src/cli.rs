//! Command-line interface for font-registry.
//!
//! Each subcommand builds a registry from the loaded configuration, runs,
//! and reports an exit code.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use font_registry_config::{Config, LogLevel};
use font_registry_fonts::{FontData, load_font_file};

use crate::global::{SystemRegistry, build_registry, fallback_families};

/// font-registry - resolve logical font names to installed fonts
#[derive(Parser, Debug)]
#[command(name = "font-registry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.config/font-registry/config.yaml
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Write log output to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Do not scan the system font folders
    #[arg(long, global = true)]
    pub no_system_fonts: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve font names and print the face each one maps to
    Resolve {
        /// Font names (PostScript, family, or Family-Style)
        #[arg(required = true)]
        names: Vec<String>,

        /// Try the fallback families when a name is unavailable
        #[arg(long)]
        fallback: bool,
    },
    /// List font names
    List {
        /// List every PostScript name in the database instead of app fonts
        #[arg(long)]
        system: bool,
    },
    /// Load a font file, register it under NAME and resolve it
    Register {
        /// Name to register the font under
        name: String,

        /// Path to a TTF/OTF file
        path: PathBuf,
    },
}

/// Load the config selected by `cli`, applying command-line overrides.
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load().context("failed to load config")?,
    };
    if cli.no_system_fonts {
        config.load_system_fonts = false;
    }
    Ok(config)
}

/// Run a parsed command. Returns the process exit code.
pub fn run(cli: &Cli, config: &Config, out: &mut impl Write) -> anyhow::Result<i32> {
    let registry = build_registry(config);
    match &cli.command {
        Commands::Resolve { names, fallback } => {
            let fallbacks = if *fallback {
                fallback_families(config)
            } else {
                Vec::new()
            };
            resolve_names(&registry, names, &fallbacks, out)
        }
        Commands::List { system } => {
            let mut names: Vec<String> = if *system {
                registry
                    .loader()
                    .database()
                    .faces()
                    .map(|face| face.post_script_name.clone())
                    .filter(|name| !name.is_empty())
                    .collect()
            } else {
                registry.loader().app_font_names().to_vec()
            };
            names.sort();
            names.dedup();
            for name in names {
                writeln!(out, "{name}")?;
            }
            Ok(0)
        }
        Commands::Register { name, path } => {
            let font = load_font_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            registry.register_str(name, font)?;
            let resolved = registry.resolve(name)?;
            writeln!(out, "{}", describe(name, &resolved))?;
            Ok(0)
        }
    }
}

fn resolve_names(
    registry: &SystemRegistry,
    names: &[String],
    fallbacks: &[String],
    out: &mut impl Write,
) -> anyhow::Result<i32> {
    let mut code = 0;
    for name in names {
        match registry.resolve_or(name, fallbacks) {
            Ok(font) => writeln!(out, "{}", describe(name, &font))?,
            Err(e) => {
                writeln!(out, "{name}: error: {e}")?;
                code = 1;
            }
        }
    }
    Ok(code)
}

/// One-line summary of a resolved font.
pub fn describe(name: &str, font: &FontData) -> String {
    format!(
        "{name}: {} (family \"{}\", face {}, weight {}, {} glyphs, {} bytes)",
        font.display_name(),
        font.family,
        font.face_index,
        font.weight(),
        font.glyph_count(),
        font.data.len()
    )
}
