use crate::animation;
use crate::collectors::FactCollector;
use crate::config::Config;
use crate::logos::{LogoRegistry, LogoStyle, DEFAULT_STYLE};
use crate::render::{info_lines, render_static};
use crate::theme::Palette;
use std::io::{self, Write};
use tracing::debug;

const HELP_TOKENS: [&str; 3] = ["help", "--help", "-h"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Show { style: String },
}

impl Invocation {
    pub fn from_args(style: Option<String>, help_flag: bool, default_style: &str) -> Self {
        match style {
            _ if help_flag => Self::Help,
            Some(s) if HELP_TOKENS.contains(&s.as_str()) => Self::Help,
            Some(style) => Self::Show { style },
            None => Self::Show {
                style: default_style.to_string(),
            },
        }
    }
}

/// Prints usage, or collects facts and draws the selected logo next to them.
pub fn run<W: Write>(
    invocation: &Invocation,
    config: &Config,
    collector: &dyn FactCollector,
    out: &mut W,
) -> io::Result<()> {
    let palette = Palette::new(config.color);
    let registry = LogoRegistry::new(palette);

    let style = match invocation {
        Invocation::Help => return write_usage(out, &registry, palette),
        Invocation::Show { style } => style,
    };
    if !registry.contains(style) {
        debug!(style = %style, fallback = DEFAULT_STYLE, "unknown logo style");
    }

    let facts = collector.collect();
    let info = info_lines(&facts, &config.facts.toolchain, palette);

    match registry.resolve(style) {
        LogoStyle::Static(lines) => render_static(out, lines, &info, config.info_column),
        LogoStyle::Animated(logo) => {
            animation::play(out, logo, &info, config.info_column, &config.animation).map(|_| ())
        }
    }
}

fn write_usage<W: Write>(out: &mut W, registry: &LogoRegistry, palette: Palette) -> io::Result<()> {
    writeln!(
        out,
        "{} {} [logo-style] [--config <path>] [--print-default-config]",
        palette.bold("Usage:"),
        env!("CARGO_PKG_NAME")
    )?;
    writeln!(out)?;
    writeln!(out, "{}", palette.bold("Logo styles:"))?;

    let width = registry.styles().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, description) in registry.styles() {
        let marker = if key == DEFAULT_STYLE { " (default)" } else { "" };
        writeln!(out, "  {key:<width$} - {description}{marker}")?;
    }
    out.flush()
}
