use crate::collectors::HostFacts;
use crate::config::ToolchainConfig;
use crate::theme::{Palette, GREEN, RED, YELLOW};
use crate::units::format_bytes;
use std::fmt::Display;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

const RULE_WIDTH: usize = 40;
const BAR_WIDTH: usize = 20;
const GUTTER: &str = "  ";

/// One output row: a logo cell and an optional fact cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLine<'a> {
    pub left: &'a str,
    pub right: Option<&'a str>,
}

impl DisplayLine<'_> {
    /// Pads the logo cell so the fact cell starts at the 1-based `column`,
    /// counting only visible characters of the logo cell.
    pub fn render(&self, column: usize) -> String {
        let Some(right) = self.right.filter(|r| !r.is_empty()) else {
            return self.left.to_string();
        };
        let pad = column
            .saturating_sub(1)
            .saturating_sub(visible_width(self.left));
        format!("{}{}{GUTTER}{}", self.left, " ".repeat(pad), right)
    }
}

/// Zips logo and fact lines to the longer of the two.
pub fn layout<'a, L: AsRef<str>>(logo: &'a [L], info: &'a [String]) -> Vec<DisplayLine<'a>> {
    let rows = logo.len().max(info.len());
    (0..rows)
        .map(|i| DisplayLine {
            left: logo.get(i).map_or("", |l| l.as_ref()),
            right: info.get(i).map(String::as_str),
        })
        .collect()
}

pub fn render_static<W: Write>(
    out: &mut W,
    logo: &[String],
    info: &[String],
    column: usize,
) -> io::Result<()> {
    writeln!(out)?;
    for line in layout(logo, info) {
        writeln!(out, "{}", line.render(column))?;
    }
    writeln!(out)?;
    out.flush()
}

pub fn info_lines(facts: &HostFacts, labels: &ToolchainConfig, palette: Palette) -> Vec<String> {
    let label = |name: &str, value: &dyn Display| format!("{}: {}", palette.bold(name), value);

    let mut lines = vec![
        format!(
            "{}@{}",
            palette.bold_purple(&facts.user_name),
            palette.bold_purple(&facts.host_name)
        ),
        "─".repeat(RULE_WIDTH),
    ];

    if let Some(toolchain) = &facts.toolchain {
        lines.push(label(labels.runtime_label.as_str(), &toolchain.runtime_version));
        lines.push(label(labels.label.as_str(), &toolchain.sdk_version));
        lines.push(label("Runtimes", &toolchain.runtime_count));
        lines.push(label("SDKs", &toolchain.sdk_count));
        lines.push(String::new());
    }

    lines.push(label("OS", &facts.os_description));
    lines.push(label("Arch", &facts.architecture));
    lines.push(label("CPU", &format!("{} cores", facts.cpu_count)));
    lines.push(label("Memory", &format_bytes(facts.total_memory_bytes)));

    if let Some(containment) = &facts.containment {
        lines.push(label("Container", &"Yes"));
        lines.push(label("Memory Limit", &format_bytes(containment.limit_bytes)));
        lines.push(label("Memory Used", &format_bytes(containment.used_bytes)));
        lines.push(label(
            "Usage",
            &usage_bar(containment.usage_percent(), palette),
        ));
    }

    lines
}

pub fn usage_bar(percent: f64, palette: Palette) -> String {
    let filled = ((percent / 100.0 * BAR_WIDTH as f64) as usize).min(BAR_WIDTH);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
    let color = if percent > 80.0 {
        RED
    } else if percent > 60.0 {
        YELLOW
    } else {
        GREEN
    };
    format!("{} {percent:.1}%", palette.paint(color, &bar))
}

/// Display width of `text` with ANSI escape sequences removed.
pub fn visible_width(text: &str) -> usize {
    strip_ansi_escapes::strip_str(text).width()
}
