use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};

pub const PURPLE: Color = Color::DarkMagenta;
pub const WHITE: Color = Color::Grey;
pub const GREY: Color = Color::DarkGrey;
pub const RED: Color = Color::DarkRed;
pub const YELLOW: Color = Color::DarkYellow;
pub const GREEN: Color = Color::DarkGreen;

/// Turns color markup and labels into terminal text, or into plain text when
/// colors are off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Logo markup: `$1` purple, `$2` white, `$3` grey, `$0` reset.
    /// Other characters, including `$` before anything else, are kept as is.
    pub fn render_markup(&self, markup: &str) -> String {
        let mut result = String::with_capacity(markup.len() + 16);
        let mut chars = markup.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '$' {
                let marker = chars.peek().and_then(|d| marker_color(*d));
                if let Some(color) = marker {
                    chars.next();
                    if self.enabled {
                        match color {
                            Some(color) => result.push_str(&SetForegroundColor(color).to_string()),
                            None => result.push_str(&ResetColor.to_string()),
                        }
                    }
                    continue;
                }
            }
            result.push(c);
        }
        if self.enabled {
            result.push_str(&ResetColor.to_string());
        }
        result
    }

    pub fn paint(&self, color: Color, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        format!("{}{}{}", SetForegroundColor(color), text, ResetColor)
    }

    pub fn bold(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        format!(
            "{}{}{}",
            SetAttribute(Attribute::Bold),
            text,
            SetAttribute(Attribute::Reset)
        )
    }

    pub fn bold_purple(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        format!(
            "{}{}{}{}",
            SetAttribute(Attribute::Bold),
            SetForegroundColor(PURPLE),
            text,
            SetAttribute(Attribute::Reset)
        )
    }
}

/// `Some(None)` is the reset marker.
fn marker_color(c: char) -> Option<Option<Color>> {
    match c {
        '0' => Some(None),
        '1' => Some(Some(PURPLE)),
        '2' => Some(Some(WHITE)),
        '3' => Some(Some(GREY)),
        _ => None,
    }
}
