use crate::theme::Palette;

pub const DEFAULT_STYLE: &str = "dotnetbot";

const DOTNETBOT: &[&str] = &[
    "$1             dNd",
    "$1             dNd",
    "$1         .dNNNNNNd.",
    "$1       dNNNNNNNNNNNNd",
    "$1      dNNNNNNNNNNNNNNNd",
    "$1     dNNN$2.----------.$1NNNd",
    "$1     dNNN$2|   ()   ()|$1NNNd",
    "$1     dNNN$2'----------'$1NNNd",
    "$1       dNNNNd    dNNNNd",
    "$1        dNd $3|.NET|$1 dNd",
    "$1        dNd $3|    |$1 dNd",
    "$3            '----'",
];

const ASCII: &[&str] = &[
    r"$1     _    _ _____  _____ ",
    r"$1    | \ | | ____||_   _|",
    r"$1    |  \| |  _|    | |  ",
    r"$1    | |\  | |___   | |  ",
    r"$1|\| |_| \_|_____|  |_|  ",
];

const BLOCKTEXT: &[&str] = &[
    "$1     ███  ██ ██████ ████████",
    "$1     ████ ██ ██        ██   ",
    "$1     ██ ████ ██████    ██   ",
    "$1 ███ ██  ███ ██        ██   ",
    "$1 ███ ██   ██ ██████    ██   ",
];

// Shading follows the gaze: the far side of the head is drawn grey.
const EYES_LEFT: &[&str] = &[
    "$1              dNd",
    "$1              dNd",
    "$1          .dNNNNNN$3d.",
    "$1        dNNNNNNNNNN$3NNd",
    "$1       dNNNNNNNNNNNN$3NNNd",
    "$1      dNNNN$2.----------.$3NNNd",
    "$1      dNNNN$2|()   ()   |$3NNNd",
    "$1      dNNNN$2'----------'$3NNNd",
    "$1        dNNNNd   d$3NNNNd",
];

const EYES_CENTER: &[&str] = &[
    "$1              dNd",
    "$1              dNd",
    "$1          .dNNNNNNd.",
    "$1        dNNNNNNNNNNNNd",
    "$1       dNNNNNNNNNNNNNNNd",
    "$1      dNNN$2.-----------.$1NNNd",
    "$1      dNNN$2|  ()   ()  |$1NNNd",
    "$1      dNNN$2'-----------'$1NNNd",
    "$1        dNNNNd    dNNNNd",
];

const EYES_RIGHT: &[&str] = &[
    "$1              dNd",
    "$1              dNd",
    "$3          .d$1NNNNNNd.",
    "$3        dNN$1NNNNNNNNNNd",
    "$3       dNNN$1NNNNNNNNNNNNd",
    "$3      dNNN$2.----------.$1NNNNd",
    "$3      dNNN$2|   ()   ()|$1NNNNd",
    "$3      dNNN$2'----------'$1NNNNd",
    "$3        dNNNN$1d   dNNNNd",
];

const BADGE_UP: &[&str] = &[
    "$1         dNd $3|.NET|$1 dNd",
    "$1         dNd $3|    |$1 dNd",
    "$3             '----'",
];

const BADGE_DOWN: &[&str] = &[
    "$1         dNd $3|    |$1 dNd",
    "$1         dNd $3|.NET|$1 dNd",
    "$3             '----'",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyePosition {
    Left,
    Center,
    Right,
}

impl EyePosition {
    pub const ALL: [EyePosition; 3] = [Self::Left, Self::Center, Self::Right];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeState {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogoStyle {
    Static(Vec<String>),
    Animated(AnimatedLogo),
}

/// Eye line sets crossed with badge line sets; every combination has the same height.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedLogo {
    eyes_left: Vec<String>,
    eyes_center: Vec<String>,
    eyes_right: Vec<String>,
    badge_up: Vec<String>,
    badge_down: Vec<String>,
}

impl AnimatedLogo {
    pub fn eyes(&self, position: EyePosition) -> &[String] {
        match position {
            EyePosition::Left => &self.eyes_left,
            EyePosition::Center => &self.eyes_center,
            EyePosition::Right => &self.eyes_right,
        }
    }

    pub fn badge(&self, state: BadgeState) -> &[String] {
        match state {
            BadgeState::Up => &self.badge_up,
            BadgeState::Down => &self.badge_down,
        }
    }

    pub fn frame(&self, position: EyePosition, state: BadgeState) -> Vec<&str> {
        self.eyes(position)
            .iter()
            .chain(self.badge(state))
            .map(String::as_str)
            .collect()
    }

    pub fn frame_height(&self) -> usize {
        self.eyes_left.len() + self.badge_up.len()
    }
}

struct Entry {
    key: &'static str,
    description: &'static str,
    style: LogoStyle,
}

pub struct LogoRegistry {
    entries: Vec<Entry>,
}

impl LogoRegistry {
    pub fn new(palette: Palette) -> Self {
        let render = |lines: &[&str]| -> Vec<String> {
            lines.iter().map(|l| palette.render_markup(l)).collect()
        };

        let entries = vec![
            Entry {
                key: DEFAULT_STYLE,
                description: ".NET Bot mascot",
                style: LogoStyle::Static(render(DOTNETBOT)),
            },
            Entry {
                key: "animated",
                description: ".NET Bot with eye animation",
                style: LogoStyle::Animated(AnimatedLogo {
                    eyes_left: render(EYES_LEFT),
                    eyes_center: render(EYES_CENTER),
                    eyes_right: render(EYES_RIGHT),
                    badge_up: render(BADGE_UP),
                    badge_down: render(BADGE_DOWN),
                }),
            },
            Entry {
                key: "ascii",
                description: ".NET logo with ASCII art",
                style: LogoStyle::Static(render(ASCII)),
            },
            Entry {
                key: "blocktext",
                description: "Block style .NET logo",
                style: LogoStyle::Static(render(BLOCKTEXT)),
            },
        ];

        Self { entries }
    }

    /// Exact, case-sensitive lookup. Unknown keys get the default style.
    pub fn resolve(&self, key: &str) -> &LogoStyle {
        // entries[0] is the default style
        let entry = self
            .entries
            .iter()
            .find(|e| e.key == key)
            .unwrap_or(&self.entries[0]);
        &entry.style
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// `(key, description)` in registration order.
    pub fn styles(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().map(|e| (e.key, e.description))
    }
}
