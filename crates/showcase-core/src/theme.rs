use serde::{Deserialize, Serialize};

use crate::models::ThemePreference;

/// Terminal colors for one theme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pub colors: PaletteColors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteColors {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    pub error: Color,
    pub title: Color,
    pub muted: Color,
    pub selected_bg: Color,
    pub tab_active: Color,
    pub tab_inactive: Color,

    pub accent: Color,
    pub tag: Color,
    pub featured: Color,
    pub stars: Color,
}

/// RGB color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn rgb(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Parse `#rgb` or `#rrggbb`, as used by the language color table
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::rgb),
            3 => {
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16).ok().map(Self::rgb)
            }
            _ => None,
        }
    }
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: PaletteColors {
                background: Color::rgb(0x1e1e2e),
                foreground: Color::rgb(0xcdd6f4),
                border: Color::rgb(0x45475a),
                border_focused: Color::rgb(0x89b4fa),

                error: Color::rgb(0xf38ba8),
                title: Color::rgb(0xcba6f7),
                muted: Color::rgb(0x6c7086),
                selected_bg: Color::rgb(0x313244),
                tab_active: Color::rgb(0xf5c2e7),
                tab_inactive: Color::rgb(0x6c7086),

                accent: Color::rgb(0x89b4fa),
                tag: Color::rgb(0x94e2d5),
                featured: Color::rgb(0xfab387),
                stars: Color::rgb(0xf9e2af),
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: PaletteColors {
                background: Color::rgb(0xeff1f5),
                foreground: Color::rgb(0x4c4f69),
                border: Color::rgb(0xbcc0cc),
                border_focused: Color::rgb(0x1e66f5),

                error: Color::rgb(0xd20f39),
                title: Color::rgb(0x8839ef),
                muted: Color::rgb(0x9ca0b0),
                selected_bg: Color::rgb(0xdce0e8),
                tab_active: Color::rgb(0xea76cb),
                tab_inactive: Color::rgb(0x9ca0b0),

                accent: Color::rgb(0x1e66f5),
                tag: Color::rgb(0x179299),
                featured: Color::rgb(0xfe640b),
                stars: Color::rgb(0xdf8e1d),
            },
        }
    }

    pub fn for_preference(theme: ThemePreference) -> Self {
        match theme {
            ThemePreference::Light => Self::light(),
            ThemePreference::Dark => Self::dark(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}
