//! Color values and color-name resolution.

use serde::{Deserialize, Serialize};

/// An opaque RGBA8 color as stored on shapes and passed to surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Drop the alpha channel.
    pub fn to_rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A color as supplied by the caller, before resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    /// Explicit channels.
    Rgb(u8, u8, u8),
    /// A symbolic name ("red", "light blue") or `#rrggbb`.
    Named(String),
}

impl From<(u8, u8, u8)> for ColorSpec {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        ColorSpec::Rgb(r, g, b)
    }
}

impl From<&str> for ColorSpec {
    fn from(name: &str) -> Self {
        ColorSpec::Named(name.to_string())
    }
}

impl From<String> for ColorSpec {
    fn from(name: String) -> Self {
        ColorSpec::Named(name)
    }
}

impl From<Rgba> for ColorSpec {
    fn from(color: Rgba) -> Self {
        ColorSpec::Rgb(color.r, color.g, color.b)
    }
}

impl std::fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorSpec::Rgb(r, g, b) => write!(f, "({r}, {g}, {b})"),
            ColorSpec::Named(name) => write!(f, "{name:?}"),
        }
    }
}

/// Parse a `#rrggbb` or `#rgb` string.
pub fn parse_hex(s: &str) -> Option<Rgba> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgba::rgb(r, g, b))
        }
        3 => {
            let mut channels = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                channels[i] = v * 17;
            }
            Some(Rgba::rgb(channels[0], channels[1], channels[2]))
        }
        _ => None,
    }
}

/// Common X11/CSS color names. Lookup ignores case and spaces.
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("lime", (0, 255, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("cyan", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("pink", (255, 192, 203)),
    ("brown", (165, 42, 42)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("lightgray", (211, 211, 211)),
    ("lightgrey", (211, 211, 211)),
    ("darkgray", (169, 169, 169)),
    ("darkgrey", (169, 169, 169)),
    ("navy", (0, 0, 128)),
    ("teal", (0, 128, 128)),
    ("olive", (128, 128, 0)),
    ("maroon", (128, 0, 0)),
    ("silver", (192, 192, 192)),
    ("gold", (255, 215, 0)),
    ("lightblue", (173, 216, 230)),
    ("skyblue", (135, 206, 235)),
    ("darkblue", (0, 0, 139)),
    ("darkgreen", (0, 100, 0)),
    ("lightgreen", (144, 238, 144)),
    ("darkred", (139, 0, 0)),
    ("violet", (238, 130, 238)),
    ("indigo", (75, 0, 130)),
    ("beige", (245, 245, 220)),
    ("tan", (210, 180, 140)),
    ("salmon", (250, 128, 114)),
    ("coral", (255, 127, 80)),
    ("khaki", (240, 230, 140)),
];

/// Resolve a color name or hex string with the built-in table.
pub fn resolve_named(name: &str) -> Option<Rgba> {
    if let Some(color) = parse_hex(name) {
        return Some(color);
    }
    let key: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == key)
        .map(|(_, (r, g, b))| Rgba::rgb(*r, *g, *b))
}
