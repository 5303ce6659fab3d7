//! Name-derived terminal colors and ANSI wrapping
//!
//! Every logger gets a stable color picked by hashing its name into a fixed
//! palette. The palette depends on the color tier of the target:
//!
//! ```
//! use reggol::core::color::{code, ColorSupport};
//!
//! let basic = code("app:db", ColorSupport::Basic);
//! assert_eq!(basic, code("app:db", ColorSupport::Basic));
//! assert!(code("app:db", ColorSupport::None).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const PALETTE_16: [u8; 6] = [6, 2, 3, 4, 5, 1];

pub const PALETTE_256: [u8; 75] = [
    20, 21, 26, 27, 32, 33, 38, 39, 40, 41, 42, 43, 44, 45, 56, 57, 62, 63, 68, 69, 74, 75, 76, 77,
    78, 79, 80, 81, 92, 93, 98, 99, 112, 113, 129, 134, 135, 148, 149, 160, 161, 162, 163, 164,
    165, 166, 167, 168, 169, 170, 171, 172, 173, 178, 179, 184, 185, 196, 197, 198, 199, 200, 201,
    202, 203, 204, 205, 206, 207, 208, 209, 214, 215, 220, 221,
];

pub const RESET: &str = "\x1b[0m";

/// Color capability of an output target.
///
/// Serialized as the numeric tier; `false` deserializes as [`ColorSupport::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(from = "ColorTier", into = "u8")]
pub enum ColorSupport {
    #[default]
    None = 0,
    Basic = 1,
    Ansi256 = 2,
    TrueColor = 3,
}

impl ColorSupport {
    pub fn is_enabled(self) -> bool {
        self != ColorSupport::None
    }

    /// Probe the current terminal.
    ///
    /// Honors `NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE` and whether stdout is a
    /// terminal, then reads `COLORTERM` and `TERM` for the tier.
    #[cfg(feature = "console")]
    pub fn detect() -> Self {
        if !colored::control::ShouldColorize::from_env().should_colorize() {
            return ColorSupport::None;
        }
        let colorterm = std::env::var("COLORTERM").unwrap_or_default();
        if colorterm == "truecolor" || colorterm == "24bit" {
            return ColorSupport::TrueColor;
        }
        let term = std::env::var("TERM").unwrap_or_default();
        if term.contains("256") {
            ColorSupport::Ansi256
        } else {
            ColorSupport::Basic
        }
    }
}

impl From<u8> for ColorSupport {
    fn from(tier: u8) -> Self {
        match tier {
            0 => ColorSupport::None,
            1 => ColorSupport::Basic,
            2 => ColorSupport::Ansi256,
            _ => ColorSupport::TrueColor,
        }
    }
}

impl From<ColorSupport> for u8 {
    fn from(colors: ColorSupport) -> Self {
        colors as u8
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorTier {
    Flag(bool),
    Tier(u8),
}

impl From<ColorTier> for ColorSupport {
    fn from(tier: ColorTier) -> Self {
        match tier {
            ColorTier::Flag(false) => ColorSupport::None,
            ColorTier::Flag(true) => ColorSupport::Basic,
            ColorTier::Tier(tier) => tier.into(),
        }
    }
}

/// 32-bit name hash: `hash = hash * 7 + unit` over UTF-16 code units,
/// wrapping at every step.
pub fn hash_name(name: &str) -> i32 {
    name.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(3)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

pub fn palette(colors: ColorSupport) -> &'static [u8] {
    match colors {
        ColorSupport::None => &[],
        ColorSupport::Basic => &PALETTE_16,
        ColorSupport::Ansi256 | ColorSupport::TrueColor => &PALETTE_256,
    }
}

/// Palette entry assigned to `name`, or `None` when colors are disabled
pub fn code(name: &str, colors: ColorSupport) -> Option<u8> {
    let palette = palette(colors);
    if palette.is_empty() {
        return None;
    }
    let index = hash_name(name).unsigned_abs() as usize % palette.len();
    Some(palette[index])
}

/// Wrap `value` in an SGR foreground sequence.
///
/// Codes below 8 use the three-bit form, others the 256-color form. The
/// `decoration` (e.g. `";1"` for bold) is only emitted on 256-color targets.
pub fn color(colors: ColorSupport, code: u8, value: impl Display, decoration: &str) -> String {
    if !colors.is_enabled() {
        return value.to_string();
    }
    let decoration = if colors >= ColorSupport::Ansi256 {
        decoration
    } else {
        ""
    };
    if code < 8 {
        format!("\x1b[3{}{}m{}{}", code, decoration, value, RESET)
    } else {
        format!("\x1b[38;5;{}{}m{}{}", code, decoration, value, RESET)
    }
}

/// Color `value` with the hashed color of `name`
pub fn color_named(colors: ColorSupport, name: &str, value: impl Display, decoration: &str) -> String {
    match code(name, colors) {
        Some(code) => color(colors, code, value, decoration),
        None => value.to_string(),
    }
}
