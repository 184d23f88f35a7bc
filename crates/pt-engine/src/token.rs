//! The system color catalog.
//!
//! A closed set of named colors, each carrying a fixed sRGB approximation
//! used for ΔE and contrast math. The values are design constants matched
//! to the platform's standard light-appearance palette; they are not
//! computed.

use std::fmt;
use std::str::FromStr;

use pt_color::{Lab, Rgba};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named entry in the system palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemColorToken {
    Red,
    Orange,
    Yellow,
    Green,
    Mint,
    Teal,
    Cyan,
    Blue,
    Indigo,
    Purple,
    Pink,
    Brown,
    Gray,
    Primary,
    Secondary,
    Black,
    White,
    Clear,
}

/// Prefix of the canonical expression form, `Color.<name>`.
const EXPR_PREFIX: &str = "Color.";

impl SystemColorToken {
    /// Every token, in declaration order.
    pub const ALL: [Self; 18] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Mint,
        Self::Teal,
        Self::Cyan,
        Self::Blue,
        Self::Indigo,
        Self::Purple,
        Self::Pink,
        Self::Brown,
        Self::Gray,
        Self::Primary,
        Self::Secondary,
        Self::Black,
        Self::White,
        Self::Clear,
    ];

    /// The raw lowercase name, e.g. `"indigo"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Mint => "mint",
            Self::Teal => "teal",
            Self::Cyan => "cyan",
            Self::Blue => "blue",
            Self::Indigo => "indigo",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Brown => "brown",
            Self::Gray => "gray",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Black => "black",
            Self::White => "white",
            Self::Clear => "clear",
        }
    }

    /// Human-facing label, e.g. `"Indigo"`.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Orange => "Orange",
            Self::Yellow => "Yellow",
            Self::Green => "Green",
            Self::Mint => "Mint",
            Self::Teal => "Teal",
            Self::Cyan => "Cyan",
            Self::Blue => "Blue",
            Self::Indigo => "Indigo",
            Self::Purple => "Purple",
            Self::Pink => "Pink",
            Self::Brown => "Brown",
            Self::Gray => "Gray",
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::Black => "Black",
            Self::White => "White",
            Self::Clear => "Clear",
        }
    }

    /// Canonical expression string, e.g. `"Color.indigo"`.
    #[must_use]
    pub fn expression(self) -> String {
        format!("{EXPR_PREFIX}{}", self.name())
    }

    /// The sRGB approximation used for distance and contrast math.
    ///
    /// `primary` and `secondary` are semantic colors with no fixed value;
    /// they stand in as black and the gray approximation respectively.
    #[must_use]
    pub const fn rgba(self) -> Rgba {
        match self {
            Self::Red => Rgba::rgb(1.00, 0.23, 0.19),    // 255,59,48
            Self::Orange => Rgba::rgb(1.00, 0.59, 0.00), // 255,149,0
            Self::Yellow => Rgba::rgb(1.00, 0.84, 0.04), // 255,214,10
            Self::Green => Rgba::rgb(0.20, 0.78, 0.35),  // 52,199,89
            Self::Mint => Rgba::rgb(0.00, 0.78, 0.75),   // 0,199,190
            Self::Teal => Rgba::rgb(0.19, 0.69, 0.78),   // 48,176,199
            Self::Cyan => Rgba::rgb(0.20, 0.68, 0.90),   // 50,173,230
            Self::Blue => Rgba::rgb(0.00, 0.48, 1.00),   // 0,122,255
            Self::Indigo => Rgba::rgb(0.35, 0.34, 0.84), // 88,86,214
            Self::Purple => Rgba::rgb(0.69, 0.32, 0.87), // 175,82,222
            Self::Pink => Rgba::rgb(1.00, 0.18, 0.33),   // 255,45,85
            Self::Brown => Rgba::rgb(0.64, 0.52, 0.37),  // 162,132,94
            Self::Gray | Self::Secondary => Rgba::rgb(0.56, 0.56, 0.58), // 142,142,147
            Self::Black | Self::Primary => Rgba::BLACK,
            Self::White => Rgba::WHITE,
            Self::Clear => Rgba::CLEAR,
        }
    }

    /// Lab coordinates of [`rgba`](Self::rgba).
    #[must_use]
    pub fn lab(self) -> Lab {
        self.rgba().to_lab()
    }

    /// Look up a token by its exact raw name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Normalize any accepted spelling to a token.
    ///
    /// Accepts the bare name (`"red"`), the dot-prefixed shorthand
    /// (`".red"`) and the namespaced expression (`"Color.red"`), with
    /// surrounding whitespace ignored. Returns `None` for anything else.
    #[must_use]
    pub fn normalizing(s: &str) -> Option<Self> {
        let t = s.trim();
        let name = t
            .strip_prefix(EXPR_PREFIX)
            .or_else(|| t.strip_prefix('.'))
            .unwrap_or(t);
        Self::from_name(name)
    }
}

impl fmt::Display for SystemColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no system color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown system color `{0}`")]
pub struct UnknownTokenError(pub String);

impl FromStr for SystemColorToken {
    type Err = UnknownTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalizing(s).ok_or_else(|| UnknownTokenError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Normalization ───────────────────────────────────────────────

    #[test]
    fn normalizes_all_spellings() {
        assert_eq!(SystemColorToken::normalizing(".red"), Some(SystemColorToken::Red));
        assert_eq!(SystemColorToken::normalizing("red"), Some(SystemColorToken::Red));
        assert_eq!(SystemColorToken::normalizing("Color.red"), Some(SystemColorToken::Red));
        assert_eq!(
            SystemColorToken::normalizing("  Color.indigo \n"),
            Some(SystemColorToken::Indigo)
        );
    }

    #[test]
    fn rejects_unknown_spellings() {
        for s in ["", ".", "Color.", "Red", "chartreuse", "..red", "Color..red", "UIColor.red"] {
            assert_eq!(SystemColorToken::normalizing(s), None, "{s:?}");
        }
    }

    #[test]
    fn expression_roundtrip() {
        for token in SystemColorToken::ALL {
            let expr = token.expression();
            assert!(expr.starts_with("Color."));
            assert_eq!(SystemColorToken::normalizing(&expr), Some(token));
        }
    }

    #[test]
    fn from_str_uses_normalization() {
        assert_eq!(".teal".parse::<SystemColorToken>(), Ok(SystemColorToken::Teal));
        let err = "Color.magenta".parse::<SystemColorToken>().unwrap_err();
        assert_eq!(err, UnknownTokenError("Color.magenta".to_owned()));
    }

    // ── Catalog ─────────────────────────────────────────────────────

    #[test]
    fn names_are_unique_and_lowercase() {
        let mut names: Vec<_> = SystemColorToken::ALL.iter().map(|t| t.name()).collect();
        assert!(names.iter().all(|n| n.chars().all(|c| c.is_ascii_lowercase())));
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SystemColorToken::ALL.len());
    }

    #[test]
    fn display_names() {
        assert_eq!(SystemColorToken::Indigo.display_name(), "Indigo");
        assert_eq!(SystemColorToken::Primary.display_name(), "Primary");
        assert_eq!(SystemColorToken::Clear.display_name(), "Clear");
        assert_eq!(SystemColorToken::Gray.to_string(), "gray");
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn approximations_match_documented_bytes() {
        assert_eq!(SystemColorToken::Red.rgba().to_hex(), "#FF3B30");
        assert_eq!(SystemColorToken::Blue.rgba().to_hex(), "#007AFF");
        assert_eq!(SystemColorToken::Indigo.rgba().to_hex(), "#5957D6");
        assert_eq!(SystemColorToken::Clear.rgba().a, 0.0);
        assert_eq!(SystemColorToken::Secondary.rgba(), SystemColorToken::Gray.rgba());
    }

    // ── Serde ───────────────────────────────────────────────────────

    #[test]
    fn serializes_as_raw_name() {
        let json = serde_json::to_string(&SystemColorToken::Indigo).unwrap();
        assert_eq!(json, "\"indigo\"");
        let back: SystemColorToken = serde_json::from_str("\"mint\"").unwrap();
        assert_eq!(back, SystemColorToken::Mint);
    }
}
