// SPDX-License-Identifier: MIT
//
// Color values: sRGB with alpha, plus the HSB view used for applying
// hue/saturation/brightness adjustments.
//
// `Rgba` is the authoritative representation. Lab and HSB are derived on
// demand and never stored alongside it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Rgba ────────────────────────────────────────────────────────────────────

/// An sRGB color with alpha. Channels are normally in `0.0..=1.0`.
///
/// Equality is componentwise and exact; use a tolerance in tests that
/// compare computed colors.
///
/// # Examples
///
/// ```
/// use pt_color::Rgba;
///
/// let brand = Rgba::from_hex("#4C6FAF").unwrap();
/// assert_eq!(brand.to_hex(), "#4C6FAF");
///
/// let same = Rgba::from_rgb_text("76, 111, 175").unwrap();
/// assert_eq!(same.to_hex(), brand.to_hex());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red, 0.0 to 1.0.
    pub r: f64,
    /// Green, 0.0 to 1.0.
    pub g: f64,
    /// Blue, 0.0 to 1.0.
    pub b: f64,
    /// Alpha, 0.0 (transparent) to 1.0 (opaque).
    #[serde(default = "opaque")]
    pub a: f64,
}

const fn opaque() -> f64 {
    1.0
}

impl Rgba {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from all four channels.
    #[inline]
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    #[inline]
    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Pure white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Pure black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Fully transparent black.
    pub const CLEAR: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Parse a six-digit hex color (`#RRGGBB` or `RRGGBB`).
    ///
    /// Surrounding whitespace is ignored. The result is always opaque.
    /// Returns `None` for any other length or a non-hex digit.
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        let bytes = s.as_bytes();
        if bytes.len() != 6 {
            return None;
        }
        let r = parse_hex_byte(&bytes[0..2])?;
        let g = parse_hex_byte(&bytes[2..4])?;
        let b = parse_hex_byte(&bytes[4..6])?;
        Some(Self::rgb8(r, g, b))
    }

    /// Parse comma-separated byte-scale text such as `"76, 111, 175"`.
    ///
    /// Each of the three components is scaled by 1/255. Returns `None`
    /// unless there are exactly three finite numbers.
    #[must_use]
    pub fn from_rgb_text(s: &str) -> Option<Self> {
        let mut parts = s.split(',').map(|p| p.trim().parse::<f64>().ok());
        let r = parts.next()??;
        let g = parts.next()??;
        let b = parts.next()??;
        if parts.next().is_some() || ![r, g, b].iter().all(|c| c.is_finite()) {
            return None;
        }
        Some(Self::rgb(r / 255.0, g / 255.0, b / 255.0))
    }

    /// Create an opaque color from 8-bit channels.
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Channels rounded to the nearest byte (clamped to 0–255).
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// Render as `#RRGGBB` (uppercase). Alpha is not included.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// Render as byte-scale text, `"r,g,b"`, rounded the same way as
    /// [`to_hex`](Self::to_hex).
    #[must_use]
    pub fn to_rgb_text(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("{r},{g},{b}")
    }

    // ─── Adjustments ─────────────────────────────────────────────────────

    /// Add `delta` to each of r, g and b, clamping to 0.0–1.0.
    ///
    /// This is the brightness step the twin deriver walks with. It moves
    /// all three channels together rather than going through HSB, so a
    /// color keeps drifting toward white or black even after one channel
    /// saturates.
    #[inline]
    #[must_use]
    pub fn shift_brightness(self, delta: f64) -> Self {
        Self {
            r: (self.r + delta).clamp(0.0, 1.0),
            g: (self.g + delta).clamp(0.0, 1.0),
            b: (self.b + delta).clamp(0.0, 1.0),
            a: self.a,
        }
    }

    /// Apply a hue rotation, saturation multiplier and brightness delta.
    ///
    /// Works in HSB: the hue wraps into `[0, 360)`, saturation and
    /// brightness are clamped to `[0, 1]`. Alpha is preserved.
    #[must_use]
    pub fn adjusted(self, hue_degrees: f64, sat_multiplier: f64, brightness_delta: f64) -> Self {
        let hsb = self.to_hsb();
        let hsb = Hsb {
            h: normalize_hue(hsb.h + hue_degrees),
            s: (hsb.s * sat_multiplier).clamp(0.0, 1.0),
            b: (hsb.b + brightness_delta).clamp(0.0, 1.0),
        };
        Self::from_hsb(hsb, self.a)
    }

    // ─── HSB ─────────────────────────────────────────────────────────────

    /// Convert to hue/saturation/brightness. Achromatic colors get hue 0.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn to_hsb(self) -> Hsb {
        let Self { r, g, b, .. } = self;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (((g - b) / delta) % 6.0)
        } else if max == g {
            60.0 * (((b - r) / delta) + 2.0)
        } else {
            60.0 * (((r - g) / delta) + 4.0)
        };

        let s = if max == 0.0 { 0.0 } else { delta / max };
        Hsb {
            h: normalize_hue(h),
            s,
            b: max,
        }
    }

    /// Convert from hue/saturation/brightness with the given alpha.
    #[must_use]
    pub fn from_hsb(hsb: Hsb, alpha: f64) -> Self {
        let c = hsb.b * hsb.s;
        let x = c * (1.0 - ((hsb.h / 60.0) % 2.0 - 1.0).abs());
        let m = hsb.b - c;

        let (r, g, b) = match hsb.h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::new(r + m, g + m, b + m, alpha)
    }
}

impl fmt::Debug for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rgba({:.4}, {:.4}, {:.4}, {:.2})",
            self.r, self.g, self.b, self.a
        )
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Default for Rgba {
    /// Default is fully opaque black.
    fn default() -> Self {
        Self::BLACK
    }
}

/// Error returned when text is neither `#RRGGBB` nor `r,g,b`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized color `{input}` (expected #RRGGBB or r,g,b)")]
pub struct ParseColorError {
    input: String,
}

impl ParseColorError {
    /// The text that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for Rgba {
    type Err = ParseColorError;

    /// Accepts hex first, then byte-scale text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
            .or_else(|| Self::from_rgb_text(s))
            .ok_or_else(|| ParseColorError {
                input: s.to_owned(),
            })
    }
}

// ─── Hsb ─────────────────────────────────────────────────────────────────────

/// Hue/saturation/brightness view of an [`Rgba`].
///
/// Only used to apply adjustments; it is never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    /// Hue in degrees, `[0, 360)`.
    pub h: f64,
    /// Saturation, 0.0 to 1.0.
    pub s: f64,
    /// Brightness (value), 0.0 to 1.0.
    pub b: f64,
}

// ─── Adjustment ──────────────────────────────────────────────────────────────

/// The three scalars a caller tunes on top of a palette color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    /// Hue rotation in degrees.
    pub hue_degrees: f64,
    /// Saturation multiplier.
    pub saturation: f64,
    /// Brightness delta.
    pub brightness: f64,
}

impl Adjustment {
    /// No rotation, ×1.0 saturation, +0.0 brightness.
    pub const IDENTITY: Self = Self {
        hue_degrees: 0.0,
        saturation: 1.0,
        brightness: 0.0,
    };

    /// Whether applying this adjustment leaves every color unchanged.
    #[must_use]
    pub fn is_identity(self) -> bool {
        const EPS: f64 = 1e-4;
        self.hue_degrees.abs() < EPS
            && (self.saturation - 1.0).abs() < EPS
            && self.brightness.abs() < EPS
    }

    /// Apply to `color`. See [`Rgba::adjusted`].
    #[must_use]
    pub fn apply(self, color: Rgba) -> Rgba {
        color.adjusted(self.hue_degrees, self.saturation, self.brightness)
    }
}

impl Default for Adjustment {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Normalize a hue angle to the range [0, 360).
#[inline]
fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if h >= 360.0 { 0.0 } else { h }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a channel (0.0–1.0) to a byte, rounding to nearest.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Clamp guarantees 0.0 <= value <= 255.0 before truncation.
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn assert_rgba_close(actual: Rgba, expected: Rgba) {
        assert!(
            approx_eq(actual.r, expected.r, 1e-9)
                && approx_eq(actual.g, expected.g, 1e-9)
                && approx_eq(actual.b, expected.b, 1e-9)
                && approx_eq(actual.a, expected.a, 1e-9),
            "RGBA mismatch: got {actual:?}, expected {expected:?}"
        );
    }

    // ── Hex Parsing ──────────────────────────────────────────────────────

    #[test]
    fn hex_parsing_rrggbb() {
        let color = Rgba::from_hex("#FF8000").unwrap();
        assert_eq!(color.to_rgb8(), (255, 128, 0));
        assert!(approx_eq(color.a, 1.0, 1e-12));
    }

    #[test]
    fn hex_parsing_no_hash_lowercase_and_whitespace() {
        let a = Rgba::from_hex("  4c6faf\n").unwrap();
        let b = Rgba::from_hex("#4C6FAF").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hex_parsing_invalid() {
        assert!(Rgba::from_hex("").is_none());
        assert!(Rgba::from_hex("#FFF").is_none());
        assert!(Rgba::from_hex("#FFFFFFFF").is_none());
        assert!(Rgba::from_hex("#GG0000").is_none());
        assert!(Rgba::from_hex("#12345é").is_none());
    }

    #[test]
    fn hex_roundtrip() {
        for hex in ["#000000", "#FFFFFF", "#1F1F1F", "#4C6FAF", "#FF3B30"] {
            assert_eq!(Rgba::from_hex(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn hex_rounds_to_nearest_byte() {
        // 0.3 * 255 = 76.5 rounds up, 0.7 * 255 = 178.5 rounds up.
        assert_eq!(Rgba::rgb(0.3, 0.5, 0.7).to_hex(), "#4D80B3");
    }

    #[test]
    fn hex_clamps_out_of_range_channels() {
        assert_eq!(Rgba::rgb(-0.2, 1.4, 0.5).to_hex(), "#00FF80");
    }

    // ── RGB Text ─────────────────────────────────────────────────────────

    #[test]
    fn rgb_text_parsing() {
        let c = Rgba::from_rgb_text("255, 128,0").unwrap();
        assert_eq!(c.to_rgb8(), (255, 128, 0));
    }

    #[test]
    fn rgb_text_invalid() {
        assert!(Rgba::from_rgb_text("").is_none());
        assert!(Rgba::from_rgb_text("1,2").is_none());
        assert!(Rgba::from_rgb_text("1,2,3,4").is_none());
        assert!(Rgba::from_rgb_text("1,x,3").is_none());
        assert!(Rgba::from_rgb_text("1,,3").is_none());
        assert!(Rgba::from_rgb_text("NaN,0,0").is_none());
        assert!(Rgba::from_rgb_text("inf,0,0").is_none());
    }

    #[test]
    fn rgb_text_rendering() {
        assert_eq!(Rgba::rgb8(76, 111, 175).to_rgb_text(), "76,111,175");
        assert_eq!(Rgba::WHITE.to_rgb_text(), "255,255,255");
    }

    #[test]
    fn rgb_text_rounds_like_hex() {
        let c = Rgba::rgb(0.3, 0.5, 0.7);
        assert_eq!(c.to_rgb_text(), "77,128,179");
        assert_eq!(c.to_hex(), "#4D80B3");
    }

    #[test]
    fn from_str_accepts_both_forms() {
        let hex: Rgba = "#4C6FAF".parse().unwrap();
        let text: Rgba = "76,111,175".parse().unwrap();
        assert_eq!(hex, text);
    }

    #[test]
    fn from_str_reports_input() {
        let err = "chartreuse".parse::<Rgba>().unwrap_err();
        assert_eq!(err.input(), "chartreuse");
        assert!(err.to_string().contains("chartreuse"));
    }

    // ── Brightness Shift ─────────────────────────────────────────────────

    #[test]
    fn shift_brightness_moves_all_channels() {
        let c = Rgba::rgb(0.3, 0.5, 0.7).shift_brightness(0.1);
        assert_rgba_close(c, Rgba::rgb(0.4, 0.6, 0.8));
    }

    #[test]
    fn shift_brightness_clamps_and_keeps_alpha() {
        let c = Rgba::new(0.95, 0.5, 0.02, 0.5).shift_brightness(0.1);
        assert_rgba_close(c, Rgba::new(1.0, 0.6, 0.12, 0.5));
        let d = Rgba::new(0.95, 0.5, 0.02, 0.5).shift_brightness(-0.1);
        assert_rgba_close(d, Rgba::new(0.85, 0.4, 0.0, 0.5));
    }

    // ── HSB ──────────────────────────────────────────────────────────────

    #[test]
    fn hsb_primaries() {
        let red = Rgba::rgb(1.0, 0.0, 0.0).to_hsb();
        assert!(approx_eq(red.h, 0.0, 1e-9) && approx_eq(red.s, 1.0, 1e-9));
        let green = Rgba::rgb(0.0, 1.0, 0.0).to_hsb();
        assert!(approx_eq(green.h, 120.0, 1e-9));
        let blue = Rgba::rgb(0.0, 0.0, 1.0).to_hsb();
        assert!(approx_eq(blue.h, 240.0, 1e-9));
        let magenta = Rgba::rgb(1.0, 0.0, 0.5).to_hsb();
        assert!(approx_eq(magenta.h, 330.0, 1e-9));
    }

    #[test]
    fn hsb_gray_has_no_saturation() {
        let gray = Rgba::rgb(0.4, 0.4, 0.4).to_hsb();
        assert!(approx_eq(gray.s, 0.0, 1e-12));
        assert!(approx_eq(gray.b, 0.4, 1e-12));
        let black = Rgba::BLACK.to_hsb();
        assert!(approx_eq(black.s, 0.0, 1e-12));
    }

    #[test]
    fn hsb_roundtrip() {
        let colors = [
            Rgba::rgb(0.3, 0.5, 0.7),
            Rgba::rgb(1.0, 0.23, 0.19),
            Rgba::rgb(0.2, 0.78, 0.35),
            Rgba::rgb(0.69, 0.32, 0.87),
            Rgba::rgb(0.56, 0.56, 0.58),
            Rgba::new(0.9, 0.8, 0.1, 0.4),
        ];
        for c in colors {
            assert_rgba_close(Rgba::from_hsb(c.to_hsb(), c.a), c);
        }
    }

    // ── Adjustments ──────────────────────────────────────────────────────

    #[test]
    fn identity_adjustment_is_noop() {
        let c = Rgba::rgb(0.35, 0.34, 0.84);
        assert_rgba_close(Adjustment::IDENTITY.apply(c), c);
        assert!(Adjustment::default().is_identity());
    }

    #[test]
    fn hue_rotation_wraps() {
        let red = Rgba::rgb(1.0, 0.0, 0.0);
        assert_rgba_close(red.adjusted(120.0, 1.0, 0.0), Rgba::rgb(0.0, 1.0, 0.0));
        assert_rgba_close(red.adjusted(-120.0, 1.0, 0.0), Rgba::rgb(0.0, 0.0, 1.0));
        assert_rgba_close(red.adjusted(720.0, 1.0, 0.0), red);
        assert_rgba_close(red.adjusted(-480.0, 1.0, 0.0), Rgba::rgb(0.0, 0.0, 1.0));
    }

    #[test]
    fn saturation_multiplier_clamps() {
        let c = Rgba::rgb(0.8, 0.4, 0.4);
        let gray = c.adjusted(0.0, 0.0, 0.0);
        assert_rgba_close(gray, Rgba::rgb(0.8, 0.8, 0.8));
        let vivid = c.adjusted(0.0, 10.0, 0.0);
        assert!(approx_eq(vivid.to_hsb().s, 1.0, 1e-9));
    }

    #[test]
    fn brightness_delta_clamps_and_keeps_alpha() {
        let c = Rgba::new(0.8, 0.4, 0.4, 0.25);
        let up = c.adjusted(0.0, 1.0, 0.5);
        assert!(approx_eq(up.to_hsb().b, 1.0, 1e-9));
        assert!(approx_eq(up.a, 0.25, 1e-12));
        let down = c.adjusted(0.0, 1.0, -2.0);
        assert_rgba_close(down, Rgba::new(0.0, 0.0, 0.0, 0.25));
    }

    #[test]
    fn normalize_hue_range() {
        assert!(approx_eq(normalize_hue(370.0), 10.0, 1e-9));
        assert!(approx_eq(normalize_hue(-10.0), 350.0, 1e-9));
        assert!(normalize_hue(-1e-18) < 360.0);
    }

    // ── Formatting & Serde ───────────────────────────────────────────────

    #[test]
    fn display_is_hex() {
        assert_eq!(format!("{}", Rgba::rgb8(255, 59, 48)), "#FF3B30");
    }

    #[test]
    fn debug_format() {
        assert_eq!(
            format!("{:?}", Rgba::rgb(0.3, 0.5, 0.7)),
            "Rgba(0.3000, 0.5000, 0.7000, 1.00)"
        );
    }

    #[test]
    fn serde_alpha_defaults_to_opaque() {
        let c: Rgba = serde_json::from_str(r#"{"r":0.3,"g":0.5,"b":0.7}"#).unwrap();
        assert_eq!(c, Rgba::rgb(0.3, 0.5, 0.7));
    }
}
