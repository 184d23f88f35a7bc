//! WCAG 2.1 relative luminance and contrast ratio.
//!
//! Contrast is judged in sRGB relative luminance, the space the WCAG
//! definition uses. Thresholds:
//!
//! - Normal text: AA requires a ratio >= 4.5:1
//! - Large text (>= 18pt, or 14pt bold) and UI components: >= 3.0:1

use crate::color::Rgba;
use crate::lab::srgb_to_linear;

/// AA threshold for body text.
pub const AA_NORMAL_TEXT: f64 = 4.5;

/// AA threshold for large text, also used as the UI-legibility guardrail.
pub const AA_LARGE_TEXT: f64 = 3.0;

/// Which AA threshold applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    #[default]
    Normal,
    Large,
}

impl TextSize {
    /// The minimum contrast ratio for AA at this size.
    #[must_use]
    pub const fn aa_threshold(self) -> f64 {
        match self {
            Self::Normal => AA_NORMAL_TEXT,
            Self::Large => AA_LARGE_TEXT,
        }
    }
}

/// WCAG 2.1 relative luminance: linearized channels weighted
/// 0.2126 / 0.7152 / 0.0722.
///
/// 0.0 for black, 1.0 for white. Alpha does not participate.
#[must_use]
pub fn relative_luminance(color: Rgba) -> f64 {
    let r_lin = srgb_to_linear(color.r);
    let g_lin = srgb_to_linear(color.g);
    let b_lin = srgb_to_linear(color.b);
    0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin))
}

/// Contrast ratio `(L_hi + 0.05) / (L_lo + 0.05)`, in `[1, 21]`.
///
/// Argument order does not matter.
#[must_use]
pub fn contrast_ratio(fg: Rgba, bg: Rgba) -> f64 {
    let lf = relative_luminance(fg);
    let lb = relative_luminance(bg);
    let (lighter, darker) = if lf >= lb { (lf, lb) } else { (lb, lf) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether `ratio` meets WCAG AA for the given text size.
#[must_use]
pub fn passes_aa(ratio: f64, size: TextSize) -> bool {
    ratio >= size.aa_threshold()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
