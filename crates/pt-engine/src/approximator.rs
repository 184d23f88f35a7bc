//! Nearest-system-color approximation.
//!
//! Picks the palette entry with the smallest CIEDE2000 distance to the
//! target and reports identity adjustments; live tuning of hue, saturation
//! and brightness is left to the caller.

use pt_color::{Rgba, TextSize, ciede2000, contrast_ratio, passes_aa};

use crate::output::ApproximatedOutput;
use crate::token::SystemColorToken;

/// Finds the closest [`SystemColorToken`] to a target color.
#[derive(Debug, Clone, Copy)]
pub struct Approximator<'a> {
    palette: &'a [SystemColorToken],
}

impl Approximator<'static> {
    /// An approximator over [`BASES`](Self::BASES).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            palette: &Self::BASES,
        }
    }
}

impl Default for Approximator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Approximator<'a> {
    /// The curated candidates, in search order. Ties resolve to the
    /// earliest entry.
    pub const BASES: [SystemColorToken; 13] = [
        SystemColorToken::Blue,
        SystemColorToken::Indigo,
        SystemColorToken::Teal,
        SystemColorToken::Mint,
        SystemColorToken::Green,
        SystemColorToken::Yellow,
        SystemColorToken::Orange,
        SystemColorToken::Red,
        SystemColorToken::Pink,
        SystemColorToken::Purple,
        SystemColorToken::Brown,
        SystemColorToken::Gray,
        SystemColorToken::Cyan,
    ];

    /// Returned when the candidate list is empty.
    pub const FALLBACK: SystemColorToken = SystemColorToken::Blue;

    /// An approximator over a custom candidate list.
    #[must_use]
    pub const fn with_palette(palette: &'a [SystemColorToken]) -> Self {
        Self { palette }
    }

    /// The candidates this approximator searches.
    #[must_use]
    pub const fn palette(&self) -> &'a [SystemColorToken] {
        self.palette
    }

    /// Nearest candidate to `target` and its ΔE00.
    ///
    /// An empty palette yields [`Approximator::FALLBACK`].
    #[must_use]
    pub fn nearest(&self, target: Rgba) -> (SystemColorToken, f64) {
        let target_lab = target.to_lab();
        let mut best: Option<(SystemColorToken, f64)> = None;

        for &token in self.palette {
            let d = ciede2000(token.lab(), target_lab);
            // Strict `<` keeps the first of equal minima.
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((token, d));
            }
        }

        best.unwrap_or_else(|| {
            let token = Self::FALLBACK;
            (token, ciede2000(token.lab(), target_lab))
        })
    }

    /// Approximate `target` with the nearest system color.
    ///
    /// ΔE is measured against the unadjusted base, and the WCAG badge is
    /// white text on the unadjusted base. Never fails.
    #[must_use]
    pub fn approximate(&self, target: Rgba) -> ApproximatedOutput {
        let (base, delta_e) = self.nearest(target);
        let wcag_pass = passes_aa(contrast_ratio(Rgba::WHITE, base.rgba()), TextSize::Normal);

        tracing::trace!(%target, %base, delta_e, wcag_pass, "approximated");

        ApproximatedOutput::new(target, base, delta_e, wcag_pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn exact_base_maps_to_itself() {
        let approximator = Approximator::new();
        for token in Approximator::BASES {
            let out = approximator.approximate(token.rgba());
            assert_eq!(out.base, token);
            assert!(approx_eq(out.delta_e, 0.0, 1e-9), "{token}: {}", out.delta_e);
        }
    }

    #[test]
    fn stable_under_small_perturbation() {
        let target = SystemColorToken::Indigo.rgba().shift_brightness(0.01);
        let out = Approximator::new().approximate(target);
        assert_eq!(out.base, SystemColorToken::Indigo);
        assert!(out.delta_e > 0.0 && out.delta_e < 2.0);
    }

    #[test]
    fn identity_adjustments() {
        let out = Approximator::new().approximate(Rgba::rgb(0.3, 0.5, 0.7));
        assert!(approx_eq(out.hue_degrees, 0.0, 1e-12));
        assert!(approx_eq(out.saturation, 1.0, 1e-12));
        assert!(approx_eq(out.brightness, 0.0, 1e-12));
        assert!(out.adjustment().is_identity());
    }

    #[test]
    fn steel_blue_resolves_to_blue() {
        let out = Approximator::new().approximate(Rgba::rgb(0.3, 0.5, 0.7));
        assert_eq!(out.base, SystemColorToken::Blue);
        let expected = ciede2000(SystemColorToken::Blue.lab(), Rgba::rgb(0.3, 0.5, 0.7).to_lab());
        assert!(approx_eq(out.delta_e, expected, 1e-12));
    }

    #[test]
    fn neutral_resolves_to_gray() {
        let out = Approximator::new().approximate(Rgba::rgb(0.5, 0.5, 0.5));
        assert_eq!(out.base, SystemColorToken::Gray);
    }

    #[test]
    fn wcag_badge_uses_unadjusted_base() {
        // White on indigo is ~5.6:1, white on blue ~4.0:1.
        let indigo = Approximator::new().approximate(SystemColorToken::Indigo.rgba());
        assert!(indigo.wcag_pass);
        let blue = Approximator::new().approximate(SystemColorToken::Blue.rgba());
        assert!(!blue.wcag_pass);
        let yellow = Approximator::new().approximate(Rgba::rgb(1.0, 0.95, 0.6));
        assert_eq!(yellow.base, SystemColorToken::Yellow);
        assert!(!yellow.wcag_pass);
    }

    #[test]
    fn tie_break_prefers_first_entry() {
        // Gray and secondary share one approximation.
        let palette = [SystemColorToken::Secondary, SystemColorToken::Gray];
        let out = Approximator::with_palette(&palette).approximate(Rgba::rgb(0.5, 0.5, 0.5));
        assert_eq!(out.base, SystemColorToken::Secondary);

        let reversed = [SystemColorToken::Gray, SystemColorToken::Secondary];
        let out = Approximator::with_palette(&reversed).approximate(Rgba::rgb(0.5, 0.5, 0.5));
        assert_eq!(out.base, SystemColorToken::Gray);
    }

    #[test]
    fn empty_palette_falls_back() {
        let out = Approximator::with_palette(&[]).approximate(Rgba::rgb(1.0, 0.0, 0.0));
        assert_eq!(out.base, Approximator::FALLBACK);
        assert!(out.delta_e > 0.0);
    }

    #[test]
    fn default_searches_bases() {
        assert_eq!(Approximator::default().palette(), &Approximator::BASES);
    }
}
