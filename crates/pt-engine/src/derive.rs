//! Light/dark twin derivation.
//!
//! A twin starts from the target shifted by a fixed brightness offset, then
//! a bounded hill-climb moves it until it clears [`UI_GUARDRAIL`] against
//! its own background. The climb never fails: when the budget runs out it
//! reports the best color it saw, and [`PairMetrics`](crate::PairMetrics)
//! tells the caller how far short that is.
//!
//! Brightness moves here are channelwise ([`Rgba::shift_brightness`]), not
//! HSB brightness.

use pt_color::wcag::{AA_LARGE_TEXT, AA_NORMAL_TEXT};
use pt_color::{Rgba, contrast_ratio, relative_luminance};
use serde::{Deserialize, Serialize};

use crate::config::{self, Backgrounds};
use crate::policy::PairPolicy;

/// Bias is clamped to `[-BIAS_LIMIT, BIAS_LIMIT]`.
pub const BIAS_LIMIT: f64 = 0.25;

/// Starting brightness offset of the light twin, before bias.
pub const LIGHT_OFFSET: f64 = -0.08;

/// Starting brightness offset of the dark twin, before bias.
pub const DARK_OFFSET: f64 = 0.10;

/// Minimum twin-vs-background contrast the search aims for.
pub const UI_GUARDRAIL: f64 = AA_LARGE_TEXT;

const STEP: f64 = 0.02;
const MAX_STEPS: usize = 48;
const STALL_LIMIT: usize = 6;
const EPSILON: f64 = 1e-3;
const MAX_ORDERING_STEPS: usize = 50;

// ---------------------------------------------------------------------------
// DerivedPair
// ---------------------------------------------------------------------------

/// A target and its light-mode and dark-mode twins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedPair {
    pub target: Rgba,
    pub light: Rgba,
    pub dark: Rgba,
    /// White text clears AA for normal text on both twins.
    pub wcag_pass: bool,
}

impl DerivedPair {
    /// Whether the dark twin is strictly brighter than the light twin.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        relative_luminance(self.dark) > relative_luminance(self.light)
    }
}

// ---------------------------------------------------------------------------
// Contrast search
// ---------------------------------------------------------------------------

/// Which way a climb moves brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Lighter,
    Darker,
}

impl Direction {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Lighter => Self::Darker,
            Self::Darker => Self::Lighter,
        }
    }

    /// The direction that tends to raise contrast against `background`:
    /// lighter on a dark background, darker on a light one.
    #[must_use]
    pub fn away_from(background: Rgba) -> Self {
        if relative_luminance(background) < 0.5 {
            Self::Lighter
        } else {
            Self::Darker
        }
    }

    const fn step(self) -> f64 {
        match self {
            Self::Lighter => STEP,
            Self::Darker => -STEP,
        }
    }
}

/// Result of a contrast search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClimbOutcome {
    /// The minimum ratio was met.
    Reached { color: Rgba, ratio: f64 },
    /// The budget ran out or progress stalled; the best color seen.
    BestEffort { color: Rgba, ratio: f64 },
}

impl ClimbOutcome {
    #[must_use]
    pub const fn color(&self) -> Rgba {
        match *self {
            Self::Reached { color, .. } | Self::BestEffort { color, .. } => color,
        }
    }

    #[must_use]
    pub const fn ratio(&self) -> f64 {
        match *self {
            Self::Reached { ratio, .. } | Self::BestEffort { ratio, .. } => ratio,
        }
    }

    #[must_use]
    pub const fn is_reached(&self) -> bool {
        matches!(self, Self::Reached { .. })
    }
}

/// Step `start` in `direction` until its contrast against `background`
/// reaches `min_ratio`.
///
/// At most 48 steps of 0.02. The climb stops early after six
/// consecutive steps that fail to beat the best ratio by more than 1e-3,
/// which happens once every channel is pinned at 0 or 1.
#[must_use]
pub fn climb_contrast(
    start: Rgba,
    background: Rgba,
    direction: Direction,
    min_ratio: f64,
) -> ClimbOutcome {
    let mut best = start;
    let mut best_ratio = contrast_ratio(start, background);
    if best_ratio >= min_ratio {
        return ClimbOutcome::Reached {
            color: start,
            ratio: best_ratio,
        };
    }

    let mut color = start;
    let mut stalled = 0;
    for _ in 0..MAX_STEPS {
        color = color.shift_brightness(direction.step());
        let ratio = contrast_ratio(color, background);

        if ratio > best_ratio + EPSILON {
            best = color;
            best_ratio = ratio;
            stalled = 0;
        } else {
            stalled += 1;
        }

        if ratio >= min_ratio {
            return ClimbOutcome::Reached { color, ratio };
        }
        if stalled >= STALL_LIMIT {
            break;
        }
    }

    ClimbOutcome::BestEffort {
        color: best,
        ratio: best_ratio,
    }
}

/// Find a color near `start` with at least `min_ratio` contrast against
/// `background`.
///
/// Climbs away from the background first and, if that falls short, toward
/// it. When neither attempt reaches the minimum, the one with the higher
/// ratio wins.
#[must_use]
pub fn ensure_contrast(start: Rgba, background: Rgba, min_ratio: f64) -> ClimbOutcome {
    let preferred = Direction::away_from(background);
    let first = climb_contrast(start, background, preferred, min_ratio);
    tracing::trace!(?preferred, ratio = first.ratio(), reached = first.is_reached(), "climb");
    if first.is_reached() {
        return first;
    }

    let retry = preferred.opposite();
    let second = climb_contrast(start, background, retry, min_ratio);
    tracing::trace!(?retry, ratio = second.ratio(), reached = second.is_reached(), "climb");

    let outcome = if second.ratio() > first.ratio() { second } else { first };
    if !outcome.is_reached() {
        tracing::debug!(
            %start,
            %background,
            ratio = outcome.ratio(),
            min_ratio,
            "contrast guardrail not reached, using best effort"
        );
    }
    outcome
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

fn clamp_bias(bias: f64) -> f64 {
    if bias.is_nan() {
        0.0
    } else {
        bias.clamp(-BIAS_LIMIT, BIAS_LIMIT)
    }
}

/// Nudge the twins apart until the dark twin is brighter than the light
/// one. A pinned light twin stays put. Returns the number of steps taken.
fn restore_ordering(light: &mut Rgba, dark: &mut Rgba, light_pinned: bool) -> usize {
    let mut steps = 0;
    while relative_luminance(*dark) <= relative_luminance(*light) && steps < MAX_ORDERING_STEPS {
        let next_light = if light_pinned {
            *light
        } else {
            light.shift_brightness(-STEP)
        };
        let next_dark = dark.shift_brightness(STEP);
        if next_light == *light && next_dark == *dark {
            break;
        }
        *light = next_light;
        *dark = next_dark;
        steps += 1;
    }
    steps
}

/// Derive the light and dark twins of `target`.
///
/// `bias` widens (positive) or narrows (negative) the gap between the twins
/// and is clamped to ±[`BIAS_LIMIT`]. `policy` decides whether the light
/// twin may move; the dark twin is always searched against
/// `backgrounds.dark`.
///
/// The result keeps the dark twin brighter than the light twin, except
/// when a pinned light twin leaves no room above it (a white target under
/// [`PairPolicy::BrandLockedLight`]).
#[must_use]
pub fn derive(
    target: Rgba,
    bias: f64,
    policy: PairPolicy,
    backgrounds: &Backgrounds,
) -> DerivedPair {
    let bias = clamp_bias(bias);
    let light_pinned =
        policy.pins_light(contrast_ratio(target, backgrounds.light), UI_GUARDRAIL);

    let mut light = if light_pinned {
        target
    } else {
        let start = target.shift_brightness(LIGHT_OFFSET - bias);
        ensure_contrast(start, backgrounds.light, UI_GUARDRAIL).color()
    };
    let start = target.shift_brightness(DARK_OFFSET + bias);
    let mut dark = ensure_contrast(start, backgrounds.dark, UI_GUARDRAIL).color();

    let steps = restore_ordering(&mut light, &mut dark, light_pinned);
    if steps > 0 {
        tracing::debug!(%target, %policy, steps, "nudged twins back into order");
    }

    let pair = DerivedPair {
        target,
        light,
        dark,
        wcag_pass: contrast_ratio(Rgba::WHITE, light) >= AA_NORMAL_TEXT
            && contrast_ratio(Rgba::WHITE, dark) >= AA_NORMAL_TEXT,
    };
    if !pair.is_ordered() {
        tracing::debug!(%target, %policy, "twins could not be ordered");
    }
    pair
}

/// [`derive`] against [`config::current`].
#[must_use]
pub fn derive_with_current(target: Rgba, bias: f64, policy: PairPolicy) -> DerivedPair {
    derive(target, bias, policy, &config::current())
}
