//! Contrast diagnostics for a derived pair.
//!
//! Each twin is checked twice: white text on the twin (AA normal, 4.5:1)
//! and the twin against its own background (UI guardrail, 3:1). The
//! summary names only the first failure, checked in this order:
//!
//! 1. dark text
//! 2. light text
//! 3. dark background
//! 4. light background

use bitflags::bitflags;
use pt_color::wcag::{AA_LARGE_TEXT, AA_NORMAL_TEXT};
use pt_color::{Rgba, contrast_ratio};
use serde::{Deserialize, Serialize};

use crate::config::{self, Backgrounds};
use crate::derive::DerivedPair;

/// Contrast figures for one twin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwinMetrics {
    /// White text on the twin.
    pub text: f64,
    /// The twin against its own background.
    pub background: f64,
}

impl TwinMetrics {
    #[must_use]
    pub fn measure(twin: Rgba, background: Rgba) -> Self {
        Self {
            text: contrast_ratio(Rgba::WHITE, twin),
            background: contrast_ratio(twin, background),
        }
    }

    #[must_use]
    pub const fn text_pass(&self) -> bool {
        self.text >= AA_NORMAL_TEXT
    }

    #[must_use]
    pub const fn background_pass(&self) -> bool {
        self.background >= AA_LARGE_TEXT
    }

    #[must_use]
    pub const fn pass(&self) -> bool {
        self.text_pass() && self.background_pass()
    }
}

bitflags! {
    /// Failed checks of a pair. Bit order is reporting priority.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Failures: u8 {
        const DARK_TEXT = 1;
        const LIGHT_TEXT = 1 << 1;
        const DARK_BACKGROUND = 1 << 2;
        const LIGHT_BACKGROUND = 1 << 3;
    }
}

impl Failures {
    const PRIORITY: [Self; 4] = [
        Self::DARK_TEXT,
        Self::LIGHT_TEXT,
        Self::DARK_BACKGROUND,
        Self::LIGHT_BACKGROUND,
    ];

    /// The highest-priority failure, if any.
    #[must_use]
    pub fn first_failure(self) -> Option<Self> {
        Self::PRIORITY.into_iter().find(|&flag| self.contains(flag))
    }

    const fn label(self) -> &'static str {
        if self.contains(Self::DARK_TEXT) {
            "Dark text"
        } else if self.contains(Self::LIGHT_TEXT) {
            "Light text"
        } else if self.contains(Self::DARK_BACKGROUND) {
            "Dark bg"
        } else {
            "Light bg"
        }
    }
}

/// Per-twin contrast figures for a [`DerivedPair`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairMetrics {
    pub light: TwinMetrics,
    pub dark: TwinMetrics,
}

impl PairMetrics {
    #[must_use]
    pub const fn overall_pass(&self) -> bool {
        self.light.pass() && self.dark.pass()
    }

    /// Every failed check.
    #[must_use]
    pub fn failures(&self) -> Failures {
        let mut failures = Failures::empty();
        failures.set(Failures::DARK_TEXT, !self.dark.text_pass());
        failures.set(Failures::LIGHT_TEXT, !self.light.text_pass());
        failures.set(Failures::DARK_BACKGROUND, !self.dark.background_pass());
        failures.set(Failures::LIGHT_BACKGROUND, !self.light.background_pass());
        failures
    }

    /// The highest-priority failed check, if any.
    #[must_use]
    pub fn first_failure(&self) -> Option<Failures> {
        self.failures().first_failure()
    }

    /// `"Both PASS"`, or the first failure with its ratio, e.g.
    /// `"Both FAIL — Dark text 3.00× < 4.5×"`.
    #[must_use]
    pub fn overall_summary(&self) -> String {
        let Some(failure) = self.first_failure() else {
            return "Both PASS".to_owned();
        };
        let (ratio, threshold) = match failure {
            f if f == Failures::DARK_TEXT => (self.dark.text, AA_NORMAL_TEXT),
            f if f == Failures::LIGHT_TEXT => (self.light.text, AA_NORMAL_TEXT),
            f if f == Failures::DARK_BACKGROUND => (self.dark.background, AA_LARGE_TEXT),
            _ => (self.light.background, AA_LARGE_TEXT),
        };
        format!("Both FAIL — {} {ratio:.2}× < {threshold:.1}×", failure.label())
    }
}

/// Measure both twins of `pair` against `backgrounds`.
#[must_use]
pub fn metrics(pair: &DerivedPair, backgrounds: &Backgrounds) -> PairMetrics {
    PairMetrics {
        light: TwinMetrics::measure(pair.light, backgrounds.light),
        dark: TwinMetrics::measure(pair.dark, backgrounds.dark),
    }
}

/// [`metrics`] against [`config::current`].
#[must_use]
pub fn metrics_with_current(pair: &DerivedPair) -> PairMetrics {
    metrics(pair, &config::current())
}
