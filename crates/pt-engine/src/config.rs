//! Reference backgrounds that contrast is judged against.
//!
//! Pass [`Backgrounds`] explicitly (directly or through a [`PairContext`])
//! wherever possible. For callers that track the system appearance in one
//! place, a process-wide current value is kept behind a lock and read by
//! the `*_with_current` entry points. Updates replace the whole value, so a
//! reader never sees a light background from one update paired with a
//! dark background from another.

use parking_lot::RwLock;
use pt_color::Rgba;
use serde::{Deserialize, Serialize};

use crate::derive::{self, DerivedPair};
use crate::metrics::{self, PairMetrics};
use crate::policy::PairPolicy;

/// The light-mode and dark-mode reference backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Backgrounds {
    pub light: Rgba,
    pub dark: Rgba,
}

impl Backgrounds {
    /// White and near-black (#1F1F1F), for callers that have not resolved
    /// the real system backgrounds.
    pub const DEFAULT: Self = Self {
        light: Rgba::WHITE,
        dark: Rgba::rgb(0.12, 0.12, 0.12),
    };

    #[must_use]
    pub const fn new(light: Rgba, dark: Rgba) -> Self {
        Self { light, dark }
    }
}

impl Default for Backgrounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

static CURRENT: RwLock<Backgrounds> = parking_lot::const_rwlock(Backgrounds::DEFAULT);

/// A snapshot of the process-wide backgrounds.
#[must_use]
pub fn current() -> Backgrounds {
    *CURRENT.read()
}

/// Replace the process-wide backgrounds.
pub fn set_current(backgrounds: Backgrounds) {
    tracing::debug!(
        light = %backgrounds.light,
        dark = %backgrounds.dark,
        "replacing current backgrounds"
    );
    *CURRENT.write() = backgrounds;
}

/// Restore [`Backgrounds::DEFAULT`] as the process-wide value.
pub fn reset() {
    set_current(Backgrounds::DEFAULT);
}

/// Derivation and diagnostics bound to one set of backgrounds.
///
/// The injected alternative to the process-wide value: hold one of these
/// where the appearance is known and hand it to whatever needs pairs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PairContext {
    pub backgrounds: Backgrounds,
}

impl PairContext {
    #[must_use]
    pub const fn new(backgrounds: Backgrounds) -> Self {
        Self { backgrounds }
    }

    /// A context over a snapshot of the process-wide backgrounds.
    #[must_use]
    pub fn from_current() -> Self {
        Self::new(current())
    }

    #[must_use]
    pub fn derive(&self, target: Rgba, bias: f64, policy: PairPolicy) -> DerivedPair {
        derive::derive(target, bias, policy, &self.backgrounds)
    }

    #[must_use]
    pub fn metrics(&self, pair: &DerivedPair) -> PairMetrics {
        metrics::metrics(pair, &self.backgrounds)
    }
}
