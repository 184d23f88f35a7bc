//! Pair policies, which decide how closely the light twin tracks the target.
//!
//! | Policy                  | Light twin                               | Dark twin |
//! |-------------------------|------------------------------------------|-----------|
//! | `guardrailed`           | offset, then climbed to 3:1              | climbed   |
//! | `exactLightIfCompliant` | the target if it already clears 3:1      | climbed   |
//! | `brandLockedLight`      | always the target                        | climbed   |
//!
//! `brandLockedLight` does not enforce contrast on the light twin. Callers
//! that pick it accept that trade-off; [`PairMetrics`](crate::PairMetrics)
//! reports the result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Strategy selector for [`derive`](crate::derive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PairPolicy {
    /// Both twins may move to satisfy the guardrail.
    Guardrailed,
    /// Keep the light twin exact when the target already clears the
    /// guardrail against the light background.
    #[default]
    ExactLightIfCompliant,
    /// Keep the light twin exact unconditionally.
    BrandLockedLight,
}

impl PairPolicy {
    pub const ALL: [Self; 3] = [
        Self::Guardrailed,
        Self::ExactLightIfCompliant,
        Self::BrandLockedLight,
    ];

    /// Map a "keep light exact" switch to a policy.
    #[must_use]
    pub const fn from_toggle(keep_light_exact: bool) -> Self {
        if keep_light_exact {
            Self::ExactLightIfCompliant
        } else {
            Self::Guardrailed
        }
    }

    /// The camelCase raw name, as serialized.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Guardrailed => "guardrailed",
            Self::ExactLightIfCompliant => "exactLightIfCompliant",
            Self::BrandLockedLight => "brandLockedLight",
        }
    }

    const fn kebab_name(self) -> &'static str {
        match self {
            Self::Guardrailed => "guardrailed",
            Self::ExactLightIfCompliant => "exact-light-if-compliant",
            Self::BrandLockedLight => "brand-locked-light",
        }
    }

    /// Whether the light twin may skip the guardrail search and keep the
    /// target as-is, given the target's contrast against the light
    /// background.
    #[must_use]
    pub const fn pins_light(self, target_contrast: f64, guardrail: f64) -> bool {
        match self {
            Self::Guardrailed => false,
            Self::ExactLightIfCompliant => target_contrast >= guardrail,
            Self::BrandLockedLight => true,
        }
    }
}

impl fmt::Display for PairPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pair policy `{0}` (expected guardrailed, exactLightIfCompliant or brandLockedLight)")]
pub struct UnknownPolicyError(pub String);

impl FromStr for PairPolicy {
    type Err = UnknownPolicyError;

    /// Accepts the camelCase name or its kebab-case form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == t || p.kebab_name() == t)
            .ok_or_else(|| UnknownPolicyError(s.to_owned()))
    }
}
