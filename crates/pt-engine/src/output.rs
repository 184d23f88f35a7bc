//! The approximation result and its persisted form.
//!
//! Older payloads stored the base color as a free-form `baseName` string
//! (`".indigo"`, `"indigo"`, `"Color.indigo"`) instead of a structured
//! `base` token. Decoding accepts either shape; writing emits the
//! structured token and echoes `baseName` for readers that have not moved
//! over yet.

use pt_color::{Adjustment, Rgba};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::token::SystemColorToken;

/// Nearest system color for a target, plus the adjustments and fit metrics.
///
/// Created by [`Approximator`](crate::Approximator) and never mutated
/// afterwards. A UI tuning the sliders works on its own copy of the three
/// scalars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximatedOutput {
    pub target: Rgba,
    pub base: SystemColorToken,
    /// Hue rotation in degrees.
    pub hue_degrees: f64,
    /// Saturation multiplier.
    pub saturation: f64,
    /// Brightness delta.
    pub brightness: f64,
    /// ΔE00 between the target and the unadjusted base.
    pub delta_e: f64,
    /// White text on the unadjusted base meets AA for normal text.
    pub wcag_pass: bool,
}

impl ApproximatedOutput {
    /// An output with identity adjustments.
    #[must_use]
    pub const fn new(
        target: Rgba,
        base: SystemColorToken,
        delta_e: f64,
        wcag_pass: bool,
    ) -> Self {
        Self::with_adjustment(target, base, Adjustment::IDENTITY, delta_e, wcag_pass)
    }

    #[must_use]
    pub const fn with_adjustment(
        target: Rgba,
        base: SystemColorToken,
        adjustment: Adjustment,
        delta_e: f64,
        wcag_pass: bool,
    ) -> Self {
        Self {
            target,
            base,
            hue_degrees: adjustment.hue_degrees,
            saturation: adjustment.saturation,
            brightness: adjustment.brightness,
            delta_e,
            wcag_pass,
        }
    }

    #[must_use]
    pub const fn adjustment(&self) -> Adjustment {
        Adjustment {
            hue_degrees: self.hue_degrees,
            saturation: self.saturation,
            brightness: self.brightness,
        }
    }

    /// The base token's sRGB approximation.
    #[must_use]
    pub const fn base_rgba(&self) -> Rgba {
        self.base.rgba()
    }

    /// The base with this output's adjustments applied.
    #[must_use]
    pub fn adjusted_color(&self) -> Rgba {
        self.adjustment().apply(self.base_rgba())
    }

    /// The base as a canonical expression, e.g. `"Color.indigo"`.
    #[must_use]
    pub fn base_expression(&self) -> String {
        self.base.expression()
    }
}

// ─── Wire format ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputRef<'a> {
    target: &'a Rgba,
    base: SystemColorToken,
    hue_degrees: f64,
    saturation: f64,
    brightness: f64,
    delta_e: f64,
    wcag_pass: bool,
    /// Legacy echo, `".<name>"`.
    base_name: String,
}

impl Serialize for ApproximatedOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OutputRef {
            target: &self.target,
            base: self.base,
            hue_degrees: self.hue_degrees,
            saturation: self.saturation,
            brightness: self.brightness,
            delta_e: self.delta_e,
            wcag_pass: self.wcag_pass,
            base_name: format!(".{}", self.base.name()),
        }
        .serialize(serializer)
    }
}

/// A `base` field value: a structured token, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum StructuredBase {
    Token(SystemColorToken),
    Other(IgnoredAny),
}

/// A `baseName` field value: a string to normalize, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyBaseName {
    Name(String),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OutputRecord {
    target: Rgba,
    #[serde(default)]
    base: Option<StructuredBase>,
    #[serde(default)]
    base_name: Option<LegacyBaseName>,
    hue_degrees: f64,
    saturation: f64,
    brightness: f64,
    delta_e: f64,
    wcag_pass: bool,
}

/// The two shapes a persisted base can take.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BaseField {
    Structured(SystemColorToken),
    Legacy(String),
    Missing,
}

impl BaseField {
    fn from_record(base: Option<StructuredBase>, base_name: Option<LegacyBaseName>) -> Self {
        match (base, base_name) {
            (Some(StructuredBase::Token(token)), _) => Self::Structured(token),
            (_, Some(LegacyBaseName::Name(name))) => Self::Legacy(name),
            _ => Self::Missing,
        }
    }

    /// Resolve to a token, substituting [`ApproximatedOutput::LEGACY_FALLBACK`]
    /// when a legacy name does not normalize or no base was stored.
    fn resolve(self) -> SystemColorToken {
        match self {
            Self::Structured(token) => token,
            Self::Legacy(name) => SystemColorToken::normalizing(&name).unwrap_or_else(|| {
                tracing::warn!(
                    base_name = %name,
                    fallback = %ApproximatedOutput::LEGACY_FALLBACK,
                    "unrecognized legacy base name"
                );
                ApproximatedOutput::LEGACY_FALLBACK
            }),
            Self::Missing => {
                tracing::warn!(
                    fallback = %ApproximatedOutput::LEGACY_FALLBACK,
                    "approximation record has no base"
                );
                ApproximatedOutput::LEGACY_FALLBACK
            }
        }
    }
}

impl ApproximatedOutput {
    /// Token used when a stored base cannot be recovered.
    pub const LEGACY_FALLBACK: SystemColorToken = SystemColorToken::Blue;
}

impl<'de> Deserialize<'de> for ApproximatedOutput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = OutputRecord::deserialize(deserializer)?;
        let base = BaseField::from_record(record.base, record.base_name).resolve();
        Ok(Self {
            target: record.target,
            base,
            hue_degrees: record.hue_degrees,
            saturation: record.saturation,
            brightness: record.brightness,
            delta_e: record.delta_e,
            wcag_pass: record.wcag_pass,
        })
    }
}
