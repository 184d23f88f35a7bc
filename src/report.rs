// SPDX-License-Identifier: MIT
//
// Plain-text and JSON renderings of each subcommand's result. Text reports
// are aligned two-column blocks; JSON reports reuse the core types' serde
// forms so a stored approximation can be read back with the legacy-aware
// decoder.

use pt_color::{Rgba, TextSize, passes_aa};
use pt_engine::{ApproximatedOutput, DerivedPair, PairMetrics, PairPolicy};
use serde::Serialize;

use crate::error::Result;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Format {
    pub const fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

fn swatch(color: Rgba) -> String {
    format!("{}  ({})", color.to_hex(), color.to_rgb_text())
}

fn verdict(pass: bool) -> &'static str {
    if pass { "PASS" } else { "FAIL" }
}

fn render<T: Serialize>(format: Format, value: &T, text: impl FnOnce() -> String) -> Result<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(value)?),
        Format::Text => Ok(text()),
    }
}

// ─── approximate ────────────────────────────────────────────────────────────

pub fn approximation(out: &ApproximatedOutput, format: Format) -> Result<String> {
    render(format, out, || {
        format!(
            "target      {}\n\
             base        {}  {}\n\
             delta E     {:.2}\n\
             white text  {}\n",
            swatch(out.target),
            out.base_expression(),
            out.base_rgba().to_hex(),
            out.delta_e,
            verdict(out.wcag_pass),
        )
    })
}

// ─── derive / metrics ───────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PairReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    policy: Option<PairPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bias: Option<f64>,
    pair: &'a DerivedPair,
    metrics: &'a PairMetrics,
    overall_pass: bool,
    overall_summary: String,
}

/// Report a derived pair. `policy` and `bias` are shown when the pair came
/// from a derivation rather than from two given colors.
pub fn pair(
    pair: &DerivedPair,
    metrics: &PairMetrics,
    derivation: Option<(PairPolicy, f64)>,
    format: Format,
) -> Result<String> {
    let report = PairReport {
        policy: derivation.map(|(p, _)| p),
        bias: derivation.map(|(_, b)| b),
        pair,
        metrics,
        overall_pass: metrics.overall_pass(),
        overall_summary: metrics.overall_summary(),
    };
    render(format, &report, || {
        let mut text = String::new();
        if let Some((policy, bias)) = derivation {
            text.push_str(&format!("policy      {policy} (bias {bias:+.2})\n"));
            text.push_str(&format!("target      {}\n", swatch(pair.target)));
        }
        text.push_str(&format!(
            "light       {}  text {:.2}×  bg {:.2}×  {}\n\
             dark        {}  text {:.2}×  bg {:.2}×  {}\n\
             summary     {}\n",
            swatch(pair.light),
            metrics.light.text,
            metrics.light.background,
            verdict(metrics.light.pass()),
            swatch(pair.dark),
            metrics.dark.text,
            metrics.dark.background,
            verdict(metrics.dark.pass()),
            report.overall_summary,
        ));
        text
    })
}

// ─── contrast / delta-e ─────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContrastReport {
    ratio: f64,
    aa_normal: bool,
    aa_large: bool,
}

pub fn contrast(ratio: f64, format: Format) -> Result<String> {
    let report = ContrastReport {
        ratio,
        aa_normal: passes_aa(ratio, TextSize::Normal),
        aa_large: passes_aa(ratio, TextSize::Large),
    };
    render(format, &report, || {
        format!(
            "ratio       {:.2}:1\n\
             AA normal   {}\n\
             AA large    {}\n",
            report.ratio,
            verdict(report.aa_normal),
            verdict(report.aa_large),
        )
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeltaEReport {
    delta_e: f64,
}

pub fn delta_e(delta_e: f64, format: Format) -> Result<String> {
    render(format, &DeltaEReport { delta_e }, || format!("delta E     {delta_e:.4}\n"))
}
