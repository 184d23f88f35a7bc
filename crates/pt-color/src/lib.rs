// SPDX-License-Identifier: MIT
//
// pt-color: color math for pairtone.
//
// Everything the matching and derivation engines measure goes through
// this crate: sRGB values, their Lab coordinates, the CIEDE2000 distance
// between two Lab points, and WCAG luminance contrast. All functions are
// pure and take their inputs by value.
//
// Conversion pipeline:
//
//   sRGB ─ linearize ─▶ linear sRGB ─ M(D65) ─▶ XYZ ─ f(t) ─▶ Lab ─▶ ΔE00
//                            │
//                            └─ weighted sum ─▶ relative luminance ─▶ contrast
//
// Hue/saturation/brightness exists only as a vehicle for applying the
// adjustments a caller tunes on top of a palette color.

// Single-character variable names (r, g, b, l, a, c, h, s) are the
// standard mathematical convention in color science.
#![allow(clippy::many_single_char_names)]
// L/a/b, C1'/C2', h1'/h2' are inherently similar names.
#![allow(clippy::similar_names)]

pub mod color;
pub mod delta_e;
pub mod lab;
pub mod wcag;

pub use color::{Adjustment, Hsb, ParseColorError, Rgba};
pub use delta_e::ciede2000;
pub use lab::Lab;
pub use wcag::{TextSize, contrast_ratio, passes_aa, relative_luminance};
