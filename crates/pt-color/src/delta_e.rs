// SPDX-License-Identifier: MIT
//
// CIEDE2000 color difference (ΔE00), CIE Technical Report 142-2001.
//
// Rough reading of the result:
//
//   < 1.0     imperceptible
//   1.0–2.0   perceptible on close inspection
//   2.0–10.0  noticeable at a glance
//   > 10.0    different colors
//
// Reference: G. Sharma, W. Wu, E. N. Dalal, "The CIEDE2000 Color-Difference
// Formula: Implementation Notes, Supplementary Test Data, and Mathematical
// Observations" (2005). The test pairs below come from that paper.

#![allow(clippy::suboptimal_flops)]

use crate::lab::Lab;

/// 25⁷, the chroma pivot in the G and R_C terms.
const POW25_7: f64 = 6_103_515_625.0;

/// Chroma below which a hue angle is treated as undefined.
const ACHROMATIC: f64 = 1e-7;

/// CIEDE2000 perceptual distance between two Lab colors (kL = kC = kH = 1).
///
/// Symmetric in its arguments and zero for identical inputs.
#[must_use]
pub fn ciede2000(x: Lab, y: Lab) -> f64 {
    let Lab { l: l1, a: a1, b: b1 } = x;
    let Lab { l: l2, a: a2, b: b2 } = y;

    // Chroma compensation G, from the mean of the raw chromas.
    let mean_c = (a1.hypot(b1) + a2.hypot(b2)) / 2.0;
    let g = 0.5 * (1.0 - chroma_weight(mean_c));

    let a1p = (1.0 + g) * a1;
    let a2p = (1.0 + g) * a2;
    let c1p = a1p.hypot(b1);
    let c2p = a2p.hypot(b2);
    let mean_cp = (c1p + c2p) / 2.0;

    let h1p = hue_angle(b1, a1p, c1p);
    let h2p = hue_angle(b2, a2p, c2p);
    let chromatic = c1p * c2p != 0.0;

    // Differences.
    let delta_l = l2 - l1;
    let delta_c = c2p - c1p;
    let delta_h = if chromatic {
        let mut d = h2p - h1p;
        if d > 180.0 {
            d -= 360.0;
        } else if d < -180.0 {
            d += 360.0;
        }
        d
    } else {
        0.0
    };
    let delta_big_h = 2.0 * (c1p * c2p).sqrt() * (delta_h.to_radians() / 2.0).sin();

    // Means.
    let mean_l = (l1 + l2) / 2.0;
    let mean_h = if chromatic {
        let mut sum = h1p + h2p;
        if (h1p - h2p).abs() > 180.0 {
            sum += if sum < 360.0 { 360.0 } else { -360.0 };
        }
        sum / 2.0
    } else {
        h1p + h2p
    };

    // Weighting functions.
    let t = 1.0 - 0.17 * (mean_h - 30.0).to_radians().cos()
        + 0.24 * (2.0 * mean_h).to_radians().cos()
        + 0.32 * (3.0 * mean_h + 6.0).to_radians().cos()
        - 0.20 * (4.0 * mean_h - 63.0).to_radians().cos();

    let delta_theta = 30.0 * (-((mean_h - 275.0) / 25.0).powi(2)).exp();
    let r_c = 2.0 * chroma_weight(mean_cp);
    let l50 = (mean_l - 50.0).powi(2);
    let s_l = 1.0 + (0.015 * l50) / (20.0 + l50).sqrt();
    let s_c = 1.0 + 0.045 * mean_cp;
    let s_h = 1.0 + 0.015 * mean_cp * t;
    let r_t = -(2.0 * delta_theta).to_radians().sin() * r_c;

    let term_l = delta_l / s_l;
    let term_c = delta_c / s_c;
    let term_h = delta_big_h / s_h;

    (term_l * term_l + term_c * term_c + term_h * term_h + r_t * term_c * term_h).sqrt()
}

/// √(C⁷ / (C⁷ + 25⁷)).
#[inline]
fn chroma_weight(c: f64) -> f64 {
    let c7 = c.powi(7);
    (c7 / (c7 + POW25_7)).sqrt()
}

/// Hue angle in degrees, `[0, 360)`, or 0 for achromatic input.
#[inline]
fn hue_angle(b: f64, a_prime: f64, c_prime: f64) -> f64 {
    if c_prime < ACHROMATIC {
        return 0.0;
    }
    let h = b.atan2(a_prime).to_degrees();
    if h < 0.0 { h + 360.0 } else { h }
}
