// SPDX-License-Identifier: MIT
//
// sRGB → linear sRGB → CIE XYZ (D65) → CIE L*a*b*.
//
// Lab is the space ΔE00 is defined in. It is computed on demand from an
// `Rgba` and never persisted.

use crate::color::Rgba;

/// D65 reference white (2° observer).
const WHITE_X: f64 = 0.950_47;
const WHITE_Y: f64 = 1.0;
const WHITE_Z: f64 = 1.088_83;

/// (6/29)³, the knee of the Lab transfer function.
const EPSILON: f64 = 216.0 / 24_389.0;

/// A CIE L*a*b* coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness, 0.0 (black) to 100.0 (diffuse white).
    pub l: f64,
    /// Green (−) to red (+) axis.
    pub a: f64,
    /// Blue (−) to yellow (+) axis.
    pub b: f64,
}

impl Lab {
    #[inline]
    #[must_use]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// CIEDE2000 distance to `other`. See [`crate::delta_e::ciede2000`].
    #[inline]
    #[must_use]
    pub fn delta_e(self, other: Self) -> f64 {
        crate::delta_e::ciede2000(self, other)
    }
}

impl From<Rgba> for Lab {
    fn from(color: Rgba) -> Self {
        color.to_lab()
    }
}

impl Rgba {
    /// Linear-light CIE XYZ (D65). Alpha is ignored.
    #[must_use]
    pub fn to_xyz(self) -> (f64, f64, f64) {
        let r = srgb_to_linear(self.r);
        let g = srgb_to_linear(self.g);
        let b = srgb_to_linear(self.b);

        let x = 0.180_437_5f64.mul_add(b, 0.412_456_4f64.mul_add(r, 0.357_576_1 * g));
        let y = 0.072_175f64.mul_add(b, 0.212_672_9f64.mul_add(r, 0.715_152_2 * g));
        let z = 0.950_304_1f64.mul_add(b, 0.019_333_9f64.mul_add(r, 0.119_192 * g));
        (x, y, z)
    }

    /// CIE L*a*b* relative to D65 white.
    #[must_use]
    pub fn to_lab(self) -> Lab {
        let (x, y, z) = self.to_xyz();
        let fx = lab_f(x / WHITE_X);
        let fy = lab_f(y / WHITE_Y);
        let fz = lab_f(z / WHITE_Z);
        Lab {
            l: 116.0f64.mul_add(fy, -16.0),
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

/// Convert a single sRGB component to linear light (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// The CIE Lab companding function.
#[inline]
fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        // (29/6)² / 3 · t + 4/29
        (841.0 / 108.0f64).mul_add(t, 4.0 / 29.0)
    }
}
