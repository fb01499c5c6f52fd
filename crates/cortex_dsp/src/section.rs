//! Second-Order Sections
//!
//! Transfer function of one normalized section:
//!
//! ```text
//!         b0 + b1·z⁻¹ + b2·z⁻²
//! H(z) = ──────────────────────
//!          1 + a1·z⁻¹ + a2·z⁻²
//! ```
//!
//! A first-order section is the degenerate case `b2 = a2 = 0`.

use biquad::Coefficients;
use rustfft::num_complex::Complex;
use serde::{Deserialize, Serialize};

/// Normalized (a0 = 1) biquad coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiquadSection {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadSection {
    /// Section that passes its input through unchanged
    pub const IDENTITY: BiquadSection = BiquadSection {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    pub fn new(b0: f64, b1: f64, b2: f64, a1: f64, a2: f64) -> Self {
        Self { b0, b1, b2, a1, a2 }
    }

    /// Whether this section has collapsed to first order
    pub fn is_first_order(&self) -> bool {
        self.b2 == 0.0 && self.a2 == 0.0
    }

    pub fn is_finite(&self) -> bool {
        [self.b0, self.b1, self.b2, self.a1, self.a2]
            .iter()
            .all(|c| c.is_finite())
    }

    /// Roots of `z² + a1·z + a2`.
    ///
    /// A first-order section reports its pole plus a spurious root at the
    /// origin, which never affects stability checks.
    pub fn poles(&self) -> [Complex<f64>; 2] {
        let half = -self.a1 / 2.0;
        let disc = self.a1 * self.a1 - 4.0 * self.a2;
        if disc >= 0.0 {
            let root = disc.sqrt() / 2.0;
            [Complex::new(half + root, 0.0), Complex::new(half - root, 0.0)]
        } else {
            let im = (-disc).sqrt() / 2.0;
            [Complex::new(half, im), Complex::new(half, -im)]
        }
    }

    /// Largest pole magnitude (`NaN` if any coefficient is non-finite)
    pub fn max_pole_magnitude(&self) -> f64 {
        if !self.is_finite() {
            return f64::NAN;
        }
        let [p, q] = self.poles();
        p.norm().max(q.norm())
    }

    /// Finite coefficients and every pole strictly inside the unit circle
    pub fn is_stable(&self) -> bool {
        self.max_pole_magnitude() < 1.0
    }

    /// Complex response at normalized angular frequency `omega` (rad/sample)
    pub fn response(&self, omega: f64) -> Complex<f64> {
        let z1 = Complex::from_polar(1.0, -omega);
        let z2 = z1 * z1;
        let num = z1 * self.b1 + z2 * self.b2 + self.b0;
        let den = z1 * self.a1 + z2 * self.a2 + 1.0;
        num / den
    }

    /// Scale the numerator, changing passband gain without moving poles
    pub fn with_gain(self, gain: f64) -> Self {
        Self {
            b0: self.b0 * gain,
            b1: self.b1 * gain,
            b2: self.b2 * gain,
            ..self
        }
    }

    pub fn to_coefficients(self) -> Coefficients<f64> {
        Coefficients {
            a1: self.a1,
            a2: self.a2,
            b0: self.b0,
            b1: self.b1,
            b2: self.b2,
        }
    }
}

impl From<Coefficients<f64>> for BiquadSection {
    fn from(c: Coefficients<f64>) -> Self {
        Self {
            b0: c.b0,
            b1: c.b1,
            b2: c.b2,
            a1: c.a1,
            a2: c.a2,
        }
    }
}

impl From<BiquadSection> for Coefficients<f64> {
    fn from(section: BiquadSection) -> Self {
        section.to_coefficients()
    }
}
