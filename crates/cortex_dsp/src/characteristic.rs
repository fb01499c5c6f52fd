//! Filter Characteristics
//!
//! A characteristic decides where the poles of the normalized (1 rad/s)
//! analog prototype sit. Everything after that point (frequency scaling,
//! bilinear transform, cascade evaluation) is shared, so adding a design
//! such as Chebyshev only means adding a variant and its pole rule.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use rustfft::num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::error::DspError;

/// Supported analog prototype families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Characteristic {
    /// Maximally flat passband
    #[default]
    #[serde(alias = "Butterworth")]
    Butterworth,
}

/// One stage of a normalized analog prototype
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrototypeStage {
    /// Real pole on the negative real axis (first-order stage)
    Real(f64),
    /// Complex-conjugate pole pair, stored as its upper half-plane member
    Conjugate(Complex<f64>),
}

impl PrototypeStage {
    /// Number of poles this stage contributes
    pub fn order(&self) -> usize {
        match self {
            PrototypeStage::Real(_) => 1,
            PrototypeStage::Conjugate(_) => 2,
        }
    }
}

impl Characteristic {
    /// Every characteristic this build can design
    pub const ALL: [Characteristic; 1] = [Characteristic::Butterworth];

    pub fn name(self) -> &'static str {
        match self {
            Characteristic::Butterworth => "butterworth",
        }
    }

    /// Prototype stages for a filter of the given order.
    ///
    /// Conjugate pairs come first, followed by the unpaired real pole when
    /// `order` is odd. All poles lie strictly in the left half-plane.
    pub fn prototype(self, order: usize) -> Vec<PrototypeStage> {
        match self {
            Characteristic::Butterworth => butterworth_prototype(order),
        }
    }
}

/// `order` poles evenly spaced on the left half of the unit circle,
/// `π / order` apart and symmetric about the negative real axis.
fn butterworth_prototype(order: usize) -> Vec<PrototypeStage> {
    let n = order as f64;
    let mut stages = Vec::with_capacity((order + 1) / 2);

    for k in 0..order / 2 {
        let theta = PI / 2.0 + PI * (2 * k + 1) as f64 / (2.0 * n);
        stages.push(PrototypeStage::Conjugate(Complex::from_polar(1.0, theta)));
    }
    if order % 2 == 1 {
        stages.push(PrototypeStage::Real(-1.0));
    }

    stages
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Characteristic {
    type Err = DspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Characteristic::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DspError::UnknownCharacteristic(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_poles(stages: &[PrototypeStage]) -> Vec<Complex<f64>> {
        stages
            .iter()
            .flat_map(|stage| match *stage {
                PrototypeStage::Real(p) => vec![Complex::new(p, 0.0)],
                PrototypeStage::Conjugate(p) => vec![p, p.conj()],
            })
            .collect()
    }

    #[test]
    fn test_pole_count_matches_order() {
        for order in 1..=12 {
            let stages = Characteristic::Butterworth.prototype(order);
            let poles: usize = stages.iter().map(PrototypeStage::order).sum();
            assert_eq!(poles, order);
            assert_eq!(stages.len(), (order + 1) / 2);
        }
    }

    #[test]
    fn test_odd_order_has_single_real_pole() {
        let stages = Characteristic::Butterworth.prototype(5);
        let reals = stages
            .iter()
            .filter(|s| matches!(s, PrototypeStage::Real(_)))
            .count();
        assert_eq!(reals, 1);
        assert_eq!(stages.last(), Some(&PrototypeStage::Real(-1.0)));
    }

    #[test]
    fn test_poles_on_left_unit_semicircle() {
        for order in 1..=10 {
            for pole in all_poles(&Characteristic::Butterworth.prototype(order)) {
                assert!((pole.norm() - 1.0).abs() < 1e-12);
                assert!(pole.re < 0.0, "pole {} not in left half-plane", pole);
            }
        }
    }

    #[test]
    fn test_second_order_is_classic_butterworth() {
        // Q = 1/sqrt(2): s^2 + sqrt(2) s + 1
        let stages = Characteristic::Butterworth.prototype(2);
        match stages[0] {
            PrototypeStage::Conjugate(p) => {
                assert!((-2.0 * p.re - std::f64::consts::SQRT_2).abs() < 1e-12);
            }
            other => panic!("expected a conjugate pair, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_characteristic() {
        assert_eq!(
            "butterworth".parse::<Characteristic>().unwrap(),
            Characteristic::Butterworth
        );
        assert_eq!(
            " Butterworth ".parse::<Characteristic>().unwrap(),
            Characteristic::Butterworth
        );
        assert!(matches!(
            "chebyshev".parse::<Characteristic>(),
            Err(DspError::UnknownCharacteristic(_))
        ));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Characteristic::Butterworth).unwrap();
        assert_eq!(json, "\"butterworth\"");
        let parsed: Characteristic = serde_json::from_str("\"Butterworth\"").unwrap();
        assert_eq!(parsed, Characteristic::Butterworth);
    }
}
