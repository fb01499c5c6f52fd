//! IIR Coefficient Design
//!
//! Turns a [`FilterSpec`] into an ordered list of normalized biquad sections:
//!
//! 1. the characteristic places the normalized analog prototype poles,
//! 2. the cutoff is pre-warped to `Ωc = 2·fs·tan(π·fc/fs)`,
//! 3. each prototype stage is scaled to `Ωc` as a lowpass (`s → s/Ωc`) or
//!    highpass (`s → Ωc/s`) section with unity passband gain,
//! 4. the bilinear transform `s = 2·fs·(1 − z⁻¹)/(1 + z⁻¹)` maps every
//!    analog section to a digital biquad.
//!
//! Steps 2-4 do not depend on the characteristic.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::characteristic::{Characteristic, PrototypeStage};
use crate::error::DspError;
use crate::section::BiquadSection;

/// Which side of the cutoff is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassKind {
    Highpass,
    Lowpass,
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassKind::Highpass => f.write_str("highpass"),
            PassKind::Lowpass => f.write_str("lowpass"),
        }
    }
}

/// Parameters of a single highpass or lowpass design
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    pub characteristic: Characteristic,
    /// Filter order (number of poles)
    pub order: usize,
    /// Cutoff frequency in Hz
    pub cutoff_frequency: f64,
    /// Sample rate in Hz
    pub sample_rate: f64,
    /// Transition shape parameter; Butterworth designs do not use it
    pub bandwidth: f64,
    /// Passband gain in dB
    pub gain_db: f64,
}

impl FilterSpec {
    pub fn new(
        characteristic: Characteristic,
        order: usize,
        cutoff_frequency: f64,
        sample_rate: f64,
    ) -> Self {
        Self {
            characteristic,
            order,
            cutoff_frequency,
            sample_rate,
            bandwidth: 1.0,
            gain_db: 0.0,
        }
    }

    /// Butterworth spec with unity bandwidth and 0dB gain
    pub fn butterworth(order: usize, cutoff_frequency: f64, sample_rate: f64) -> Self {
        Self::new(Characteristic::Butterworth, order, cutoff_frequency, sample_rate)
    }

    pub fn with_bandwidth(mut self, bandwidth: f64) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    pub fn with_gain_db(mut self, gain_db: f64) -> Self {
        self.gain_db = gain_db;
        self
    }

    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// Number of biquad sections this spec designs into
    pub fn section_count(&self) -> usize {
        (self.order + 1) / 2
    }

    pub fn validate(&self) -> Result<(), DspError> {
        if self.order < 1 {
            return Err(DspError::InvalidOrder(self.order));
        }
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(DspError::InvalidSampleRate(self.sample_rate));
        }
        // Written so that NaN fails the check
        if !(self.cutoff_frequency > 0.0 && self.cutoff_frequency < self.nyquist()) {
            return Err(DspError::InvalidCutoff {
                frequency: self.cutoff_frequency,
                sample_rate: self.sample_rate,
            });
        }
        if !(self.bandwidth.is_finite() && self.bandwidth > 0.0) {
            return Err(DspError::InvalidBandwidth(self.bandwidth));
        }
        if !self.gain_db.is_finite() {
            return Err(DspError::InvalidGain(self.gain_db));
        }
        Ok(())
    }
}

/// Analog section in ascending powers of `s`
#[derive(Debug, Clone, Copy, PartialEq)]
enum AnalogSection {
    /// `(b[0] + b[1]·s) / (a[0] + a[1]·s)`
    First { b: [f64; 2], a: [f64; 2] },
    /// `(b[0] + b[1]·s + b[2]·s²) / (a[0] + a[1]·s + a[2]·s²)`
    Second { b: [f64; 3], a: [f64; 3] },
}

/// Design the digital sections for `kind` at `spec`.
///
/// Rejects invalid specs, and guards the result: every coefficient must be
/// finite and every pole strictly inside the unit circle.
pub fn design(kind: PassKind, spec: &FilterSpec) -> Result<Vec<BiquadSection>, DspError> {
    spec.validate()?;

    let warped = prewarp(spec.cutoff_frequency, spec.sample_rate);
    let k = 2.0 * spec.sample_rate;

    let mut sections: Vec<BiquadSection> = spec
        .characteristic
        .prototype(spec.order)
        .into_iter()
        .map(|stage| bilinear(scale_stage(stage, kind, warped), k))
        .collect();

    if spec.gain_db != 0.0 {
        if let Some(first) = sections.first_mut() {
            *first = first.with_gain(db_to_amplitude(spec.gain_db));
        }
    }

    check_stability(&sections)?;
    Ok(sections)
}

/// Analog angular cutoff that lands on `cutoff` Hz after the bilinear transform
pub fn prewarp(cutoff: f64, sample_rate: f64) -> f64 {
    2.0 * sample_rate * (PI * cutoff / sample_rate).tan()
}

/// Convert dB gain to linear amplitude
/// Formula: amplitude = 10^(dB/20)
fn db_to_amplitude(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

fn scale_stage(stage: PrototypeStage, kind: PassKind, wc: f64) -> AnalogSection {
    match (stage, kind) {
        // s/Ωc - p  →  s - p·Ωc
        (PrototypeStage::Real(p), PassKind::Lowpass) => AnalogSection::First {
            b: [-p * wc, 0.0],
            a: [-p * wc, 1.0],
        },
        // Ωc/s - p  →  Ωc - p·s
        (PrototypeStage::Real(p), PassKind::Highpass) => AnalogSection::First {
            b: [0.0, -p],
            a: [wc, -p],
        },
        (PrototypeStage::Conjugate(p), PassKind::Lowpass) => {
            let m2 = p.norm_sqr();
            AnalogSection::Second {
                b: [m2 * wc * wc, 0.0, 0.0],
                a: [m2 * wc * wc, -2.0 * p.re * wc, 1.0],
            }
        }
        (PrototypeStage::Conjugate(p), PassKind::Highpass) => {
            let m2 = p.norm_sqr();
            AnalogSection::Second {
                b: [0.0, 0.0, m2],
                a: [wc * wc, -2.0 * p.re * wc, m2],
            }
        }
    }
}

/// Bilinear transform with `s = k·(1 − z⁻¹)/(1 + z⁻¹)`, normalized to a0 = 1
fn bilinear(section: AnalogSection, k: f64) -> BiquadSection {
    match section {
        AnalogSection::First { b, a } => {
            let a0 = a[1] * k + a[0];
            BiquadSection {
                b0: (b[1] * k + b[0]) / a0,
                b1: (b[0] - b[1] * k) / a0,
                b2: 0.0,
                a1: (a[0] - a[1] * k) / a0,
                a2: 0.0,
            }
        }
        AnalogSection::Second { b, a } => {
            let k2 = k * k;
            let a0 = a[2] * k2 + a[1] * k + a[0];
            BiquadSection {
                b0: (b[2] * k2 + b[1] * k + b[0]) / a0,
                b1: 2.0 * (b[0] - b[2] * k2) / a0,
                b2: (b[2] * k2 - b[1] * k + b[0]) / a0,
                a1: 2.0 * (a[0] - a[2] * k2) / a0,
                a2: (a[2] * k2 - a[1] * k + a[0]) / a0,
            }
        }
    }
}

fn check_stability(sections: &[BiquadSection]) -> Result<(), DspError> {
    for (index, section) in sections.iter().enumerate() {
        if !section.is_stable() {
            return Err(DspError::NumericInstability {
                section: index,
                magnitude: section.max_pole_magnitude(),
            });
        }
    }
    Ok(())
}
