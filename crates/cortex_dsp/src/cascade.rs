//! Cascaded Biquad Evaluator
//!
//! Runs samples through an ordered list of second-order sections, each with
//! its own Direct Form II Transposed delay line:
//!
//! ```text
//! y  = b0·x + z1
//! z1 = b1·x + z2 − a1·y
//! z2 = b2·x − a2·y
//! ```
//!
//! Delay-line state survives across calls, so a stream split into arbitrary
//! chunks produces exactly the output of the unsplit stream.

use std::fmt;

use biquad::{Biquad, DirectForm2Transposed};

use crate::design::{design, FilterSpec, PassKind};
use crate::error::DspError;
use crate::section::BiquadSection;

/// A designed IIR filter together with its running state
pub struct BiquadCascadeFilter {
    sections: Vec<BiquadSection>,
    // One delay line per section, never shared
    stages: Vec<DirectForm2Transposed<f64>>,
}

impl BiquadCascadeFilter {
    /// Create a cascade with zeroed delay lines
    pub fn new(sections: Vec<BiquadSection>) -> Self {
        let stages = sections
            .iter()
            .map(|s| DirectForm2Transposed::<f64>::new(s.to_coefficients()))
            .collect();
        Self { sections, stages }
    }

    /// Design and build a cascade in one step
    pub fn design(kind: PassKind, spec: &FilterSpec) -> Result<Self, DspError> {
        Ok(Self::new(design(kind, spec)?))
    }

    /// Process one sample through every section in order
    #[inline]
    pub fn single_step(&mut self, input: f64) -> f64 {
        self.stages
            .iter_mut()
            .fold(input, |x, stage| stage.run(x))
    }

    /// Process a chunk, returning a new buffer of the same length
    pub fn multi_step(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.single_step(x)).collect()
    }

    /// Process a chunk in place
    #[inline]
    pub fn process_in_place(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.single_step(*sample);
        }
    }

    /// Run `input` through a fresh copy of this filter.
    ///
    /// The delay lines of `self` are left untouched.
    pub fn simulate(&self, input: &[f64]) -> Vec<f64> {
        Self::new(self.sections.clone()).multi_step(input)
    }

    /// Clear every delay line.
    ///
    /// Never called implicitly; streaming callers that want a clean start
    /// must ask for it.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset_state();
        }
    }

    pub fn sections(&self) -> &[BiquadSection] {
        &self.sections
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn is_stable(&self) -> bool {
        self.sections.iter().all(BiquadSection::is_stable)
    }
}

impl fmt::Debug for BiquadCascadeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BiquadCascadeFilter")
            .field("sections", &self.sections)
            .finish_non_exhaustive()
    }
}
