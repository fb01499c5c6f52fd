//! Frequency Response Analysis
//!
//! Two views of what a designed cascade does to a sinusoid:
//! - [`response_point`] evaluates `H(e^{jω})` directly from the coefficients,
//! - [`magnitude_response`] takes the FFT of the simulated impulse response,
//!   giving the magnitude on an evenly spaced grid from DC to Nyquist.
//!
//! Neither touches the running state of the filter being analysed.

use std::f64::consts::PI;

use rustfft::{num_complex::Complex, FftPlanner};

use crate::cascade::BiquadCascadeFilter;
use crate::error::DspError;
use crate::section::BiquadSection;

/// Response of a filter at one frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsePoint {
    pub frequency: f64,
    /// Linear magnitude
    pub magnitude: f64,
    /// Phase in radians
    pub phase: f64,
}

impl ResponsePoint {
    pub fn magnitude_db(&self) -> f64 {
        20.0 * self.magnitude.max(1e-300).log10()
    }
}

/// Evaluate the product of all section responses at `frequency` Hz
pub fn response_point(sections: &[BiquadSection], frequency: f64, sample_rate: f64) -> ResponsePoint {
    let omega = 2.0 * PI * frequency / sample_rate;
    let h = sections
        .iter()
        .fold(Complex::new(1.0, 0.0), |acc, s| acc * s.response(omega));

    ResponsePoint {
        frequency,
        magnitude: h.norm(),
        phase: h.arg(),
    }
}

/// One bin of an FFT-derived magnitude response
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseBin {
    pub frequency: f64,
    pub magnitude: f64,
}

/// Magnitude response from the FFT of `fft_size` impulse-response samples.
///
/// Returns `fft_size / 2 + 1` bins covering DC to Nyquist. The impulse
/// response is truncated at `fft_size`, so very low cutoffs need a larger
/// size to resolve accurately.
pub fn magnitude_response(
    filter: &BiquadCascadeFilter,
    sample_rate: f64,
    fft_size: usize,
) -> Result<Vec<ResponseBin>, DspError> {
    if fft_size < 2 {
        return Err(DspError::InvalidResolution(fft_size));
    }
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(DspError::InvalidSampleRate(sample_rate));
    }

    let mut impulse = vec![0.0; fft_size];
    impulse[0] = 1.0;
    let mut buffer: Vec<Complex<f64>> = filter
        .simulate(&impulse)
        .into_iter()
        .map(|x| Complex::new(x, 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(fft_size);
    fft.process(&mut buffer);

    // Only the first half is meaningful for a real impulse response
    let bin_width = sample_rate / fft_size as f64;
    Ok(buffer[..=fft_size / 2]
        .iter()
        .enumerate()
        .map(|(i, c)| ResponseBin {
            frequency: i as f64 * bin_width,
            magnitude: c.norm(),
        })
        .collect())
}
