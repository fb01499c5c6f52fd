//! DSP Error Types

use thiserror::Error;

/// Errors that can occur while designing or analysing a filter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DspError {
    #[error("Invalid filter order: {0} (must be at least 1)")]
    InvalidOrder(usize),

    #[error("Sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),

    #[error("Invalid cutoff frequency {frequency}Hz at sample rate {sample_rate}Hz (must be in (0, {nyquist}))", nyquist = .sample_rate / 2.0)]
    InvalidCutoff { frequency: f64, sample_rate: f64 },

    #[error("Bandwidth must be positive and finite, got {0}")]
    InvalidBandwidth(f64),

    #[error("Gain must be finite, got {0}dB")]
    InvalidGain(f64),

    #[error("Unknown filter characteristic: '{0}'")]
    UnknownCharacteristic(String),

    #[error("Response resolution must be at least 2 points, got {0}")]
    InvalidResolution(usize),

    #[error("Section {section} is numerically unstable (pole magnitude {magnitude})")]
    NumericInstability { section: usize, magnitude: f64 },
}

impl DspError {
    /// Whether this error comes from rejected input parameters rather than
    /// from the numerics of an otherwise valid design.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, DspError::NumericInstability { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DspError::InvalidOrder(0);
        assert!(err.to_string().contains('0'));

        let err = DspError::InvalidCutoff {
            frequency: 130.0,
            sample_rate: 250.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("130"));
        assert!(msg.contains("125"), "should name the Nyquist limit: {}", msg);
    }

    #[test]
    fn test_configuration_classification() {
        assert!(DspError::InvalidOrder(0).is_configuration());
        assert!(DspError::UnknownCharacteristic("bessel".into()).is_configuration());
        assert!(!DspError::NumericInstability {
            section: 0,
            magnitude: 1.2
        }
        .is_configuration());
    }
}
