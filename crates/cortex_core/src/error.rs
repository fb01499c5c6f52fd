//! Filter Error Types

use thiserror::Error;

use cortex_dsp::DspError;

/// Configuration rejected at construction time
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Please supply the nbChannels parameter to the bandpass filter")]
    MissingChannelCount,

    #[error("Invalid channel count: {0} (must be at least 1)")]
    InvalidChannelCount(usize),

    #[error("Invalid cutoff frequencies [{low}, {high}]: low cutoff must be below high cutoff")]
    InvalidCutoffOrder { low: f64, high: f64 },
}

/// Frame that does not fit the bank it was applied to
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameShapeError {
    #[error("Channel count mismatch: expected {expected}, got {got}")]
    ChannelCountMismatch { expected: usize, got: usize },

    #[error("Channel {channel} does not match the sample/chunk shape of channel 0")]
    MixedShapes { channel: usize },
}

/// Errors surfaced by the bandpass stage
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Frame shape error: {0}")]
    FrameShape(#[from] FrameShapeError),

    #[error("DSP error: {0}")]
    Dsp(#[from] DspError),
}

impl FilterError {
    /// Missing or invalid construction parameters
    pub fn is_configuration(&self) -> bool {
        match self {
            FilterError::Config(_) => true,
            FilterError::Dsp(e) => e.is_configuration(),
            FilterError::FrameShape(_) => false,
        }
    }

    pub fn is_frame_shape(&self) -> bool {
        matches!(self, FilterError::FrameShape(_))
    }

    /// Designed coefficients were non-finite or unstable
    pub fn is_numeric(&self) -> bool {
        matches!(self, FilterError::Dsp(e) if !e.is_configuration())
    }
}

/// Result type alias for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
