//! Per-Channel Filter Bank
//!
//! Each channel owns an independent highpass and lowpass cascade run in
//! series. Together they form the passband:
//!
//! ```text
//! channel i ──▶ highpass[i] (cut < low) ──▶ lowpass[i] (cut > high) ──▶
//! ```
//!
//! This is a deliberate approximation of a bandpass filter. The two sides are
//! designed independently, so phase and the shape near each band edge differ
//! from a true band design, and a narrow band loses more than 3dB at its
//! edges where the two roll-offs overlap.

use tracing::{debug, warn};

use cortex_dsp::{BiquadCascadeFilter, PassKind};

use crate::config::BandSpec;
use crate::error::{ConfigError, FilterResult, FrameShapeError};
use crate::frame::{ChannelData, Frame};

/// Highpass followed by lowpass for a single channel
#[derive(Debug)]
pub struct ChannelFilter {
    highpass: BiquadCascadeFilter,
    lowpass: BiquadCascadeFilter,
}

impl ChannelFilter {
    pub fn new(spec: &BandSpec) -> FilterResult<Self> {
        Ok(Self {
            highpass: design_side(PassKind::Highpass, spec)?,
            lowpass: design_side(PassKind::Lowpass, spec)?,
        })
    }

    #[inline]
    pub fn single_step(&mut self, input: f64) -> f64 {
        self.lowpass.single_step(self.highpass.single_step(input))
    }

    pub fn multi_step(&mut self, input: &[f64]) -> Vec<f64> {
        let mut buffer = input.to_vec();
        self.process_in_place(&mut buffer);
        buffer
    }

    /// Both cascades are linear and keep separate state, so filtering the
    /// whole chunk through one and then the other equals interleaving them
    /// sample by sample.
    #[inline]
    pub fn process_in_place(&mut self, buffer: &mut [f64]) {
        self.highpass.process_in_place(buffer);
        self.lowpass.process_in_place(buffer);
    }

    pub fn highpass(&self) -> &BiquadCascadeFilter {
        &self.highpass
    }

    pub fn lowpass(&self) -> &BiquadCascadeFilter {
        &self.lowpass
    }
}

fn design_side(kind: PassKind, spec: &BandSpec) -> FilterResult<BiquadCascadeFilter> {
    let filter_spec = spec.filter_spec(kind);
    let filter = BiquadCascadeFilter::design(kind, &filter_spec)?;
    debug!(
        "Designed {} {} at {}Hz: {} sections",
        filter_spec.characteristic,
        kind,
        filter_spec.cutoff_frequency,
        filter.len()
    );
    Ok(filter)
}

/// Fixed-size collection of per-channel filters, addressed by channel index
#[derive(Debug)]
pub struct ChannelFilterBank {
    channels: Vec<ChannelFilter>,
    spec: BandSpec,
}

impl ChannelFilterBank {
    /// Build a bank with zeroed state.
    ///
    /// There is no reset: a clean restart means building a new bank.
    pub fn new(nb_channels: usize, spec: &BandSpec) -> FilterResult<Self> {
        if nb_channels == 0 {
            return Err(ConfigError::InvalidChannelCount(nb_channels).into());
        }
        spec.validate()?;

        // Every channel gets the same coefficients, so design once and
        // replicate the sections into fresh delay lines.
        let template = ChannelFilter::new(spec)?;
        let mut channels = Vec::with_capacity(nb_channels);
        for _ in 1..nb_channels {
            channels.push(ChannelFilter {
                highpass: BiquadCascadeFilter::new(template.highpass.sections().to_vec()),
                lowpass: BiquadCascadeFilter::new(template.lowpass.sections().to_vec()),
            });
        }
        channels.push(template);

        Ok(Self {
            channels,
            spec: *spec,
        })
    }

    pub fn nb_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn spec(&self) -> &BandSpec {
        &self.spec
    }

    pub fn channel(&self, index: usize) -> Option<&ChannelFilter> {
        self.channels.get(index)
    }

    /// Filter a frame, inferring sample vs chunk mode from channel 0.
    ///
    /// The frame is checked completely before any filter state changes, so
    /// a rejected frame leaves the bank exactly as it was.
    pub fn apply(&mut self, mut frame: Frame) -> FilterResult<Frame> {
        self.check_channel_count(frame.data.len())?;

        if let Some(shape) = frame.shape() {
            if let Some(channel) = frame.data.iter().position(|c| c.shape() != shape) {
                warn!(
                    "Rejecting frame: channel {} does not match shape {:?} of channel 0",
                    channel, shape
                );
                return Err(FrameShapeError::MixedShapes { channel }.into());
            }
        }

        for (filter, data) in self.channels.iter_mut().zip(frame.data.iter_mut()) {
            match data {
                ChannelData::Sample(x) => *x = filter.single_step(*x),
                ChannelData::Chunk(chunk) => filter.process_in_place(chunk),
            }
        }

        Ok(frame)
    }

    /// Filter one sample per channel, in place
    pub fn apply_samples(&mut self, samples: &mut [f64]) -> FilterResult<()> {
        self.check_channel_count(samples.len())?;
        for (filter, x) in self.channels.iter_mut().zip(samples.iter_mut()) {
            *x = filter.single_step(*x);
        }
        Ok(())
    }

    /// Filter one chunk per channel, in place
    pub fn apply_chunks(&mut self, chunks: &mut [Vec<f64>]) -> FilterResult<()> {
        self.check_channel_count(chunks.len())?;
        for (filter, chunk) in self.channels.iter_mut().zip(chunks.iter_mut()) {
            filter.process_in_place(chunk);
        }
        Ok(())
    }

    fn check_channel_count(&self, got: usize) -> FilterResult<()> {
        let expected = self.channels.len();
        if got != expected {
            warn!(
                "Rejecting frame: expected {} channels, got {}",
                expected, got
            );
            return Err(FrameShapeError::ChannelCountMismatch { expected, got }.into());
        }
        Ok(())
    }
}
