//! Bandpass Transform
//!
//! The boundary-facing operator: validate configuration once, build one
//! filter bank, then map every arriving frame through it. Usable as a
//! struct, as a [`FrameTransform`] trait object, or as a plain closure
//! dropped into any stream-processing loop.
//!
//! # Ordering Contract
//!
//! Frames must arrive one at a time, in stream order. A transform holds the
//! filter state of exactly one stream; independent streams each need their
//! own transform.

use tracing::info;

use crate::bank::ChannelFilterBank;
use crate::config::BandpassConfig;
use crate::error::FilterResult;
use crate::frame::Frame;

/// Trait for frame-to-frame operators in a processing pipeline
pub trait FrameTransform: Send {
    /// Transform one frame, advancing any internal state
    fn transform(&mut self, frame: Frame) -> FilterResult<Frame>;

    /// Human-readable name for debugging
    fn name(&self) -> &'static str;
}

/// Bandpass filter over every channel of a stream
#[derive(Debug)]
pub struct BandpassTransform {
    bank: ChannelFilterBank,
    config: BandpassConfig,
}

impl BandpassTransform {
    /// Validate `config` and build the filter bank.
    ///
    /// All configuration errors surface here; `apply` only ever fails on
    /// frames that do not fit the bank.
    pub fn new(config: BandpassConfig) -> FilterResult<Self> {
        let (nb_channels, spec) = config.validate()?;
        let bank = ChannelFilterBank::new(nb_channels, &spec)?;

        info!(
            "Bandpass filter ready: {} channels, {} order {}, {}-{}Hz at {}Hz",
            nb_channels,
            spec.characteristic,
            spec.order,
            spec.low(),
            spec.high(),
            spec.sample_rate
        );

        Ok(Self { bank, config })
    }

    #[inline]
    pub fn apply(&mut self, frame: Frame) -> FilterResult<Frame> {
        self.bank.apply(frame)
    }

    pub fn config(&self) -> &BandpassConfig {
        &self.config
    }

    pub fn bank(&self) -> &ChannelFilterBank {
        &self.bank
    }

    /// Consume the transform into a closure owning the filter bank
    pub fn into_fn(mut self) -> impl FnMut(Frame) -> FilterResult<Frame> + Send {
        move |frame| self.apply(frame)
    }
}

impl FrameTransform for BandpassTransform {
    fn transform(&mut self, frame: Frame) -> FilterResult<Frame> {
        self.apply(frame)
    }

    fn name(&self) -> &'static str {
        "Bandpass Filter"
    }
}

/// Build a bandpass transform as a plain `Frame -> Frame` function.
///
/// ```
/// use cortex_core::{bandpass_filter, BandpassConfig, Frame};
///
/// let mut filter = bandpass_filter(BandpassConfig::new(2)).unwrap();
/// let out = filter(Frame::from_samples(vec![0.5, -0.5])).unwrap();
/// assert_eq!(out.nb_channels(), 2);
/// ```
pub fn bandpass_filter(
    config: BandpassConfig,
) -> FilterResult<impl FnMut(Frame) -> FilterResult<Frame> + Send> {
    Ok(BandpassTransform::new(config)?.into_fn())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, FilterError};
    use crate::frame::ChannelData;
    use std::f64::consts::PI;

    #[test]
    fn test_missing_channel_count() {
        let err = BandpassTransform::new(BandpassConfig::default()).unwrap_err();
        assert_eq!(err, FilterError::Config(ConfigError::MissingChannelCount));
    }

    #[test]
    fn test_zero_channels() {
        let err = BandpassTransform::new(BandpassConfig::new(0)).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_cutoff_beyond_nyquist() {
        let err = BandpassTransform::new(BandpassConfig::new(4).with_cutoff_frequencies(2.0, 130.0))
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_wrong_frame_size() {
        let mut filter = bandpass_filter(BandpassConfig::new(4)).unwrap();
        let err = filter(Frame::from_samples(vec![1.0, 2.0, 3.0])).unwrap_err();
        assert!(err.is_frame_shape());
    }

    #[test]
    fn test_trait_object() {
        let mut transforms: Vec<Box<dyn FrameTransform>> =
            vec![Box::new(BandpassTransform::new(BandpassConfig::new(1)).unwrap())];

        let frame = Frame::from_samples(vec![1.0]).with_field("timestamp", 3);
        let out = transforms
            .iter_mut()
            .try_fold(frame, |frame, t| t.transform(frame))
            .unwrap();

        assert_eq!(transforms[0].name(), "Bandpass Filter");
        assert_eq!(out.fields["timestamp"], 3);
    }

    #[test]
    fn test_ten_hz_scenario() {
        // 2 channels, order 2, [2, 50]Hz at 250Hz, one second of a 10Hz sine
        let config = BandpassConfig::new(2)
            .with_order(2)
            .with_cutoff_frequencies(2.0, 50.0)
            .with_sample_rate(250.0);
        let mut transform = BandpassTransform::new(config).unwrap();

        let mut outputs: Vec<Vec<f64>> = vec![Vec::new(); 2];
        for n in 0..250 {
            let x = (2.0 * PI * 10.0 * n as f64 / 250.0).sin();
            let out = transform.apply(Frame::from_samples(vec![x, x])).unwrap();
            for (channel, data) in out.data.iter().enumerate() {
                match data {
                    ChannelData::Sample(y) => outputs[channel].push(*y),
                    other => panic!("expected sample, got {:?}", other),
                }
            }
        }

        for channel in &outputs {
            // Skip the 50-sample settling window; the remaining 200 samples
            // are exactly 8 periods
            let settled = &channel[50..];
            let mean_square = settled.iter().map(|y| y * y).sum::<f64>() / settled.len() as f64;
            let amplitude = (2.0 * mean_square).sqrt();
            assert!(
                (amplitude - 1.0).abs() < 0.05,
                "steady-state amplitude {}",
                amplitude
            );
        }
        assert_eq!(outputs[0], outputs[1]);
    }

    #[test]
    fn test_chunks_and_samples_agree() {
        let signal: Vec<f64> = (0..100).map(|n| (n as f64 * 0.3).sin() + 0.4).collect();

        let mut by_sample = BandpassTransform::new(BandpassConfig::new(1)).unwrap();
        let mut by_chunk = BandpassTransform::new(BandpassConfig::new(1)).unwrap();

        let mut expected = Vec::new();
        for &x in &signal {
            if let ChannelData::Sample(y) = by_sample.apply(Frame::from_samples(vec![x])).unwrap().data[0] {
                expected.push(y);
            }
        }

        let out = by_chunk
            .apply(Frame::from_chunks(vec![signal.clone()]))
            .unwrap();
        assert_eq!(out.data[0], ChannelData::Chunk(expected));
    }
}
