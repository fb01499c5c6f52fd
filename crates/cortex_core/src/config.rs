//! Bandpass Configuration

use serde::{Deserialize, Serialize};

use cortex_dsp::{Characteristic, FilterSpec, PassKind};

use crate::defaults;
use crate::error::{ConfigError, FilterResult};

/// External configuration of the bandpass stage
///
/// Deserializes from camelCase JSON; every field but `nbChannels` is
/// optional and falls back to [`crate::defaults`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandpassConfig {
    /// Required; `None` is rejected at construction
    #[serde(default)]
    pub nb_channels: Option<usize>,

    #[serde(default = "default_order")]
    pub order: usize,

    #[serde(default)]
    pub characteristic: Characteristic,

    /// `[low, high]`: highpass cutoff then lowpass cutoff, in Hz
    #[serde(default = "default_cutoff_frequencies")]
    pub cutoff_frequencies: [f64; 2],

    #[serde(
        default = "default_sample_rate",
        alias = "samplingRate",
        alias = "Fs"
    )]
    pub sample_rate: f64,

    #[serde(default = "default_bandwidth", alias = "BW")]
    pub bandwidth: f64,

    #[serde(default, alias = "gain")]
    pub gain_db: f64,
}

fn default_order() -> usize {
    defaults::ORDER
}

fn default_cutoff_frequencies() -> [f64; 2] {
    defaults::CUTOFF_FREQUENCIES
}

fn default_sample_rate() -> f64 {
    defaults::SAMPLE_RATE
}

fn default_bandwidth() -> f64 {
    defaults::BANDWIDTH
}

impl Default for BandpassConfig {
    fn default() -> Self {
        Self {
            nb_channels: None,
            order: defaults::ORDER,
            characteristic: defaults::CHARACTERISTIC,
            cutoff_frequencies: defaults::CUTOFF_FREQUENCIES,
            sample_rate: defaults::SAMPLE_RATE,
            bandwidth: defaults::BANDWIDTH,
            gain_db: defaults::GAIN_DB,
        }
    }
}

impl BandpassConfig {
    /// Default configuration for `nb_channels` channels
    pub fn new(nb_channels: usize) -> Self {
        Self {
            nb_channels: Some(nb_channels),
            ..Default::default()
        }
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn with_characteristic(mut self, characteristic: Characteristic) -> Self {
        self.characteristic = characteristic;
        self
    }

    pub fn with_cutoff_frequencies(mut self, low: f64, high: f64) -> Self {
        self.cutoff_frequencies = [low, high];
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_bandwidth(mut self, bandwidth: f64) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    pub fn with_gain_db(mut self, gain_db: f64) -> Self {
        self.gain_db = gain_db;
        self
    }

    /// Check the parameters this layer owns and split them into a channel
    /// count and a band design.
    ///
    /// Per-cutoff checks (order, Nyquist, sample rate) happen when the band
    /// is designed.
    pub fn validate(&self) -> FilterResult<(usize, BandSpec)> {
        let nb_channels = self.nb_channels.ok_or(ConfigError::MissingChannelCount)?;
        if nb_channels == 0 {
            return Err(ConfigError::InvalidChannelCount(nb_channels).into());
        }

        let band = BandSpec {
            characteristic: self.characteristic,
            order: self.order,
            cutoff_frequencies: self.cutoff_frequencies,
            sample_rate: self.sample_rate,
            bandwidth: self.bandwidth,
            gain_db: self.gain_db,
        };
        band.validate()?;

        Ok((nb_channels, band))
    }
}

/// Design parameters shared by every channel of a bank
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandSpec {
    pub characteristic: Characteristic,
    pub order: usize,
    /// `[low, high]` in Hz
    pub cutoff_frequencies: [f64; 2],
    pub sample_rate: f64,
    pub bandwidth: f64,
    pub gain_db: f64,
}

impl BandSpec {
    pub fn low(&self) -> f64 {
        self.cutoff_frequencies[0]
    }

    pub fn high(&self) -> f64 {
        self.cutoff_frequencies[1]
    }

    /// Cutoffs must be strictly ordered (NaN is rejected too)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [low, high] = self.cutoff_frequencies;
        if !(low < high) {
            return Err(ConfigError::InvalidCutoffOrder { low, high });
        }
        Ok(())
    }

    /// Single-cutoff design for one side of the band.
    ///
    /// The highpass removes content below `low`, the lowpass content
    /// above `high`.
    pub fn filter_spec(&self, kind: PassKind) -> FilterSpec {
        let cutoff = match kind {
            PassKind::Highpass => self.low(),
            PassKind::Lowpass => self.high(),
        };
        FilterSpec::new(self.characteristic, self.order, cutoff, self.sample_rate)
            .with_bandwidth(self.bandwidth)
            .with_gain_db(self.gain_db)
    }
}
