//! Default Stream Parameters

use cortex_dsp::Characteristic;

/// Channel count of the reference headset
pub const CHANNELS: usize = 4;

/// Sample rate in Hz
pub const SAMPLE_RATE: f64 = 250.0;

/// Filter order of each highpass/lowpass cascade
pub const ORDER: usize = 2;

pub const CHARACTERISTIC: Characteristic = Characteristic::Butterworth;

/// Passband gain in dB
pub const GAIN_DB: f64 = 0.0;

pub const BANDWIDTH: f64 = 1.0;

/// `[highpass, lowpass]` cutoffs in Hz
pub const CUTOFF_FREQUENCIES: [f64; 2] = [2.0, 50.0];
