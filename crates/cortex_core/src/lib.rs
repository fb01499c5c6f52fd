//! Cortex Core - Streaming Bandpass Stage
//!
//! This crate turns the filter engine of `cortex_dsp` into a multichannel
//! stream operator for biosignals such as EEG:
//! - Configuration with defaults and JSON (camelCase) support
//! - Frames carrying one sample or one chunk per channel, plus arbitrary
//!   pass-through fields
//! - A per-channel bank of highpass → lowpass cascades
//! - A `Frame -> Frame` transform for any stream-processing loop
//!
//! # Architecture
//!
//! ```text
//! BandpassConfig ──validate──▶ BandSpec ──design──▶ ChannelFilterBank
//!                                                        │
//!   Frame ──▶ BandpassTransform::apply ──▶ bank.apply ───┴──▶ Frame
//!                    (one ChannelFilter per channel, state kept between frames)
//! ```
//!
//! Logging goes through `tracing`; installing a subscriber is up to the
//! embedding application.

mod bank;
mod config;
pub mod defaults;
mod error;
mod frame;
mod transform;

pub use bank::{ChannelFilter, ChannelFilterBank};
pub use config::{BandSpec, BandpassConfig};
pub use error::{ConfigError, FilterError, FilterResult, FrameShapeError};
pub use frame::{ChannelData, Frame, FrameShape};
pub use transform::{bandpass_filter, BandpassTransform, FrameTransform};

// Re-export DSP types for convenience
pub use cortex_dsp::{BiquadCascadeFilter, BiquadSection, Characteristic, DspError, FilterSpec, PassKind};
