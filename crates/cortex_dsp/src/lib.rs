//! Cortex DSP - IIR Filter Engine
//!
//! This crate provides the numeric core of the Cortex bandpass stage:
//! - Butterworth coefficient design (pole placement, pre-warp, bilinear transform)
//! - Cascaded biquad evaluation with per-section delay lines
//! - Frequency response analysis of designed filters
//!
//! # Architecture
//!
//! ```text
//! Characteristic ──poles──▶ design() ──sections──▶ BiquadCascadeFilter
//!                                                      │
//!                                   single_step / multi_step (stateful)
//! ```
//!
//! Design is pure and runs once; evaluation is allocation-free per sample
//! and carries its state across calls.

mod cascade;
mod characteristic;
mod design;
mod error;
mod response;
mod section;

pub use cascade::BiquadCascadeFilter;
pub use characteristic::{Characteristic, PrototypeStage};
pub use design::{design, prewarp, FilterSpec, PassKind};
pub use error::DspError;
pub use response::{magnitude_response, response_point, ResponseBin, ResponsePoint};
pub use section::BiquadSection;
