//! DSP primitives for the FreeQ equalizer.
//!
//! The crate provides the biquad filter designs used by the plugin (one per
//! [`FilterKind`]), the per-sample processing state, a complex-valued
//! frequency response readout, and the non-interleaved buffer types shared
//! with the processor and its tests.

pub mod biquad;
pub mod buffer;
pub mod utils;

pub use biquad::{BiquadCoeffs, BiquadState, FilterKind};
pub use buffer::{AudioBuffer, BufferConfig, ChannelLayout};
