#![cfg_attr(not(feature = "std"), no_std)]
//! Signal-level building blocks for audio reactive visuals.
//!
//! Everything here is a pure transform over caller-owned buffers: the host
//! fills a raw sample buffer and a magnitude spectrum of the same window size
//! each frame and hands them in.

#[cfg(feature = "logging")]
use defmt_rtt as _;

#[cfg(feature = "logging")]
#[doc(hidden)]
pub use defmt as __defmt;

#[macro_use]
mod fmt;

pub mod analyzer;
pub mod channel;
pub mod error;
pub mod fft;
pub mod range;
pub mod window;

pub use analyzer::{Analysis, SpectrumAnalyzer, DECIBEL_FLOOR, REFERENCE_LEVEL};
pub use channel::Channel;
pub use error::{Error, Result};
pub use fft::{magnitude_spectrum, normalize_sample, normalize_samples};
pub use range::{convert_between_ranges, validate_range};
pub use window::{FftWindow, WindowSize};
