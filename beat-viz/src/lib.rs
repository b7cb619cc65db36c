#![cfg_attr(not(feature = "std"), no_std)]
//! Value-level shaping of audio features: sub-band statistics, rate limited
//! controllers, the consumers that react to them and a radial bar meter.
extern crate alloc;

pub mod band_group;
pub mod color_strategy;
pub mod config;
pub mod consumer;
pub mod pipeline;
pub mod radial_bars;
pub mod reactive_value;
pub mod renderer;
pub mod stats;
pub mod sub_band;

pub use band_group::{BandGroup, BandGroupConfig, DataSource};
pub use config::PipelineConfig;
pub use consumer::{
    ControllerSource, PropertyModifier, PropertyRange, ReactiveConsumer, Trigger, TriggerAction,
    TriggerType, ValueUpdate,
};
pub use pipeline::{AnalysisMetric, Controller, Pipeline, ValueSource};
pub use radial_bars::{average_chunks, RadialBars, RadialElement};
pub use reactive_value::{RateLimits, ReactiveValue};
pub use renderer::{RadialBarRenderer, Renderer};
pub use stats::{StatKind, StatSnapshot, Summary, Tracked};
pub use sub_band::SubBand;
