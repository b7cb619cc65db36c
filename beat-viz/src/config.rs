use beat_dsp::{Channel, Error, FftWindow, Result, WindowSize};

// --- Capture ---
pub const DEFAULT_WINDOW: WindowSize = WindowSize::W1024;
pub const DEFAULT_CHANNEL: Channel = Channel::Left;
pub const DEFAULT_FFT_WINDOW: FftWindow = FftWindow::Hamming;
pub const DEFAULT_SAMPLE_RATE_HZ: f32 = 48_000.0;

// --- Band groups ---
pub const DEFAULT_SUB_BAND_COUNT: usize = 5;
pub const DEFAULT_START_INDEX: usize = 0;
pub const DEFAULT_END_INDEX: usize = 256; // inclusive
pub const DEFAULT_BOOST: f32 = 1.0;
pub const DEFAULT_CUTOFF: f32 = 1.0;
pub const MIN_GAIN: f32 = 0.001; // shared bounds for boost and cutoff
pub const MAX_GAIN: f32 = 10_000.0;

// --- Reactive values ---
pub const DEFAULT_INCREASE_RATE: Option<f32> = None; // unlimited
pub const DEFAULT_DECREASE_RATE: Option<f32> = Some(1.0); // units per second
pub const MIN_RATE: f32 = 0.000_01;
pub const MAX_RATE: f32 = 10_000.0;
pub const MIN_DELTA_TIME: f32 = 0.000_1; // normalization clamp, seconds
pub const MAX_DELTA_TIME: f32 = 0.5;
pub const REFERENCE_FRAME_RATE: f32 = 60.0;
pub const INITIAL_MIN_VALUE: f32 = 0.0;
pub const INITIAL_MAX_VALUE: f32 = 1.0;

// --- Triggers ---
pub const DEFAULT_TRIGGER_THRESHOLD: f32 = 0.1;
pub const MIN_TRIGGER_THRESHOLD: f32 = 0.000_1;
pub const MAX_TRIGGER_THRESHOLD: f32 = 10_000.0;
pub const DEFAULT_REACTIVATE_DELAY: f32 = 0.25; // seconds
pub const MAX_REACTIVATE_DELAY: f32 = 10_000.0;

// --- Radial bars ---
pub const DEFAULT_ELEMENT_COUNT: usize = 64;
pub const DEFAULT_RADIUS: f32 = 10.0;
pub const DEFAULT_VISUAL_MODIFIER: f32 = 50.0;
pub const DEFAULT_MAX_VISUAL_SCALE: f32 = 25.0;
pub const DEFAULT_SMOOTH_SPEED: f32 = 10.0; // scale units per second
pub const DEFAULT_KEEP_FRACTION: f32 = 0.5;

// --- Level pulse ---
pub const DECIBELS_PER_INTENSITY: f32 = 40.0;

/// Per-frame capture settings shared by the analyzer and the host's audio
/// collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub window: WindowSize,
    pub channel: Channel,
    /// Only carried for the host's FFT; analysis never reads it.
    pub fft_window: FftWindow,
    pub sample_rate: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            channel: DEFAULT_CHANNEL,
            fft_window: DEFAULT_FFT_WINDOW,
            sample_rate: DEFAULT_SAMPLE_RATE_HZ,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(Error::config("sample_rate", "must be a positive number of Hz"));
        }
        Ok(())
    }
}
