use libm::{log10f, sqrtf};

use crate::error::{Error, Result};
use crate::window::WindowSize;

/// RMS level that maps to 0 dB.
pub const REFERENCE_LEVEL: f32 = 0.1;
/// Lowest decibel value ever reported.
pub const DECIBEL_FLOOR: f32 = -160.0;

/// Scalar features of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct Analysis {
    pub rms: f32,
    pub decibel: f32,
    pub pitch_hz: f32,
}

/// Extracts level and dominant pitch from a sample buffer and its spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectrumAnalyzer {
    window: WindowSize,
}

impl SpectrumAnalyzer {
    pub const fn new(window: WindowSize) -> Self {
        Self { window }
    }

    pub const fn window(&self) -> WindowSize {
        self.window
    }

    /// Analyzes one frame.
    ///
    /// Both buffers must hold exactly the configured window size. The spectrum
    /// bins are assumed to span `0..sample_rate / 2`.
    pub fn analyze(&self, samples: &[f32], spectrum: &[f32], sample_rate: f32) -> Result<Analysis> {
        let n = self.window.size();
        Error::check_len(n, samples.len())?;
        Error::check_len(n, spectrum.len())?;
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(Error::config("sample_rate", "must be a positive number of Hz"));
        }

        let rms = rms(samples);
        let analysis = Analysis {
            rms,
            decibel: decibel(rms),
            pitch_hz: dominant_frequency(spectrum, sample_rate),
        };
        trace!(
            "analysis rms={} db={} pitch={}",
            analysis.rms,
            analysis.decibel,
            analysis.pitch_hz
        );
        Ok(analysis)
    }
}

/// Root mean square over the whole buffer.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_of_squares: f32 = samples.iter().map(|&s| s * s).sum();
    if sum_of_squares == 0.0 {
        return 0.0;
    }
    sqrtf(sum_of_squares / samples.len() as f32)
}

/// Level of `rms` relative to [`REFERENCE_LEVEL`], floored at [`DECIBEL_FLOOR`].
pub fn decibel(rms: f32) -> f32 {
    if rms.is_nan() || rms <= 0.0 {
        return DECIBEL_FLOOR;
    }
    let db = 20.0 * log10f(rms / REFERENCE_LEVEL);
    if db >= DECIBEL_FLOOR {
        db
    } else {
        DECIBEL_FLOOR
    }
}

/// Index of the first bin holding the largest strictly positive magnitude.
pub fn peak_bin(spectrum: &[f32]) -> Option<usize> {
    let mut peak: Option<(usize, f32)> = None;
    for (i, &value) in spectrum.iter().enumerate() {
        let current_max = peak.map_or(0.0, |(_, v)| v);
        if value > current_max {
            peak = Some((i, value));
        }
    }
    peak.map(|(i, _)| i)
}

/// Dominant frequency in Hz, refined by parabolic interpolation around the
/// peak bin when it has neighbours on both sides.
pub fn dominant_frequency(spectrum: &[f32], sample_rate: f32) -> f32 {
    let n = spectrum.len();
    let Some(peak) = peak_bin(spectrum) else {
        return 0.0;
    };

    let mut bin = peak as f32;
    if peak > 0 && peak < n - 1 {
        let left = spectrum[peak - 1] / spectrum[peak];
        let right = spectrum[peak + 1] / spectrum[peak];
        // keeps the estimate between the neighbouring bins
        bin += (0.5 * (right * right - left * left)).clamp(-0.5, 0.5);
    }
    bin * (sample_rate / 2.0) / n as f32
}
