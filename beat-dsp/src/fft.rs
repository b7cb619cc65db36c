use microdsp::common::real_fft;
use microfft::Complex32;
use libm::{fabsf, sqrtf};

use crate::error::{Error, Result};
use crate::window::FftWindow;

/// Smallest and largest frame the bundled real FFT handles.
pub const MIN_FFT_FRAME: usize = 128;
pub const MAX_FFT_FRAME: usize = 4096;

/// Normalize a single sample from i16 to f32.
pub fn normalize_sample(sample: i16) -> f32 {
    sample as f32 / i16::MAX as f32
}

/// Normalize a slice of i16 samples to a slice of f32 samples.
pub fn normalize_samples(samples: &[i16], normalized_samples: &mut [f32]) {
    for (normalized, &sample) in normalized_samples.iter_mut().zip(samples) {
        *normalized = normalize_sample(sample);
    }
}

/// Compute the magnitude of the FFT output into `magnitude`.
///
/// `scale` is applied to every bin. The real FFT packs the Nyquist term into
/// the imaginary part of bin 0, so only the real part counts there.
pub fn compute_magnitude(fft_output: &[Complex32], scale: f32, magnitude: &mut [f32]) -> Result<()> {
    Error::check_len(magnitude.len(), fft_output.len())?;
    for (i, (out, component)) in magnitude.iter_mut().zip(fft_output).enumerate() {
        *out = if i == 0 {
            fabsf(component.re) * scale
        } else {
            sqrtf(component.re * component.re + component.im * component.im) * scale
        };
    }
    Ok(())
}

/// Turns a frame of time-domain samples into a magnitude spectrum.
///
/// `frame` holds `2 * spectrum.len()` samples and is windowed and transformed
/// in place, so its contents are scratch afterwards. The bins span
/// `0..sample_rate / 2` and are scaled to the amplitude of a full-scale sine.
pub fn magnitude_spectrum(frame: &mut [f32], window: FftWindow, spectrum: &mut [f32]) -> Result<()> {
    Error::check_len(spectrum.len() * 2, frame.len())?;
    let len = frame.len();
    if !len.is_power_of_two() || !(MIN_FFT_FRAME..=MAX_FFT_FRAME).contains(&len) {
        return Err(Error::config(
            "frame",
            "fft frames must be a power of two between 128 and 4096 samples",
        ));
    }

    window.apply(frame);
    let fft_output = real_fft(frame);
    compute_magnitude(fft_output, 2.0 / len as f32, spectrum)
}
