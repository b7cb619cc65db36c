#![allow(dead_code)]
use wavegen::{sine, wf};

pub const SAMPLE_RATE: f32 = 48_000.0;
pub const SPECTRUM_LEN: usize = 512;
pub const FRAME_LEN: usize = SPECTRUM_LEN * 2;

/// Frequency sitting exactly on spectrum bin `bin`.
pub fn bin_frequency(bin: usize) -> f32 {
    bin as f32 * (SAMPLE_RATE / 2.0) / SPECTRUM_LEN as f32
}

pub fn generate_sine_samples_f32(frequency: f32, amplitude: f32, len: usize) -> Vec<f32> {
    let waveform = wf!(f32, SAMPLE_RATE, sine!(frequency, amplitude));
    waveform.iter().take(len).collect()
}

pub fn generate_sine_samples_i16(frequency: f32, len: usize) -> Vec<i16> {
    generate_sine_samples_f32(frequency, 1.0, len)
        .into_iter()
        .map(|s| (s * i16::MAX as f32) as i16)
        .collect()
}
