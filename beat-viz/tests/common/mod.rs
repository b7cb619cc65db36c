#![allow(dead_code)]
use beat_dsp::{magnitude_spectrum, FftWindow};
use wavegen::{sine, wf};

pub const SAMPLE_RATE: f32 = 48_000.0;
pub const WINDOW_LEN: usize = 512;
pub const FRAME_DT: f32 = 1.0 / 60.0;

/// Frequency sitting exactly on spectrum bin `bin`.
pub fn bin_frequency(bin: usize) -> f32 {
    bin as f32 * (SAMPLE_RATE / 2.0) / WINDOW_LEN as f32
}

/// Raw samples and Hann-windowed magnitude spectrum of a sine, both
/// `WINDOW_LEN` long.
pub fn sine_frame(frequency: f32, amplitude: f32) -> (Vec<f32>, Vec<f32>) {
    let waveform = wf!(f32, SAMPLE_RATE, sine!(frequency, amplitude));
    let mut frame: Vec<f32> = waveform.iter().take(WINDOW_LEN * 2).collect();
    let samples = frame[WINDOW_LEN..].to_vec();
    let mut spectrum = vec![0.0; WINDOW_LEN];
    magnitude_spectrum(&mut frame, FftWindow::Hann, &mut spectrum).unwrap();
    (samples, spectrum)
}

pub fn silent_frame() -> (Vec<f32>, Vec<f32>) {
    (vec![0.0; WINDOW_LEN], vec![0.0; WINDOW_LEN])
}
