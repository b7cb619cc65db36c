use core::f32::consts::PI;

use microdsp::common::{apply_window_function, WindowFunctionType::Hann};
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::error::{Error, Result};

/// Number of values in the sample and spectrum buffers handed in each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum WindowSize {
    W64 = 64,
    W128 = 128,
    W256 = 256,
    W512 = 512,
    #[default]
    W1024 = 1024,
    W2048 = 2048,
    W4096 = 4096,
    W8192 = 8192,
}

impl WindowSize {
    pub const ALL: [WindowSize; 8] = [
        WindowSize::W64,
        WindowSize::W128,
        WindowSize::W256,
        WindowSize::W512,
        WindowSize::W1024,
        WindowSize::W2048,
        WindowSize::W4096,
        WindowSize::W8192,
    ];

    pub const fn size(self) -> usize {
        self as usize
    }

    /// Width of one spectrum bin in Hz when the bins span `0..sample_rate / 2`.
    pub fn bin_width_hz(self, sample_rate: f32) -> f32 {
        (sample_rate / 2.0) / self.size() as f32
    }
}

impl TryFrom<usize> for WindowSize {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        WindowSize::ALL
            .iter()
            .copied()
            .find(|w| w.size() == value)
            .ok_or(Error::config(
                "window_size",
                "must be a power of two between 64 and 8192",
            ))
    }
}

/// Window function applied before the FFT.
///
/// The analysis code never looks at this; it is carried in the configuration
/// for the audio collaborator and used by [`crate::fft::magnitude_spectrum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum FftWindow {
    Rectangular,
    Triangle,
    #[default]
    Hamming,
    Hann,
    Blackman,
    BlackmanHarris,
}

impl FftWindow {
    /// Weight of sample `index` in a window of `len` samples.
    pub fn coefficient(self, index: usize, len: usize) -> f32 {
        if len < 2 {
            return 1.0;
        }
        let span = (len - 1) as f32;
        let x = 2.0 * PI * index as f32 / span;
        match self {
            FftWindow::Rectangular => 1.0,
            FftWindow::Triangle => 1.0 - (2.0 * index as f32 / span - 1.0).abs(),
            FftWindow::Hamming => 0.54 - 0.46 * x.cos(),
            FftWindow::Hann => 0.5 - 0.5 * x.cos(),
            FftWindow::Blackman => 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos(),
            FftWindow::BlackmanHarris => {
                0.35875 - 0.48829 * x.cos() + 0.14128 * (2.0 * x).cos()
                    - 0.01168 * (3.0 * x).cos()
            }
        }
    }

    /// Multiplies `samples` in place by this window.
    pub fn apply(self, samples: &mut [f32]) {
        match self {
            FftWindow::Rectangular => {}
            FftWindow::Hann => apply_window_function(Hann, samples),
            _ => {
                let len = samples.len();
                for (i, sample) in samples.iter_mut().enumerate() {
                    *sample *= self.coefficient(i, len);
                }
            }
        }
    }
}
