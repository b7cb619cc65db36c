use libm::fabsf;

use crate::error::{Error, Result};

/// Which stereo channel, or which combination of both, feeds the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum Channel {
    #[default]
    Left,
    Right,
    Average,
    Min,
    Max,
}

impl Channel {
    /// True when both channels must be captured to build the mixed buffer.
    pub const fn needs_both(self) -> bool {
        matches!(self, Channel::Average | Channel::Min | Channel::Max)
    }

    /// Merges two magnitude spectra bin by bin.
    pub fn mix_spectrum(self, left: &[f32], right: &[f32], out: &mut [f32]) -> Result<()> {
        check_lengths(left, right, out)?;
        for ((o, &l), &r) in out.iter_mut().zip(left).zip(right) {
            *o = match self {
                Channel::Left => l,
                Channel::Right => r,
                Channel::Average => (l + r) * 0.5,
                Channel::Min => l.min(r),
                Channel::Max => l.max(r),
            };
        }
        Ok(())
    }

    /// Merges two raw sample buffers.
    ///
    /// `Min` and `Max` keep whichever sample has the smaller or larger
    /// magnitude, with its sign.
    pub fn mix_samples(self, left: &[f32], right: &[f32], out: &mut [f32]) -> Result<()> {
        check_lengths(left, right, out)?;
        for ((o, &l), &r) in out.iter_mut().zip(left).zip(right) {
            *o = match self {
                Channel::Left => l,
                Channel::Right => r,
                Channel::Average => (l + r) * 0.5,
                Channel::Min => {
                    if fabsf(r) < fabsf(l) {
                        r
                    } else {
                        l
                    }
                }
                Channel::Max => {
                    if fabsf(r) > fabsf(l) {
                        r
                    } else {
                        l
                    }
                }
            };
        }
        Ok(())
    }
}

fn check_lengths(left: &[f32], right: &[f32], out: &[f32]) -> Result<()> {
    Error::check_len(out.len(), left.len())?;
    Error::check_len(out.len(), right.len())
}
