use thiserror::Error;

/// Failures surfaced by configuration and per-frame updates.
///
/// None of these are transient: they describe a caller mistake that has to
/// be fixed at the call site, so nothing in this workspace retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum Error {
    #[error("invalid configuration for `{field}`: {reason}")]
    Configuration {
        field: &'static str,
        reason: &'static str,
    },
    #[error("buffer holds {actual} values, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
    #[error("index {index} is out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

impl Error {
    pub const fn config(field: &'static str, reason: &'static str) -> Self {
        Error::Configuration { field, reason }
    }

    /// Checks that a buffer has exactly the expected length.
    pub fn check_len(expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Error::BufferSizeMismatch { expected, actual })
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
