use crate::error::{Error, Result};

/// Checks that `value` lies in `[min, max]`, naming `field` in the error.
///
/// NaN is rejected along with out-of-range values.
pub fn validate_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<f32> {
    if value >= min && value <= max {
        Ok(value)
    } else {
        warn!("rejected {=str}: {} not in [{}, {}]", field, value, min, max);
        Err(Error::config(field, "value outside its valid range"))
    }
}

/// Maps `value` from the source range onto the destination range.
///
/// The position inside the source range is clamped to `[0, 1]` and can be
/// inverted before interpolating. A degenerate source range
/// (`source_max <= source_min`) yields `dest_min`.
pub fn convert_between_ranges(
    value: f32,
    source_min: f32,
    source_max: f32,
    dest_min: f32,
    dest_max: f32,
    invert: bool,
) -> f32 {
    if source_max <= source_min {
        return dest_min;
    }

    let mut percentage = if value <= source_min {
        0.0
    } else if value >= source_max {
        1.0
    } else {
        (value - source_min) / (source_max - source_min)
    };
    if invert {
        percentage = 1.0 - percentage;
    }

    dest_min + (dest_max - dest_min) * percentage
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_convert_between_ranges() {
        assert_abs_diff_eq!(convert_between_ranges(0.5, 0.0, 1.0, 0.0, 10.0, false), 5.0);
        assert_abs_diff_eq!(convert_between_ranges(0.25, 0.0, 1.0, 0.0, 10.0, true), 7.5);
        assert_abs_diff_eq!(convert_between_ranges(-3.0, 0.0, 1.0, 2.0, 4.0, false), 2.0);
        assert_abs_diff_eq!(convert_between_ranges(9.0, 0.0, 1.0, 2.0, 4.0, false), 4.0);
    }

    #[test]
    fn test_degenerate_source_range_returns_dest_min() {
        let converted = convert_between_ranges(0.3, 1.0, 1.0, -2.0, 8.0, false);
        assert_eq!(converted, -2.0);
        assert!(!convert_between_ranges(0.3, 1.0, 1.0, -2.0, 8.0, true).is_nan());
    }

    #[test]
    fn test_validate_range() {
        assert_eq!(validate_range("boost", 2.0, 0.001, 10_000.0), Ok(2.0));
        assert!(validate_range("boost", 0.0, 0.001, 10_000.0).is_err());
        assert!(validate_range("boost", f32::NAN, 0.001, 10_000.0).is_err());
    }
}
