use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
#[allow(unused_imports)]
use micromath::F32Ext;

use core::f32::consts::TAU;

use crate::config::{DECIBELS_PER_INTENSITY, DEFAULT_SMOOTH_SPEED};

/// What a strategy sees of the bar being drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorContext {
    pub index: usize,
    /// Radians, counter-clockwise from the positive x axis.
    pub angle: f32,
    pub scale: f32,
    pub max_scale: f32,
}

pub trait ColorStrategy {
    fn get_color(&mut self, context: &ColorContext) -> Rgb888;
}

fn lerp_rgb(from: Rgb888, to: Rgb888, t: f32) -> Rgb888 {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Rgb888::new(
        channel(from.r(), to.r()),
        channel(from.g(), to.g()),
        channel(from.b(), to.b()),
    )
}

/// `hue` in turns: 0 is red, 1/3 green, 2/3 blue.
fn hue_to_rgb(hue: f32) -> Rgb888 {
    let sector = (hue - hue.floor()) * 3.0;
    if sector < 1.0 {
        lerp_rgb(Rgb888::RED, Rgb888::GREEN, sector)
    } else if sector < 2.0 {
        lerp_rgb(Rgb888::GREEN, Rgb888::BLUE, sector - 1.0)
    } else {
        lerp_rgb(Rgb888::BLUE, Rgb888::RED, sector - 2.0)
    }
}

/// Hue follows the bar's position on the ring, so the ring shows one full
/// turn of the color wheel. [`rotate`] spins the wheel against the ring.
///
/// [`rotate`]: AngleHueColor::rotate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngleHueColor {
    offset: f32,
}
impl AngleHueColor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rotate(&mut self, radians: f32) {
        self.offset = (self.offset + radians) % TAU;
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}
impl ColorStrategy for AngleHueColor {
    fn get_color(&mut self, context: &ColorContext) -> Rgb888 {
        hue_to_rgb((context.angle + self.offset) / TAU)
    }
}

/// Blends from `low` to `high` as a bar grows toward its ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleGradientColor {
    low: Rgb888,
    high: Rgb888,
}
impl ScaleGradientColor {
    pub fn new(low: Rgb888, high: Rgb888) -> Self {
        Self { low, high }
    }
}
impl ColorStrategy for ScaleGradientColor {
    fn get_color(&mut self, context: &ColorContext) -> Rgb888 {
        if context.max_scale <= 0.0 {
            return self.low;
        }
        lerp_rgb(self.low, self.high, context.scale / context.max_scale)
    }
}

/// One color for the whole scene, pulsing with the signal level.
///
/// The intensity falls by `smooth_speed` per second but is held up by
/// `decibel / 40`, so at the reference level it sits at `0` and in silence
/// it sinks toward `-4`. The color is the blend from `loud` to `quiet` by
/// `-intensity`, clamped to `[0, 1]`.
pub struct LevelPulseColor {
    loud: Rgb888,
    quiet: Rgb888,
    smooth_speed: f32,
    intensity: f32,
}
impl LevelPulseColor {
    pub fn new(loud: Rgb888, quiet: Rgb888) -> Self {
        Self {
            loud,
            quiet,
            smooth_speed: DEFAULT_SMOOTH_SPEED,
            intensity: 0.0,
        }
    }

    pub fn with_smooth_speed(mut self, smooth_speed: f32) -> Self {
        self.smooth_speed = smooth_speed;
        self
    }

    pub fn update(&mut self, decibel: f32, delta_time: f32) {
        self.intensity -= delta_time * self.smooth_speed;
        let floor = decibel / DECIBELS_PER_INTENSITY;
        if self.intensity < floor {
            self.intensity = floor;
        }
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn color(&self) -> Rgb888 {
        lerp_rgb(self.loud, self.quiet, -self.intensity)
    }
}
impl ColorStrategy for LevelPulseColor {
    fn get_color(&mut self, _context: &ColorContext) -> Rgb888 {
        self.color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use core::f32::consts::FRAC_PI_2;

    fn context(angle: f32, scale: f32) -> ColorContext {
        ColorContext {
            index: 0,
            angle,
            scale,
            max_scale: 10.0,
        }
    }

    #[test]
    fn test_hue_wheel_thirds() {
        assert_eq!(hue_to_rgb(0.0), Rgb888::RED);
        assert_eq!(hue_to_rgb(0.2 / 3.0), Rgb888::new(204, 51, 0));
        assert_eq!(hue_to_rgb(1.2 / 3.0), Rgb888::new(0, 204, 51));
        assert_eq!(hue_to_rgb(1.0), Rgb888::RED);
        // negative hues wrap around
        assert_eq!(hue_to_rgb(-0.2 / 3.0), Rgb888::new(204, 0, 51));
    }

    #[test]
    fn test_angle_hue_follows_ring_and_rotation() {
        let mut hue = AngleHueColor::new();
        assert_eq!(hue.get_color(&context(0.0, 1.0)), Rgb888::RED);
        assert_eq!(hue.get_color(&context(FRAC_PI_2, 1.0)), Rgb888::new(64, 191, 0));

        hue.rotate(FRAC_PI_2);
        assert_eq!(hue.get_color(&context(0.0, 1.0)), Rgb888::new(64, 191, 0));
        hue.rotate(3.0 * FRAC_PI_2);
        assert!(hue.offset() < TAU);
        assert_eq!(hue.get_color(&context(0.0, 1.0)), Rgb888::RED);
    }

    #[test]
    fn test_scale_gradient() {
        let mut gradient = ScaleGradientColor::new(Rgb888::BLACK, Rgb888::WHITE);
        assert_eq!(gradient.get_color(&context(0.0, 10.0)), Rgb888::WHITE);
        assert_eq!(gradient.get_color(&context(0.0, 5.0)), Rgb888::new(128, 128, 128));
        assert_eq!(gradient.get_color(&context(0.0, 0.0)), Rgb888::BLACK);
        assert_eq!(gradient.get_color(&context(0.0, 40.0)), Rgb888::WHITE);
        let no_ceiling = ColorContext {
            max_scale: 0.0,
            ..context(0.0, 1.0)
        };
        assert_eq!(gradient.get_color(&no_ceiling), Rgb888::BLACK);
    }

    #[test]
    fn test_level_pulse_decays_and_holds() {
        let mut pulse = LevelPulseColor::new(Rgb888::WHITE, Rgb888::BLACK);
        pulse.update(0.0, 0.016);
        assert_eq!(pulse.intensity(), 0.0);
        assert_eq!(pulse.color(), Rgb888::WHITE);

        // quiet input lets the intensity fall at smooth_speed per second
        pulse.update(-160.0, 0.02);
        assert_abs_diff_eq!(pulse.intensity(), -0.2, epsilon = 1e-6);
        assert_eq!(pulse.color(), Rgb888::new(204, 204, 204));

        for _ in 0..100 {
            pulse.update(-20.0, 0.1);
        }
        assert_abs_diff_eq!(pulse.intensity(), -0.5);
        assert_eq!(pulse.color(), Rgb888::new(128, 128, 128));

        pulse.update(-160.0, 1.0);
        assert_eq!(pulse.color(), Rgb888::BLACK);
    }
}
