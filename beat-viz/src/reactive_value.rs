#[allow(unused_imports)]
use micromath::F32Ext;

use beat_dsp::{validate_range, Result};

use crate::config::{
    DEFAULT_DECREASE_RATE, DEFAULT_INCREASE_RATE, INITIAL_MAX_VALUE, INITIAL_MIN_VALUE,
    MAX_DELTA_TIME, MAX_RATE, MIN_DELTA_TIME, MIN_RATE, REFERENCE_FRAME_RATE,
};
use crate::consumer::ValueUpdate;

/// Per-direction speed limits in units per second. `None` lets the value
/// jump straight to its target in that direction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct RateLimits {
    pub increase: Option<f32>,
    pub decrease: Option<f32>,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            increase: DEFAULT_INCREASE_RATE,
            decrease: DEFAULT_DECREASE_RATE,
        }
    }
}

impl RateLimits {
    pub const UNLIMITED: RateLimits = RateLimits {
        increase: None,
        decrease: None,
    };

    pub fn validate(&self) -> Result<()> {
        if let Some(rate) = self.increase {
            validate_range("increase_rate", rate, MIN_RATE, MAX_RATE)?;
        }
        if let Some(rate) = self.decrease {
            validate_range("decrease_rate", rate, MIN_RATE, MAX_RATE)?;
        }
        Ok(())
    }
}

/// A scalar that follows a per-frame target, optionally rate limited.
///
/// Each [`update`](ReactiveValue::update) records the previous value, moves
/// toward the target and derives two deltas:
///
/// * `delta`, the raw change this frame, and
/// * `normalized_delta`, the same change rescaled as if it happened over a
///   single frame at 60 fps, so thresholds on it behave the same at any
///   frame rate.
///
/// `min` and `max` start at `0` and `1` and only ever widen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactiveValue {
    limits: RateLimits,
    current: f32,
    previous: f32,
    delta: f32,
    normalized_delta: f32,
    min: f32,
    max: f32,
    last_delta_time: f32,
}

impl Default for ReactiveValue {
    fn default() -> Self {
        Self::with_limits(RateLimits::default())
    }
}

impl ReactiveValue {
    /// Creates a value at rest with validated rate limits.
    pub fn new(limits: RateLimits) -> Result<Self> {
        limits.validate()?;
        Ok(Self::with_limits(limits))
    }

    fn with_limits(limits: RateLimits) -> Self {
        Self {
            limits,
            current: 0.0,
            previous: 0.0,
            delta: 0.0,
            normalized_delta: 0.0,
            min: INITIAL_MIN_VALUE,
            max: INITIAL_MAX_VALUE,
            last_delta_time: 0.0,
        }
    }

    /// Advances one frame toward `target`.
    ///
    /// A negative `delta_time` is treated as zero for the rate limited move.
    pub fn update(&mut self, target: f32, delta_time: f32) {
        self.previous = self.current;
        self.last_delta_time = delta_time;

        let step_time = delta_time.max(0.0);
        self.current = match (self.limits.increase, self.limits.decrease) {
            (_, Some(rate)) if target < self.current => {
                move_towards(self.current, target, rate * step_time)
            }
            (Some(rate), _) if target > self.current => {
                move_towards(self.current, target, rate * step_time)
            }
            _ => target,
        };

        self.delta = self.current - self.previous;
        self.normalized_delta = if self.delta.abs() <= f32::MIN_POSITIVE {
            0.0
        } else {
            self.delta / delta_time.clamp(MIN_DELTA_TIME, MAX_DELTA_TIME) / REFERENCE_FRAME_RATE
        };

        if self.current < self.min {
            self.min = self.current;
        }
        if self.current > self.max {
            self.max = self.current;
        }
    }

    pub fn limits(&self) -> RateLimits {
        self.limits
    }

    pub fn set_limits(&mut self, limits: RateLimits) -> Result<()> {
        limits.validate()?;
        self.limits = limits;
        Ok(())
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn previous(&self) -> f32 {
        self.previous
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn normalized_delta(&self) -> f32 {
        self.normalized_delta
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// The state after the last update, as handed to consumers.
    pub fn snapshot(&self) -> ValueUpdate {
        ValueUpdate {
            current: self.current,
            previous: self.previous,
            delta: self.delta,
            normalized_delta: self.normalized_delta,
            delta_time: self.last_delta_time,
        }
    }
}

fn move_towards(current: f32, target: f32, max_step: f32) -> f32 {
    if (target - current).abs() <= max_step {
        target
    } else if target > current {
        current + max_step
    } else {
        current - max_step
    }
}
