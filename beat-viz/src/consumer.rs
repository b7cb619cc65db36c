use beat_dsp::{convert_between_ranges, validate_range, Result};

use crate::config::{
    DEFAULT_REACTIVATE_DELAY, DEFAULT_TRIGGER_THRESHOLD, MAX_REACTIVATE_DELAY,
    MAX_TRIGGER_THRESHOLD, MIN_TRIGGER_THRESHOLD,
};

/// What a reactive value reports to its consumers after each update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct ValueUpdate {
    pub current: f32,
    pub previous: f32,
    pub delta: f32,
    /// `delta` as if it happened over one 60 fps frame.
    pub normalized_delta: f32,
    /// Seconds since the previous update.
    pub delta_time: f32,
}

/// Anything that reacts to a tracked value once per frame.
pub trait ReactiveConsumer {
    fn on_value_updated(&mut self, update: &ValueUpdate);
}

impl<F> ReactiveConsumer for F
where
    F: FnMut(&ValueUpdate),
{
    fn on_value_updated(&mut self, update: &ValueUpdate) {
        self(update)
    }
}

/// The condition a [`Trigger`] fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum TriggerType {
    None,
    LessThanValue,
    GreaterThanValue,
    LessThanChange,
    #[default]
    GreaterThanChange,
}

impl TriggerType {
    /// Change conditions compare the normalized delta, value conditions
    /// the current value.
    pub fn is_met(self, update: &ValueUpdate, threshold: f32) -> bool {
        match self {
            TriggerType::None => false,
            TriggerType::LessThanValue => update.current < threshold,
            TriggerType::GreaterThanValue => update.current > threshold,
            TriggerType::LessThanChange => update.normalized_delta < threshold,
            TriggerType::GreaterThanChange => update.normalized_delta > threshold,
        }
    }
}

/// The reaction of a [`Trigger`].
pub trait TriggerAction {
    fn on_triggered(&mut self, update: &ValueUpdate);
}

impl<F> TriggerAction for F
where
    F: FnMut(&ValueUpdate),
{
    fn on_triggered(&mut self, update: &ValueUpdate) {
        self(update)
    }
}

/// Fires its action when a condition on the tracked value holds, then
/// stays quiet for `reactivate_delay` seconds.
pub struct Trigger<A> {
    trigger_type: TriggerType,
    threshold: f32,
    reactivate_delay: f32,
    delay_timer: f32,
    action: A,
}

impl<A: TriggerAction> Trigger<A> {
    pub fn new(trigger_type: TriggerType, threshold: f32, reactivate_delay: f32, action: A) -> Result<Self> {
        let threshold = validate_range(
            "trigger_threshold",
            threshold,
            MIN_TRIGGER_THRESHOLD,
            MAX_TRIGGER_THRESHOLD,
        )?;
        let reactivate_delay =
            validate_range("reactivate_delay", reactivate_delay, 0.0, MAX_REACTIVATE_DELAY)?;
        Ok(Self {
            trigger_type,
            threshold,
            reactivate_delay,
            delay_timer: 0.0,
            action,
        })
    }

    /// Greater-than-change trigger with the default threshold and delay.
    pub fn with_defaults(action: A) -> Self {
        Self {
            trigger_type: TriggerType::default(),
            threshold: DEFAULT_TRIGGER_THRESHOLD,
            reactivate_delay: DEFAULT_REACTIVATE_DELAY,
            delay_timer: 0.0,
            action,
        }
    }

    pub fn trigger_type(&self) -> TriggerType {
        self.trigger_type
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn reactivate_delay(&self) -> f32 {
        self.reactivate_delay
    }

    /// True while the reactivation delay is still running.
    pub fn is_cooling_down(&self) -> bool {
        self.delay_timer > 0.0
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    pub fn action_mut(&mut self) -> &mut A {
        &mut self.action
    }
}

impl<A: TriggerAction> ReactiveConsumer for Trigger<A> {
    fn on_value_updated(&mut self, update: &ValueUpdate) {
        if self.delay_timer > 0.0 {
            self.delay_timer -= update.delta_time;
            return;
        }
        if self.trigger_type.is_met(update, self.threshold) {
            self.delay_timer = self.reactivate_delay;
            self.action.on_triggered(update);
        }
    }
}

/// Which field of a [`ValueUpdate`] drives a [`PropertyModifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum ControllerSource {
    #[default]
    Current,
    Previous,
    Difference,
}

impl ControllerSource {
    pub fn pick(self, update: &ValueUpdate) -> f32 {
        match self {
            ControllerSource::Current => update.current,
            ControllerSource::Previous => update.previous,
            ControllerSource::Difference => update.delta,
        }
    }
}

/// Maps `[controller_min, controller_max]` onto
/// `[property_min, property_max]`, optionally flipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyRange {
    pub controller_min: f32,
    pub controller_max: f32,
    pub property_min: f32,
    pub property_max: f32,
    pub invert: bool,
}

impl Default for PropertyRange {
    fn default() -> Self {
        Self {
            controller_min: 0.0,
            controller_max: 1.0,
            property_min: 0.0,
            property_max: 1.0,
            invert: false,
        }
    }
}

impl PropertyRange {
    pub fn map(&self, value: f32) -> f32 {
        convert_between_ranges(
            value,
            self.controller_min,
            self.controller_max,
            self.property_min,
            self.property_max,
            self.invert,
        )
    }
}

/// Drives some host property from a tracked value every frame.
pub struct PropertyModifier<F> {
    source: ControllerSource,
    range: PropertyRange,
    setter: F,
}

impl<F: FnMut(f32)> PropertyModifier<F> {
    pub fn new(source: ControllerSource, range: PropertyRange, setter: F) -> Self {
        Self {
            source,
            range,
            setter,
        }
    }

    pub fn range(&self) -> &PropertyRange {
        &self.range
    }
}

impl<F: FnMut(f32)> ReactiveConsumer for PropertyModifier<F> {
    fn on_value_updated(&mut self, update: &ValueUpdate) {
        let property = self.range.map(self.source.pick(update));
        (self.setter)(property);
    }
}
