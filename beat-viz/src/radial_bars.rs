use alloc::vec::Vec;
use core::f32::consts::PI;

#[allow(unused_imports)]
use micromath::F32Ext;

use beat_dsp::{info, Error, Result};

use crate::config::DEFAULT_VISUAL_MODIFIER;

/// One bar of the ring.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RadialElement {
    /// Radians, counter-clockwise from the positive x axis.
    pub angle: f32,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

/// A ring of bars with instant attack and linear decay.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialBars {
    elements: Vec<RadialElement>,
    radius: f32,
    visual_modifier: f32,
}

impl RadialBars {
    /// Places `count` elements evenly around a circle of `radius`, element
    /// `i` at angle `2π·i/count`.
    pub fn configure(count: usize, radius: f32) -> Result<Self> {
        if count == 0 {
            return Err(Error::config("count", "needs at least one element"));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(Error::config("radius", "must be a positive length"));
        }

        let elements = (0..count)
            .map(|i| {
                let angle = 2.0 * PI * i as f32 / count as f32;
                RadialElement {
                    angle,
                    x: angle.cos() * radius,
                    y: angle.sin() * radius,
                    scale: 0.0,
                }
            })
            .collect();
        info!("radial bars: {} elements, radius {}", count, radius);

        Ok(Self {
            elements,
            radius,
            visual_modifier: DEFAULT_VISUAL_MODIFIER,
        })
    }

    /// Gain applied to band values before they become targets.
    pub fn with_visual_modifier(mut self, visual_modifier: f32) -> Self {
        self.visual_modifier = visual_modifier;
        self
    }

    /// Advances every element one frame.
    ///
    /// Each scale first decays by `decay_speed * delta_time`, snaps up to
    /// `band_value * visual_modifier` if that is larger, and is finally
    /// clamped to `[0, max_scale]`. Elements without a band value decay
    /// toward zero.
    pub fn update(&mut self, band_values: &[f32], decay_speed: f32, max_scale: f32, delta_time: f32) {
        let ceiling = max_scale.max(0.0);
        let modifier = self.visual_modifier;
        for (i, element) in self.elements.iter_mut().enumerate() {
            let target = band_values.get(i).map_or(0.0, |v| v * modifier);
            let mut scale = element.scale - decay_speed * delta_time;
            if scale < target {
                scale = target;
            }
            element.scale = scale.max(0.0).min(ceiling);
        }
    }

    pub fn elements(&self) -> &[RadialElement] {
        &self.elements
    }

    pub fn scales(&self) -> impl Iterator<Item = f32> + '_ {
        self.elements.iter().map(|e| e.scale)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn visual_modifier(&self) -> f32 {
        self.visual_modifier
    }
}

/// Averages the lowest `keep_fraction` of `spectrum` into `out.len()` equal
/// chunks, one per slot. Bins past the last full chunk are ignored.
pub fn average_chunks(spectrum: &[f32], keep_fraction: f32, out: &mut [f32]) -> Result<()> {
    if !(keep_fraction > 0.0 && keep_fraction <= 1.0) {
        return Err(Error::config("keep_fraction", "must be in (0, 1]"));
    }
    if out.is_empty() {
        return Ok(());
    }
    let kept = (spectrum.len() as f32 * keep_fraction) as usize;
    let chunk = kept / out.len();
    if chunk == 0 {
        return Err(Error::config(
            "keep_fraction",
            "keeps fewer bins than there are slots",
        ));
    }

    for (slot, bins) in out.iter_mut().zip(spectrum.chunks_exact(chunk)) {
        *slot = bins.iter().sum::<f32>() / chunk as f32;
    }
    Ok(())
}
