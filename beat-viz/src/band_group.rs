use alloc::vec::Vec;

use beat_dsp::{info, validate_range, warn, Error, Result};

use crate::config::{
    DEFAULT_BOOST, DEFAULT_CUTOFF, DEFAULT_END_INDEX, DEFAULT_START_INDEX,
    DEFAULT_SUB_BAND_COUNT, MAX_GAIN, MIN_GAIN,
};
use crate::stats::{boost_and_cutoff, StatKind, StatSnapshot, Summary};
use crate::sub_band::SubBand;

/// Which per-frame buffer a group reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum DataSource {
    Raw,
    #[default]
    Spectrum,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandGroupConfig {
    pub name: &'static str,
    pub source: DataSource,
    pub start: usize,
    /// Inclusive.
    pub end: usize,
    pub sub_band_count: usize,
    pub boost: f32,
    pub cutoff: f32,
}

impl Default for BandGroupConfig {
    fn default() -> Self {
        Self {
            name: "group",
            source: DataSource::Spectrum,
            start: DEFAULT_START_INDEX,
            end: DEFAULT_END_INDEX,
            sub_band_count: DEFAULT_SUB_BAND_COUNT,
            boost: DEFAULT_BOOST,
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

impl BandGroupConfig {
    /// Pulls `end` (and `start` if needed) inside a window of `window_len`
    /// values.
    pub fn fit_to_window(mut self, window_len: usize) -> Self {
        let last = window_len.saturating_sub(1);
        self.end = self.end.min(last);
        self.start = self.start.min(self.end);
        self
    }

    fn validate(&self, window_len: usize) -> Result<()> {
        if self.start > self.end {
            warn!("group {=str}: start {} after end {}", self.name, self.start, self.end);
            return Err(Error::config("start", "must not be after end"));
        }
        if self.end >= window_len {
            warn!("group {=str}: end {} outside window {}", self.name, self.end, window_len);
            return Err(Error::config("end", "must be inside the window"));
        }
        if self.sub_band_count == 0 {
            return Err(Error::config("sub_band_count", "must be at least 1"));
        }
        if self.sub_band_count > self.end - self.start + 1 {
            warn!(
                "group {=str}: {} sub-bands for {} indices",
                self.name,
                self.sub_band_count,
                self.end - self.start + 1
            );
            return Err(Error::config(
                "sub_band_count",
                "must not exceed the number of indices in the range",
            ));
        }
        validate_range("boost", self.boost, MIN_GAIN, MAX_GAIN)?;
        validate_range("cutoff", self.cutoff, MIN_GAIN, MAX_GAIN)?;
        Ok(())
    }
}

/// A range of a buffer split into sub-bands, with one group-level
/// [`StatSnapshot`] per sub-band statistic.
///
/// `value(Maximum, Average)` is the largest of the sub-band averages after
/// boost and cutoff.
#[derive(Debug, Clone, PartialEq)]
pub struct BandGroup {
    config: BandGroupConfig,
    window_len: usize,
    sub_bands: Vec<SubBand>,
    containers: [StatSnapshot; StatKind::COUNT],
}

impl BandGroup {
    /// Validates `config` against a buffer of `window_len` values and
    /// partitions the range into sub-bands.
    pub fn configure(config: BandGroupConfig, window_len: usize) -> Result<Self> {
        config.validate(window_len)?;

        let sub_bands = partition(config.start, config.end, config.sub_band_count)
            .map(|(start, end)| SubBand::new(start, end))
            .collect::<Vec<_>>();

        info!(
            "group {=str}: {}..={} in {} sub-bands",
            config.name,
            config.start,
            config.end,
            sub_bands.len()
        );

        Ok(Self {
            config,
            window_len,
            sub_bands,
            containers: [StatSnapshot::default(); StatKind::COUNT],
        })
    }

    /// Updates every sub-band from `buffer`, then recombines them.
    pub fn update(&mut self, buffer: &[f32]) -> Result<()> {
        Error::check_len(self.window_len, buffer.len())?;

        for band in self.sub_bands.iter_mut() {
            band.update(buffer);
        }

        let BandGroupConfig { boost, cutoff, .. } = self.config;
        for (sub_kind, container) in StatKind::ALL.iter().zip(self.containers.iter_mut()) {
            container.begin_frame();
            container.set_summary(&Summary::of(
                self.sub_bands.iter().map(|band| band.value(*sub_kind)),
            ));
            container.apply_boost_and_cutoff(boost, cutoff);
            container.finish_frame();
        }
        Ok(())
    }

    pub fn config(&self) -> &BandGroupConfig {
        &self.config
    }

    pub fn name(&self) -> &'static str {
        self.config.name
    }

    pub fn source(&self) -> DataSource {
        self.config.source
    }

    pub fn sub_bands(&self) -> &[SubBand] {
        &self.sub_bands
    }

    /// Group statistics computed over the sub-bands' `sub_kind` values.
    pub fn stats(&self, sub_kind: StatKind) -> &StatSnapshot {
        &self.containers[sub_kind as usize]
    }

    pub fn value(&self, final_kind: StatKind, sub_kind: StatKind) -> f32 {
        self.stats(sub_kind).value(final_kind)
    }

    pub fn previous(&self, final_kind: StatKind, sub_kind: StatKind) -> f32 {
        self.stats(sub_kind).previous(final_kind)
    }

    pub fn delta(&self, final_kind: StatKind, sub_kind: StatKind) -> f32 {
        self.stats(sub_kind).delta(final_kind)
    }

    /// Each sub-band's `kind` value with the group's boost and cutoff applied.
    pub fn sub_band_values(&self, kind: StatKind) -> impl Iterator<Item = f32> + '_ {
        let BandGroupConfig { boost, cutoff, .. } = self.config;
        self.sub_bands
            .iter()
            .map(move |band| boost_and_cutoff(band.value(kind), boost, cutoff))
    }

    /// Lower and upper edge in Hz of the covered bins, for a spectrum whose
    /// bins span `0..sample_rate / 2`.
    pub fn frequency_range_hz(&self, sample_rate: f32) -> (f32, f32) {
        let resolution = (sample_rate / 2.0) / self.window_len as f32;
        (
            self.config.start as f32 * resolution,
            (self.config.end + 1) as f32 * resolution,
        )
    }

    /// True when the two groups read the same buffer and share any index.
    pub fn overlaps(&self, other: &BandGroup) -> bool {
        self.config.source == other.config.source
            && self.config.start <= other.config.end
            && other.config.start <= self.config.end
    }
}

/// Splits `[start, end]` into exactly `count` contiguous inclusive ranges.
///
/// Every range but the last is `round(len / count)` wide and the last one
/// takes the remainder; when rounding up would leave nothing for the last
/// range the width falls back to `floor(len / count)`. Never yields more
/// ranges than there are indices, and nothing at all for a zero `count` or
/// a reversed range.
pub fn partition(start: usize, end: usize, count: usize) -> impl Iterator<Item = (usize, usize)> {
    let len = (end + 1).saturating_sub(start);
    let count = count.min(len);
    let mut size = 0;
    if count > 0 {
        size = ((2 * len + count) / (2 * count)).max(1);
        if (count - 1) * size >= len {
            size = len / count;
        }
    }

    (0..count).map(move |i| {
        let band_start = start + i * size;
        let band_end = if i == count - 1 {
            end
        } else {
            band_start + size - 1
        };
        (band_start, band_end)
    })
}
