use crate::stats::{StatKind, StatSnapshot, Summary};

/// A contiguous, inclusive slice `[start, end]` of a buffer, summarized
/// every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SubBand {
    start: usize,
    end: usize,
    stats: StatSnapshot,
}

impl SubBand {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "sub-band end before start");
        Self {
            start,
            end,
            stats: StatSnapshot::default(),
        }
    }

    /// Summarizes `buffer[start..=end]`. Indices past the end of the buffer
    /// are ignored.
    pub fn update(&mut self, buffer: &[f32]) {
        self.stats.begin_frame();
        let values = buffer
            .iter()
            .skip(self.start)
            .take(self.len())
            .copied();
        self.stats.set_summary(&Summary::of(values));
        self.stats.finish_frame();
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of indices covered.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn stats(&self) -> &StatSnapshot {
        &self.stats
    }

    pub fn value(&self, kind: StatKind) -> f32 {
        self.stats.value(kind)
    }
}
