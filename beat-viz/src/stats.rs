#[allow(unused_imports)]
use micromath::F32Ext;

/// The statistics kept for every sub-band and every band group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum StatKind {
    #[default]
    Average,
    Median,
    Sum,
    Minimum,
    Maximum,
}

impl StatKind {
    pub const COUNT: usize = 5;
    pub const ALL: [StatKind; StatKind::COUNT] = [
        StatKind::Average,
        StatKind::Median,
        StatKind::Sum,
        StatKind::Minimum,
        StatKind::Maximum,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// One tracked value with its value from the previous frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tracked {
    pub current: f32,
    pub previous: f32,
    pub delta: f32,
}

impl Tracked {
    fn advance(&mut self) {
        self.previous = self.current;
    }

    fn finish(&mut self) {
        self.delta = self.current - self.previous;
    }
}

/// Single pass summary of a run of values.
///
/// Minimum and maximum are picked by magnitude but keep their sign. The
/// median is the midrange `(minimum + maximum) / 2`, not a sorted median.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub sum: f32,
    pub average: f32,
    pub median: f32,
    pub minimum: f32,
    pub maximum: f32,
}

impl Summary {
    /// Summarizes `values`. An empty input yields all zeros.
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut minimum = 0.0f32;
        let mut maximum = 0.0f32;

        for value in values {
            if count == 0 {
                minimum = value;
                maximum = value;
            } else {
                if value.abs() < minimum.abs() {
                    minimum = value;
                }
                if value.abs() > maximum.abs() {
                    maximum = value;
                }
            }
            sum += value;
            count += 1;
        }

        if count == 0 {
            return Summary::default();
        }
        Summary {
            sum,
            average: sum / count as f32,
            median: (minimum + maximum) * 0.5,
            minimum,
            maximum,
        }
    }

    pub fn get(&self, kind: StatKind) -> f32 {
        match kind {
            StatKind::Average => self.average,
            StatKind::Median => self.median,
            StatKind::Sum => self.sum,
            StatKind::Minimum => self.minimum,
            StatKind::Maximum => self.maximum,
        }
    }
}

/// Current, previous and delta of every [`StatKind`].
///
/// A frame goes `begin_frame` → `set_summary` → optional
/// `apply_boost_and_cutoff` → `finish_frame`, after which
/// `previous(kind)` is the value of the frame before and
/// `delta(kind) == value(kind) - previous(kind)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatSnapshot {
    values: [Tracked; StatKind::COUNT],
}

impl StatSnapshot {
    pub fn tracked(&self, kind: StatKind) -> Tracked {
        self.values[kind.index()]
    }

    pub fn value(&self, kind: StatKind) -> f32 {
        self.values[kind.index()].current
    }

    pub fn previous(&self, kind: StatKind) -> f32 {
        self.values[kind.index()].previous
    }

    pub fn delta(&self, kind: StatKind) -> f32 {
        self.values[kind.index()].delta
    }

    /// Moves every current value into its previous slot.
    pub fn begin_frame(&mut self) {
        self.values.iter_mut().for_each(Tracked::advance);
    }

    pub fn set_summary(&mut self, summary: &Summary) {
        for kind in StatKind::ALL {
            self.values[kind.index()].current = summary.get(kind);
        }
    }

    /// Multiplies every current value by `boost`, then clamps negative
    /// results into `[-cutoff, 0]` and the rest into `[0, cutoff]`.
    pub fn apply_boost_and_cutoff(&mut self, boost: f32, cutoff: f32) {
        for tracked in self.values.iter_mut() {
            tracked.current = boost_and_cutoff(tracked.current, boost, cutoff);
        }
    }

    /// Computes the deltas against the previous frame.
    pub fn finish_frame(&mut self) {
        self.values.iter_mut().for_each(Tracked::finish);
    }
}

pub(crate) fn boost_and_cutoff(value: f32, boost: f32, cutoff: f32) -> f32 {
    let boosted = value * boost;
    if boosted < 0.0 {
        boosted.clamp(-cutoff, 0.0)
    } else {
        boosted.clamp(0.0, cutoff)
    }
}
