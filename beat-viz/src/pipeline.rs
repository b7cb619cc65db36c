use alloc::{boxed::Box, vec, vec::Vec};

use beat_dsp::{info, trace, warn, Analysis, Error, Result, SpectrumAnalyzer};

use crate::band_group::{BandGroup, BandGroupConfig, DataSource};
use crate::config::{PipelineConfig, DEFAULT_MAX_VISUAL_SCALE, DEFAULT_SMOOTH_SPEED};
use crate::consumer::ReactiveConsumer;
use crate::radial_bars::RadialBars;
use crate::reactive_value::{RateLimits, ReactiveValue};
use crate::stats::StatKind;

/// Scalar features of the analyzer a controller can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum AnalysisMetric {
    Rms,
    Decibel,
    Pitch,
}

impl AnalysisMetric {
    pub fn read(self, analysis: &Analysis) -> f32 {
        match self {
            AnalysisMetric::Rms => analysis.rms,
            AnalysisMetric::Decibel => analysis.decibel,
            AnalysisMetric::Pitch => analysis.pitch_hz,
        }
    }
}

/// Where a controller takes its target from each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum ValueSource {
    Analysis(AnalysisMetric),
    /// `final_kind` of the group's `sub_kind` values, e.g. the maximum of
    /// the sub-band averages.
    Group {
        group: usize,
        final_kind: StatKind,
        sub_kind: StatKind,
    },
}

/// A named [`ReactiveValue`] fed from one [`ValueSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    name: &'static str,
    source: ValueSource,
    value: ReactiveValue,
}

impl Controller {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn source(&self) -> ValueSource {
        self.source
    }

    pub fn value(&self) -> &ReactiveValue {
        &self.value
    }
}

struct Binding<'a> {
    controller: usize,
    consumer: Box<dyn ReactiveConsumer + 'a>,
}

struct RadialBinding {
    group: usize,
    kind: StatKind,
    decay_speed: f32,
    max_scale: f32,
    bars: RadialBars,
    band_values: Vec<f32>,
}

/// Owns the analyzer, band groups, controllers and their consumers, and
/// advances all of them once per frame.
///
/// Everything is registered up front; indices returned by the `add_*`
/// methods stay valid for the pipeline's lifetime.
pub struct Pipeline<'a> {
    config: PipelineConfig,
    analyzer: SpectrumAnalyzer,
    groups: Vec<BandGroup>,
    controllers: Vec<Controller>,
    bindings: Vec<Binding<'a>>,
    radial: Option<RadialBinding>,
    last_analysis: Analysis,
    mixed_samples: Vec<f32>,
    mixed_spectrum: Vec<f32>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let window = config.window.size();
        info!("pipeline: window {} at {} Hz", window, config.sample_rate);
        Ok(Self {
            config,
            analyzer: SpectrumAnalyzer::new(config.window),
            groups: Vec::new(),
            controllers: Vec::new(),
            bindings: Vec::new(),
            radial: None,
            last_analysis: Analysis::default(),
            mixed_samples: vec![0.0; window],
            mixed_spectrum: vec![0.0; window],
        })
    }

    /// Configures a band group against this pipeline's window and returns
    /// its index.
    pub fn add_band_group(&mut self, config: BandGroupConfig) -> Result<usize> {
        let group = BandGroup::configure(config, self.config.window.size())?;
        for other in self.groups.iter().filter(|other| other.overlaps(&group)) {
            warn!(
                "group {=str} overlaps group {=str}",
                group.name(),
                other.name()
            );
        }
        self.groups.push(group);
        Ok(self.groups.len() - 1)
    }

    /// Adds a controller and returns its index.
    pub fn add_controller(
        &mut self,
        name: &'static str,
        source: ValueSource,
        limits: RateLimits,
    ) -> Result<usize> {
        if let ValueSource::Group { group, .. } = source {
            self.check_group(group)?;
        }
        let value = ReactiveValue::new(limits)?;
        self.controllers.push(Controller {
            name,
            source,
            value,
        });
        info!("controller {=str} added", name);
        Ok(self.controllers.len() - 1)
    }

    /// Notifies `consumer` after every update of `controller`. Consumers
    /// run in the order they were bound.
    pub fn bind_consumer<C>(&mut self, controller: usize, consumer: C) -> Result<()>
    where
        C: ReactiveConsumer + 'a,
    {
        if controller >= self.controllers.len() {
            return Err(Error::IndexOutOfRange {
                index: controller,
                len: self.controllers.len(),
            });
        }
        self.bindings.push(Binding {
            controller,
            consumer: Box::new(consumer),
        });
        Ok(())
    }

    /// Drives `bars` from the per-sub-band `kind` values of `group`,
    /// replacing any bars attached before.
    pub fn attach_radial_bars(&mut self, group: usize, kind: StatKind, bars: RadialBars) -> Result<()> {
        self.check_group(group)?;
        let band_values = Vec::with_capacity(self.groups[group].sub_bands().len());
        self.radial = Some(RadialBinding {
            group,
            kind,
            decay_speed: DEFAULT_SMOOTH_SPEED,
            max_scale: DEFAULT_MAX_VISUAL_SCALE,
            bars,
            band_values,
        });
        Ok(())
    }

    /// Decay speed and ceiling of the attached radial bars.
    pub fn set_radial_dynamics(&mut self, decay_speed: f32, max_scale: f32) {
        if let Some(radial) = self.radial.as_mut() {
            radial.decay_speed = decay_speed;
            radial.max_scale = max_scale;
        }
    }

    /// Runs one frame over a mono sample buffer and its spectrum.
    ///
    /// The analyzer runs first, then every band group, then every
    /// controller, then the bound consumers, and last the radial bars.
    pub fn tick(&mut self, samples: &[f32], spectrum: &[f32], delta_time: f32) -> Result<Analysis> {
        let analysis = self
            .analyzer
            .analyze(samples, spectrum, self.config.sample_rate)?;
        self.last_analysis = analysis;

        for group in self.groups.iter_mut() {
            match group.source() {
                DataSource::Raw => group.update(samples)?,
                DataSource::Spectrum => group.update(spectrum)?,
            }
        }

        for controller in self.controllers.iter_mut() {
            let target = match controller.source {
                ValueSource::Analysis(metric) => metric.read(&analysis),
                ValueSource::Group {
                    group,
                    final_kind,
                    sub_kind,
                } => self.groups[group].value(final_kind, sub_kind),
            };
            controller.value.update(target, delta_time);
            trace!(
                "controller {=str}: {} (target {})",
                controller.name,
                controller.value.current(),
                target
            );
        }

        for binding in self.bindings.iter_mut() {
            let update = self.controllers[binding.controller].value.snapshot();
            binding.consumer.on_value_updated(&update);
        }

        if let Some(radial) = self.radial.as_mut() {
            radial.band_values.clear();
            radial
                .band_values
                .extend(self.groups[radial.group].sub_band_values(radial.kind));
            radial.bars.update(
                &radial.band_values,
                radial.decay_speed,
                radial.max_scale,
                delta_time,
            );
        }

        Ok(analysis)
    }

    /// Mixes both channels with the configured [`Channel`] rule and runs
    /// one frame on the result.
    ///
    /// [`Channel`]: beat_dsp::Channel
    pub fn tick_stereo(
        &mut self,
        samples: (&[f32], &[f32]),
        spectra: (&[f32], &[f32]),
        delta_time: f32,
    ) -> Result<Analysis> {
        let channel = self.config.channel;
        let mut mixed_samples = core::mem::take(&mut self.mixed_samples);
        let mut mixed_spectrum = core::mem::take(&mut self.mixed_spectrum);

        let result = channel
            .mix_samples(samples.0, samples.1, &mut mixed_samples)
            .and_then(|()| channel.mix_spectrum(spectra.0, spectra.1, &mut mixed_spectrum))
            .and_then(|()| self.tick(&mixed_samples, &mixed_spectrum, delta_time));

        self.mixed_samples = mixed_samples;
        self.mixed_spectrum = mixed_spectrum;
        result
    }

    fn check_group(&self, group: usize) -> Result<()> {
        if group < self.groups.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index: group,
                len: self.groups.len(),
            })
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn last_analysis(&self) -> Analysis {
        self.last_analysis
    }

    pub fn groups(&self) -> &[BandGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&BandGroup> {
        self.groups.get(index)
    }

    pub fn controllers(&self) -> &[Controller] {
        &self.controllers
    }

    pub fn controller(&self, index: usize) -> Option<&Controller> {
        self.controllers.get(index)
    }

    pub fn controller_by_name(&self, name: &str) -> Option<&Controller> {
        self.controllers.iter().find(|c| c.name == name)
    }

    pub fn radial_bars(&self) -> Option<&RadialBars> {
        self.radial.as_ref().map(|r| &r.bars)
    }
}
