use std::cell::Cell;

use approx::assert_abs_diff_eq;
use beat_dsp::WindowSize;
use beat_viz::band_group::partition;
use beat_viz::color_strategy::LevelPulseColor;
use beat_viz::{
    AnalysisMetric, BandGroupConfig, Pipeline, PipelineConfig, RadialBars, RateLimits,
    RadialBarRenderer, ReactiveValue, Renderer, StatKind, Trigger, TriggerType, ValueSource,
    ValueUpdate,
};
use embedded_graphics::mock_display::MockDisplay;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
pub mod common;
use common::*;

fn config() -> PipelineConfig {
    PipelineConfig {
        window: WindowSize::W512,
        sample_rate: SAMPLE_RATE,
        ..PipelineConfig::default()
    }
}

fn bass_and_treble(pipeline: &mut Pipeline) -> (usize, usize) {
    let bass = pipeline
        .add_band_group(BandGroupConfig {
            name: "bass",
            start: 0,
            end: 63,
            sub_band_count: 4,
            ..BandGroupConfig::default()
        })
        .unwrap();
    let treble = pipeline
        .add_band_group(BandGroupConfig {
            name: "treble",
            start: 64,
            end: 511,
            sub_band_count: 8,
            ..BandGroupConfig::default()
        })
        .unwrap();
    (bass, treble)
}

fn peak_of(group: usize) -> ValueSource {
    ValueSource::Group {
        group,
        final_kind: StatKind::Maximum,
        sub_kind: StatKind::Maximum,
    }
}

#[test]
fn test_bass_tone_drives_only_bass_controller() {
    let mut pipeline = Pipeline::new(config()).unwrap();
    let (bass, treble) = bass_and_treble(&mut pipeline);
    let bass_peak = pipeline
        .add_controller("bass", peak_of(bass), RateLimits::UNLIMITED)
        .unwrap();
    let treble_peak = pipeline
        .add_controller("treble", peak_of(treble), RateLimits::UNLIMITED)
        .unwrap();

    let (samples, spectrum) = sine_frame(bin_frequency(16), 1.0);
    pipeline.tick(&samples, &spectrum, FRAME_DT).unwrap();

    // Hann window: a full-scale sine on a bin reads about 0.5
    let bass_value = pipeline.controller(bass_peak).unwrap().value().current();
    assert_abs_diff_eq!(bass_value, 0.5, epsilon = 0.05);
    let treble_value = pipeline.controller(treble_peak).unwrap().value().current();
    assert!(treble_value < 0.05, "treble leaked {}", treble_value);
}

#[test]
fn test_pitch_controller_follows_tone() {
    let mut pipeline = Pipeline::new(config()).unwrap();
    let pitch = pipeline
        .add_controller(
            "pitch",
            ValueSource::Analysis(AnalysisMetric::Pitch),
            RateLimits::UNLIMITED,
        )
        .unwrap();
    let bin_width = WindowSize::W512.bin_width_hz(SAMPLE_RATE);

    for bin in [10, 50, 200] {
        let (samples, spectrum) = sine_frame(bin_frequency(bin), 0.5);
        pipeline.tick(&samples, &spectrum, FRAME_DT).unwrap();
        let hz = pipeline.controller(pitch).unwrap().value().current();
        assert_abs_diff_eq!(hz, bin_frequency(bin), epsilon = bin_width);
    }
}

#[test]
fn test_onset_trigger_fires_once_per_hit() {
    let hits = Cell::new(0);
    let mut pipeline = Pipeline::new(config()).unwrap();
    let (bass, _) = bass_and_treble(&mut pipeline);
    let kick = pipeline
        .add_controller("kick", peak_of(bass), RateLimits::UNLIMITED)
        .unwrap();
    let trigger = Trigger::new(TriggerType::GreaterThanChange, 0.1, 0.25, |_: &ValueUpdate| {
        hits.set(hits.get() + 1)
    })
    .unwrap();
    pipeline.bind_consumer(kick, trigger).unwrap();

    let (quiet_samples, quiet_spectrum) = silent_frame();
    let (kick_samples, kick_spectrum) = sine_frame(bin_frequency(8), 1.0);

    for _ in 0..5 {
        pipeline.tick(&quiet_samples, &quiet_spectrum, FRAME_DT).unwrap();
    }
    assert_eq!(hits.get(), 0);

    // a sustained tone only counts as one onset
    for _ in 0..30 {
        pipeline.tick(&kick_samples, &kick_spectrum, FRAME_DT).unwrap();
    }
    assert_eq!(hits.get(), 1);

    for _ in 0..30 {
        pipeline.tick(&quiet_samples, &quiet_spectrum, FRAME_DT).unwrap();
    }
    pipeline.tick(&kick_samples, &kick_spectrum, FRAME_DT).unwrap();
    drop(pipeline);
    assert_eq!(hits.get(), 2);
}

#[test]
fn test_radial_bars_hold_then_decay() {
    let mut pipeline = Pipeline::new(config()).unwrap();
    let (bass, _) = bass_and_treble(&mut pipeline);
    // a Hann-windowed peak reads just under 0.5, so the doubled modifier
    // pushes it well past the ceiling
    let bars = RadialBars::configure(4, 10.0)
        .unwrap()
        .with_visual_modifier(100.0);
    pipeline.attach_radial_bars(bass, StatKind::Maximum, bars).unwrap();
    pipeline.set_radial_dynamics(10.0, 25.0);

    let (samples, spectrum) = sine_frame(bin_frequency(40), 1.0);
    pipeline.tick(&samples, &spectrum, FRAME_DT).unwrap();
    let scales: Vec<f32> = pipeline.radial_bars().unwrap().scales().collect();
    // bin 40 lands in the third sub-band (32..=47)
    assert_eq!(scales[2], 25.0);
    assert!(scales[0] < 1.0);

    let (quiet_samples, quiet_spectrum) = silent_frame();
    pipeline.tick(&quiet_samples, &quiet_spectrum, 0.5).unwrap();
    let scales: Vec<f32> = pipeline.radial_bars().unwrap().scales().collect();
    assert_abs_diff_eq!(scales[2], 20.0, epsilon = 1e-4);
}

#[test]
fn test_level_pulse_colors_rendered_bars() {
    let mut pipeline = Pipeline::new(config()).unwrap();
    let (bass, _) = bass_and_treble(&mut pipeline);
    let bars = RadialBars::configure(4, 10.0)
        .unwrap()
        .with_visual_modifier(100.0);
    pipeline.attach_radial_bars(bass, StatKind::Maximum, bars).unwrap();
    pipeline.set_radial_dynamics(10.0, 25.0);
    let pulse = LevelPulseColor::new(Rgb888::WHITE, Rgb888::BLACK);
    let mut renderer = RadialBarRenderer::new(Point::new(32, 32), 2.0, 1.0, 25.0, pulse);

    // a full-scale tone sits well above the reference level
    let (samples, spectrum) = sine_frame(bin_frequency(40), 1.0);
    let analysis = pipeline.tick(&samples, &spectrum, FRAME_DT).unwrap();
    renderer.color_strategy_mut().update(analysis.decibel, FRAME_DT);
    assert!(renderer.color_strategy_mut().intensity() > 0.0);

    let mut display = MockDisplay::<Rgb888>::new();
    display.set_allow_overdraw(true);
    renderer
        .draw(&mut display, pipeline.radial_bars().unwrap())
        .unwrap();
    // the loud bar points left and reaches 2 + 25 pixels out
    assert_eq!(display.get_pixel(Point::new(5, 32)), Some(Rgb888::WHITE));

    let (quiet_samples, quiet_spectrum) = silent_frame();
    let analysis = pipeline.tick(&quiet_samples, &quiet_spectrum, 0.5).unwrap();
    assert_eq!(analysis.rms, 0.0);
    renderer.color_strategy_mut().update(analysis.decibel, 0.5);

    let mut display = MockDisplay::<Rgb888>::new();
    display.set_allow_overdraw(true);
    renderer
        .draw(&mut display, pipeline.radial_bars().unwrap())
        .unwrap();
    assert_eq!(display.get_pixel(Point::new(10, 32)), Some(Rgb888::BLACK));
    assert_eq!(display.get_pixel(Point::new(8, 32)), None);
}

#[test]
fn test_random_updates_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut value = ReactiveValue::new(RateLimits {
        increase: Some(5.0),
        decrease: Some(2.0),
    })
    .unwrap();
    let mut bars = RadialBars::configure(16, 10.0).unwrap();

    let (mut min, mut max) = (value.min(), value.max());
    for _ in 0..1_000 {
        let target = rng.random_range(-10.0..10.0);
        let dt = rng.random_range(0.001..0.2);
        value.update(target, dt);
        assert!(value.min() <= min && value.max() >= max);
        assert!(value.delta().abs() <= 5.0 * dt + 1e-4);
        min = value.min();
        max = value.max();

        let band_values: Vec<f32> = (0..16).map(|_| rng.random_range(0.0..1.0)).collect();
        bars.update(&band_values, 10.0, 25.0, dt);
        assert!(bars.scales().all(|s| (0.0..=25.0).contains(&s)));
    }

    for _ in 0..100 {
        let start = rng.random_range(0..400usize);
        let end = rng.random_range(start..512);
        let count = rng.random_range(1..=(end - start + 1).min(64));
        let ranges: Vec<_> = partition(start, end, count).collect();
        let covered: usize = ranges.iter().map(|(s, e)| e - s + 1).sum();
        assert_eq!(covered, end - start + 1);
        assert_eq!(ranges.len(), count);
    }
}
