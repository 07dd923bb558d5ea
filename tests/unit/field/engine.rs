use super::*;
use crate::surface::context::LineCap;
use crate::surface::recording::{DrawCmd, RecordingSurface};

fn engine(seed: u64, direction: ReadingDirection) -> FieldEngine {
    let cfg = FlowFieldConfig {
        seed: Some(seed),
        ..FlowFieldConfig::default()
    };
    FieldEngine::new(cfg, direction).unwrap()
}

#[test]
fn new_engine_is_empty_at_time_zero() {
    let e = engine(1, ReadingDirection::Ltr);
    assert!(e.population().is_empty());
    assert_eq!(e.population().epoch(), 0);
    assert_eq!(e.time(), 0.0);
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = FlowFieldConfig {
        density_divisor: -1.0,
        ..FlowFieldConfig::default()
    };
    assert!(FieldEngine::new(cfg, ReadingDirection::Ltr).is_err());
}

#[test]
fn regenerate_replaces_population_and_bumps_epoch() {
    let mut e = engine(2, ReadingDirection::Ltr);
    e.regenerate(Size::new(1000.0, 600.0));
    assert_eq!(e.population().len(), 50);
    assert_eq!(e.population().epoch(), 1);

    e.regenerate(Size::new(2000.0, 600.0));
    assert_eq!(e.population().len(), 60);
    assert_eq!(e.population().epoch(), 2);
    assert_eq!(e.population().bounds(), Size::new(2000.0, 600.0));
}

#[test]
fn tick_clears_then_strokes_every_curve() {
    let mut e = engine(3, ReadingDirection::Ltr);
    e.regenerate(Size::new(400.0, 300.0));
    let mut surface = RecordingSurface::new();

    let stats = e.tick(&mut surface);
    assert_eq!(stats.curves, 20);
    assert_eq!(surface.strokes(), 20);

    let cmds = surface.commands();
    assert_eq!(
        cmds[0],
        DrawCmd::ClearRect {
            rect: Rect::new(0.0, 0.0, 400.0, 300.0)
        }
    );
    assert_eq!(cmds[1], DrawCmd::SetLineCap { cap: LineCap::Round });
    assert_eq!(cmds[2], DrawCmd::BeginPath);
    assert!(matches!(cmds[3], DrawCmd::MoveTo { .. }));
    assert!(matches!(cmds[4], DrawCmd::BezierCurveTo { .. }));
    assert!(matches!(cmds[5], DrawCmd::SetStrokeColor { .. }));
    assert!(matches!(cmds[6], DrawCmd::SetLineWidth { .. }));
    assert_eq!(cmds[7], DrawCmd::Stroke);
}

#[test]
fn time_advances_one_step_per_tick() {
    let mut e = engine(4, ReadingDirection::Ltr);
    e.regenerate(Size::new(400.0, 300.0));
    let mut surface = RecordingSurface::new();
    for _ in 0..10 {
        e.tick(&mut surface);
    }
    assert!((e.time() - 10.0 * e.config().time_step).abs() < 1e-12);
}

#[test]
fn curves_move_by_speed_toward_text() {
    let mut e = engine(5, ReadingDirection::Ltr);
    e.regenerate(Size::new(800.0, 300.0));
    let before: Vec<_> = e.population().curves().to_vec();
    let stats = e.tick(&mut RecordingSurface::new());
    assert_eq!(stats.recycled, 0);
    for (old, new) in before.iter().zip(e.population().curves()) {
        assert!((new.position.x - (old.position.x + old.speed)).abs() < 1e-12);
        assert!(new.position.x < old.position.x);
        assert_eq!(new.position.y, old.position.y);
    }
}

#[test]
fn stroke_end_is_start_plus_length() {
    let mut e = engine(6, ReadingDirection::Rtl);
    e.regenerate(Size::new(300.0, 200.0));
    let lengths: Vec<f64> = e.population().curves().iter().map(|c| c.length).collect();
    let mut surface = RecordingSurface::new();
    e.tick(&mut surface);

    let mut starts = Vec::new();
    let mut ends = Vec::new();
    for cmd in surface.commands() {
        match cmd {
            DrawCmd::MoveTo { p } => starts.push(*p),
            DrawCmd::BezierCurveTo { end, .. } => ends.push(*end),
            _ => {}
        }
    }
    assert_eq!(starts.len(), lengths.len());
    for ((s, end), len) in starts.iter().zip(&ends).zip(&lengths) {
        assert!((end.x - s.x - len).abs() < 1e-9);
        assert_eq!(end.y, s.y);
    }
}

#[test]
fn stroke_alpha_never_exceeds_cap() {
    let mut e = engine(7, ReadingDirection::Ltr);
    e.regenerate(Size::new(1200.0, 700.0));
    let mut surface = RecordingSurface::new();
    let mut peak: f64 = 0.0;
    for _ in 0..200 {
        peak = peak.max(e.tick(&mut surface).peak_opacity);
    }
    let cap = e.config().opacity_cap;
    assert!(peak <= cap);
    assert!(surface.stroke_colors().all(|c| (0.0..=cap).contains(&c.alpha)));
}

#[test]
fn empty_population_only_clears() {
    let mut e = engine(8, ReadingDirection::Ltr);
    e.regenerate(Size::new(10.0, 10.0));
    let mut surface = RecordingSurface::new();
    let stats = e.tick(&mut surface);
    assert_eq!(stats, FrameStats::default());
    assert_eq!(surface.strokes(), 0);
    assert!(matches!(surface.commands()[0], DrawCmd::ClearRect { .. }));
}

#[test]
fn same_seed_draws_identical_frames() {
    let run = || {
        let mut e = engine(99, ReadingDirection::Ltr);
        e.regenerate(Size::new(640.0, 360.0));
        let mut surface = RecordingSurface::new();
        for _ in 0..50 {
            e.tick(&mut surface);
        }
        surface.commands().to_vec()
    };
    assert_eq!(run(), run());
}
