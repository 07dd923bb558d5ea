use super::*;

fn cfg() -> FlowFieldConfig {
    FlowFieldConfig::default()
}

#[test]
fn count_is_width_over_divisor_capped() {
    let c = cfg();
    assert_eq!(curve_count(1000.0, &c), 50);
    assert_eq!(curve_count(2000.0, &c), 60);
    assert_eq!(curve_count(39.9, &c), 1);
    assert_eq!(curve_count(19.0, &c), 0);

    let wide = FlowFieldConfig {
        max_curves: 200,
        ..cfg()
    };
    assert_eq!(curve_count(2000.0, &wide), 100);
}

#[test]
fn degenerate_widths_yield_no_curves() {
    let c = cfg();
    assert_eq!(curve_count(0.0, &c), 0);
    assert_eq!(curve_count(-50.0, &c), 0);
    assert_eq!(curve_count(f64::NAN, &c), 0);
    assert_eq!(curve_count(f64::INFINITY, &c), 0);

    let mut rng = Rng64::new(3);
    let curves = generate_curves(Size::new(0.0, 500.0), ReadingDirection::Ltr, &c, &mut rng);
    assert!(curves.is_empty());
}

#[test]
fn depth_stays_in_range() {
    let mut rng = Rng64::new(9);
    for _ in 0..10_000 {
        let d = sample_depth(&mut rng);
        assert!(d > MIN_DEPTH && d <= 1.0, "depth {d}");
    }
}

#[test]
fn attributes_scale_with_depth() {
    let c = cfg();
    let mut rng = Rng64::new(21);
    for curve in generate_curves(Size::new(1200.0, 800.0), ReadingDirection::Ltr, &c, &mut rng) {
        let d = curve.depth;
        assert!(curve.length >= c.length.min * d && curve.length <= c.length.max * d);
        assert!(curve.thickness >= c.thickness.min * d && curve.thickness <= c.thickness.max * d);
        assert!(curve.amplitude >= c.amplitude.min * d && curve.amplitude <= c.amplitude.max * d);
        assert!(curve.speed.abs() >= c.speed.min * d && curve.speed.abs() <= c.speed.max * d);
        assert!((0.0..std::f64::consts::TAU).contains(&curve.phase));
        assert!(c.palette.contains(&curve.color));
        assert!((0.0..1200.0).contains(&curve.position.x));
        assert!((0.0..800.0).contains(&curve.position.y));
    }
}

#[test]
fn speed_sign_follows_reading_direction() {
    let c = cfg();
    let bounds = Size::new(1000.0, 600.0);
    let mut rng = Rng64::new(5);
    let ltr = generate_curves(bounds, ReadingDirection::Ltr, &c, &mut rng);
    let rtl = generate_curves(bounds, ReadingDirection::Rtl, &c, &mut rng);
    assert!(ltr.iter().all(|c| c.speed < 0.0));
    assert!(rtl.iter().all(|c| c.speed > 0.0));
}

#[test]
fn full_source_bias_spawns_in_source_half() {
    let c = FlowFieldConfig {
        source_bias: 1.0,
        max_curves: 500,
        ..cfg()
    };
    let bounds = Size::new(2000.0, 600.0);
    let mut rng = Rng64::new(77);
    let ltr = generate_curves(bounds, ReadingDirection::Ltr, &c, &mut rng);
    assert_eq!(ltr.len(), 100);
    assert!(ltr.iter().all(|c| c.position.x >= 1000.0));

    let rtl = generate_curves(bounds, ReadingDirection::Rtl, &c, &mut rng);
    assert!(rtl.iter().all(|c| c.position.x < 1000.0));
}

#[test]
fn default_bias_favors_source_half() {
    let c = FlowFieldConfig {
        max_curves: 10_000,
        ..cfg()
    };
    let bounds = Size::new(100_000.0, 600.0);
    let mut rng = Rng64::new(1234);
    let curves = generate_curves(bounds, ReadingDirection::Ltr, &c, &mut rng);
    let right = curves.iter().filter(|c| c.position.x >= 50_000.0).count();
    // 0.6 + 0.4 * 0.5 = 0.8 expected share.
    let share = right as f64 / curves.len() as f64;
    assert!((0.75..0.85).contains(&share), "share {share}");
}

#[test]
fn same_seed_same_population() {
    let c = cfg();
    let bounds = Size::new(900.0, 500.0);
    let a = generate_curves(bounds, ReadingDirection::Ltr, &c, &mut Rng64::new(42));
    let b = generate_curves(bounds, ReadingDirection::Ltr, &c, &mut Rng64::new(42));
    assert_eq!(a, b);
}
