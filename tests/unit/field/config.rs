use super::*;

#[test]
fn defaults_validate() {
    let cfg = FlowFieldConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.max_curves, 60);
    assert_eq!(cfg.density_divisor, 20.0);
    assert_eq!(cfg.time_step, 0.005);
    assert_eq!(cfg.opacity_cap, 0.3);
    assert_eq!(cfg.line_cap, LineCap::Round);
}

#[test]
fn json_only_needs_overridden_keys() {
    let cfg = FlowFieldConfig::from_json_str(r#"{ "max_curves": 200, "seed": 7 }"#).unwrap();
    assert_eq!(cfg.max_curves, 200);
    assert_eq!(cfg.seed, Some(7));
    assert_eq!(cfg.palette, FlowFieldConfig::default().palette);
}

#[test]
fn json_palette_is_rgb_triples() {
    let cfg = FlowFieldConfig::from_json_str(r#"{ "palette": [[255, 0, 0], [0, 0, 255]] }"#)
        .unwrap();
    assert_eq!(cfg.palette, vec![Rgb8::new(255, 0, 0), Rgb8::new(0, 0, 255)]);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = FlowFieldConfig::from_json_str(r#"{ "max_curvez": 1 }"#).unwrap_err();
    assert!(matches!(err, HeroflowError::Serde(_)));
}

#[test]
fn invalid_values_are_rejected() {
    let bad = [
        FlowFieldConfig {
            density_divisor: 0.0,
            ..FlowFieldConfig::default()
        },
        FlowFieldConfig {
            opacity_cap: 1.5,
            ..FlowFieldConfig::default()
        },
        FlowFieldConfig {
            speed: ValueRange::new(0.0, 0.25),
            ..FlowFieldConfig::default()
        },
        FlowFieldConfig {
            length: ValueRange::new(300.0, 100.0),
            ..FlowFieldConfig::default()
        },
        FlowFieldConfig {
            palette: Vec::new(),
            ..FlowFieldConfig::default()
        },
        FlowFieldConfig {
            focal_point: [1.2, 0.5],
            ..FlowFieldConfig::default()
        },
    ];
    for cfg in bad {
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, HeroflowError::Validation(_)), "{cfg:?}");
    }
}

#[test]
fn load_reports_missing_file() {
    let err = FlowFieldConfig::load(Path::new("target/does-not-exist/flow.json")).unwrap_err();
    assert!(matches!(err, HeroflowError::Other(_)));
}

#[test]
fn ltr_flows_left_and_spawns_right() {
    let d = ReadingDirection::from_rtl(false);
    assert_eq!(d, ReadingDirection::Ltr);
    assert_eq!(d.flow_sign(), -1.0);
    assert_eq!(d.source_span(1000.0), (500.0, 1000.0));
}

#[test]
fn rtl_mirrors_flow_source_and_focal_point() {
    let cfg = FlowFieldConfig::default();
    let d = ReadingDirection::from_rtl(true);
    assert_eq!(d.flow_sign(), 1.0);
    assert_eq!(d.source_span(1000.0), (0.0, 500.0));

    let ltr = ReadingDirection::Ltr.focal_point(&cfg);
    let rtl = d.focal_point(&cfg);
    assert!((ltr.x + rtl.x - 1.0).abs() < 1e-12);
    assert_eq!(ltr.y, rtl.y);
}
