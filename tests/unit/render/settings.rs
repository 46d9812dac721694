use super::*;

#[test]
fn defaults_center_the_output_window() {
    let s = RenderSettings::new(512, 256);
    s.validate().unwrap();
    let w = s.output_window().unwrap();
    assert_eq!(w.scale, 256.0);
    assert_eq!(w.translate, Complex64::new(256.0, 128.0));
}

#[test]
fn builder_overrides_apply() {
    let s = RenderSettings::new(4, 4)
        .with_scale(4.0)
        .with_translate(Complex64::new(0.0, 0.0));
    let w = s.output_window().unwrap();
    assert_eq!(w.scale, 4.0);
    assert_eq!(w.translate, Complex64::new(0.0, 0.0));
}

#[test]
fn validation_fails_fast() {
    assert!(RenderSettings::new(0, 4).validate().is_err());
    assert!(RenderSettings::new(4, 4).with_scale(-1.0).validate().is_err());
    assert!(
        RenderSettings::new(4, 4)
            .with_tile_window(ScaleTranslate {
                scale: 0.0,
                translate: Complex64::new(0.0, 0.0),
            })
            .validate()
            .is_err()
    );
    let zero_threads = RenderSettings::new(4, 4).with_threading(RenderThreading {
        parallel: true,
        threads: Some(0),
    });
    assert!(zero_threads.validate().is_err());
}

#[test]
fn config_parses_with_defaults() {
    let cfg = RenderConfig::from_json(
        r#"{
            "settings": { "width": 64, "height": 32 },
            "map": { "kind": "spiral_inverse", "height": 32, "width": 64 }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.settings, RenderSettings::new(64, 32));
    assert_eq!(
        cfg.map,
        MapSpec::SpiralInverse {
            height: 32,
            width: 64
        }
    );
}

#[test]
fn config_round_trips_through_json() {
    let cfg = RenderConfig {
        settings: RenderSettings::new(8, 8)
            .with_scale(2.0)
            .with_translate(Complex64::new(1.0, -1.0))
            .with_threading(RenderThreading {
                parallel: true,
                threads: Some(2),
            }),
        map: MapSpec::Identity,
    };
    let json = cfg.to_json().unwrap();
    assert_eq!(RenderConfig::from_json(&json).unwrap(), cfg);
}

#[test]
fn config_errors_are_classified() {
    let err = RenderConfig::from_json("{").unwrap_err();
    assert!(matches!(err, TilewarpError::Serde(_)));

    let err = RenderConfig::from_json(
        r#"{ "settings": { "width": 0, "height": 4 }, "map": { "kind": "identity" } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, TilewarpError::Validation(_)));
}
