use delta_core::error::BuildError;
use delta_core::mocks::RecordingActuator;
use delta_core::{ControllerBuilder, GeometryCfg, MotionCfg, Point3, Timeouts, TransformCfg};
use rstest::rstest;

#[rstest]
fn builder_missing_actuator_yields_typed_build_error() {
    let err = ControllerBuilder::<RecordingActuator>::new()
        .build()
        .expect_err("should fail with MissingActuator");

    match err.downcast_ref::<BuildError>() {
        Some(BuildError::MissingActuator) => {}
        other => panic!("expected MissingActuator, got: {other:?}"),
    }
}

#[rstest]
#[case::home_above_ceiling(Point3::new(0.0, 0.0, -7.0))]
#[case::home_outside_circle(Point3::new(7.0, 0.0, -9.0))]
#[case::pen_below_clamp_outside_rect(Point3::new(5.0, 0.0, -12.0))]
#[case::home_not_finite(Point3::new(f64::NAN, 0.0, -9.0))]
fn unreachable_home_is_rejected(#[case] home: Point3) {
    let err = ControllerBuilder::new()
        .with_actuator(RecordingActuator::new())
        .with_geometry(GeometryCfg {
            home,
            ..GeometryCfg::default()
        })
        .build()
        .expect_err("home should be rejected");
    assert!(
        matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::HomeNotReachable(_))
        ),
        "got {err:?}"
    );
}

#[rstest]
#[case::zero_radius(GeometryCfg { r_max: 0.0, ..GeometryCfg::default() }, MotionCfg::default())]
#[case::inverted_z(GeometryCfg { z_min: -8.0, z_max: -13.0, ..GeometryCfg::default() }, MotionCfg::default())]
#[case::inverted_rect(GeometryCfg { x_rct_min: 4.5, x_rct_max: -4.5, ..GeometryCfg::default() }, MotionCfg::default())]
#[case::paper_above_clamp(GeometryCfg { z_paper: -13.0, ..GeometryCfg::default() }, MotionCfg::default())]
#[case::pen_cannot_reach_paper(GeometryCfg { pen_dist: 1.0, ..GeometryCfg::default() }, MotionCfg::default())]
#[case::clamp_plane_above_ceiling(GeometryCfg { pen_dist: 6.0, ..GeometryCfg::default() }, MotionCfg::default())]
#[case::rect_corner_outside_circle(GeometryCfg { r_max: 5.0, ..GeometryCfg::default() }, MotionCfg::default())]
#[case::step_over_threshold(GeometryCfg::default(), MotionCfg { restrain_step: 2.0, ..MotionCfg::default() })]
#[case::zero_batch(GeometryCfg::default(), MotionCfg { average_count: 0, ..MotionCfg::default() })]
#[case::zero_cycle(GeometryCfg::default(), MotionCfg { cycle_ms: 0, ..MotionCfg::default() })]
#[case::zero_replay_step(GeometryCfg::default(), MotionCfg { replay_step: 0.0, ..MotionCfg::default() })]
fn invalid_sections_are_rejected(#[case] geometry: GeometryCfg, #[case] motion: MotionCfg) {
    let err = ControllerBuilder::new()
        .with_actuator(RecordingActuator::new())
        .with_geometry(geometry)
        .with_motion(motion)
        .build()
        .expect_err("config should be rejected");
    assert!(
        matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::InvalidConfig(_))
        ),
        "got {err:?}"
    );
}

#[test]
fn zero_mm_per_inch_and_zero_sensor_timeout_are_rejected() {
    let bad_transform = ControllerBuilder::new()
        .with_actuator(RecordingActuator::new())
        .with_transform(TransformCfg {
            mm_per_inch: 0.0,
            ..TransformCfg::default()
        })
        .build();
    assert!(bad_transform.is_err());

    let bad_timeout = ControllerBuilder::new()
        .with_actuator(RecordingActuator::new())
        .with_timeouts(Timeouts {
            sensor_ms: 0,
            ..Timeouts::default()
        })
        .build();
    assert!(bad_timeout.is_err());
}

#[rstest]
#[case::zero_scale(TransformCfg { scale: [3.0, 0.0, 0.75], ..TransformCfg::default() }, "transform.scale entries must be non-zero")]
#[case::zero_mm_per_inch(TransformCfg { mm_per_inch: 0.0, ..TransformCfg::default() }, "transform.mm_per_inch must be > 0")]
fn invalid_transform_names_the_rule(#[case] transform: TransformCfg, #[case] rule: &str) {
    let err = ControllerBuilder::new()
        .with_actuator(RecordingActuator::new())
        .with_transform(transform)
        .build()
        .expect_err("transform should be rejected");
    match err.downcast_ref::<BuildError>() {
        Some(BuildError::InvalidConfig(msg)) => assert_eq!(*msg, rule),
        other => panic!("expected InvalidConfig, got: {other:?}"),
    }
}

#[test]
fn accepted_geometry_clamps_home_moves_to_pen_valid_points() {
    let c = ControllerBuilder::new()
        .with_actuator(RecordingActuator::new())
        .with_geometry(GeometryCfg {
            pen_dist: 1.5,
            ..GeometryCfg::default()
        })
        .build()
        .expect("geometry is consistent");
    let ws = c.workspace();
    let home = c.position();
    for target in [
        Point3::new(0.0, 0.0, -20.0),
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(20.0, 0.0, -9.0),
        Point3::new(0.0, 0.0, -4.0),
        Point3::new(4.0, 3.0, -20.0),
    ] {
        let out = ws.clamp(&home, &target);
        assert!(ws.pen_valid(&out), "{target:?} clamped to {out:?}");
    }
}

#[test]
fn config_file_defaults_build_at_home() {
    let c = ControllerBuilder::new()
        .with_actuator(RecordingActuator::new())
        .with_config(&delta_config::Config::default())
        .build()
        .expect("defaults are valid");
    assert_eq!(c.position(), Point3::new(0.0, 0.0, -8.5064));
    assert_eq!(c.frames_sent(), 0);
}
