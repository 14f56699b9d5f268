#![no_main]
use delta_core::{Point3, Workspace};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parse errors and validation errors are fine; panics are not. A config
    // that validates must also build a controller, and every move from HOME
    // must clamp to a pen-valid point.
    let Ok(cfg) = toml::from_str::<delta_config::Config>(data) else {
        return;
    };
    if cfg.validate().is_err() {
        return;
    }
    let built = delta_core::ControllerBuilder::new()
        .with_actuator(delta_core::mocks::RecordingActuator::new())
        .with_config(&cfg)
        .build();
    if built.is_err() {
        // Only an unreachable HOME may still be refused.
        return;
    }

    let ws = Workspace::new((&cfg.geometry).into());
    let home = ws.home();
    let g = &cfg.geometry;
    let targets = [
        Point3::new(0.0, 0.0, g.z_min - 10.0),
        Point3::new(0.0, 0.0, g.z_max + 10.0),
        Point3::new(g.r_max * 3.0, 0.0, g.z_max - 1.0),
        Point3::new(g.x_rct_max, g.y_rct_min, g.z_paper),
        Point3::new(0.0, 0.0, 0.0),
    ];
    for target in targets {
        let out = ws.clamp(&home, &target);
        assert!(ws.pen_valid(&out), "{target:?} from {home:?} clamped to {out:?}");
    }
});
