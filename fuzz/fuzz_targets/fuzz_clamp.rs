#![no_main]
use delta_core::{Point3, Workspace};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|xyz: [f64; 3]| {
    if !xyz.iter().all(|v| v.is_finite() && v.abs() < 1e6) {
        return;
    }
    let ws = Workspace::default();
    let home = ws.home();
    let out = ws.clamp(&home, &Point3::from(xyz));
    assert!(ws.pen_valid(&out), "clamp(home, {xyz:?}) = {out:?} is not pen-valid");
});
