use delta_config::{RunMode, load_file, load_toml};
use rstest::rstest;
use std::io::Write;

const FULL: &str = r#"
[geometry]
r_max = 6.0
z_min = -13.0
z_max = -8.0
x_rct_min = -4.5
x_rct_max = 4.5
y_rct_min = -3.75
y_rct_max = 3.75
z_paper = -14.5
z_clamp = -13.5
pen_dist = 2.0
home = [0.0, 0.0, -8.5064]

[transform]
offset = [0.0, 0.0, -20.0]
scale = [-1.0, -1.0, 1.0]

[motion]
restrain_threshold_in = 1.0
restrain_step_in = 0.5
average_count = 10
cycle_ms = 50

[link]
port = "/dev/ttyAMA0"
baud_rate = 57600
frame_delay_ms = 5

[sensor]
read_timeout_ms = 20

[runner]
mode = "direct"
"#;

#[test]
fn accepts_full_config() {
    let cfg = load_toml(FULL).expect("parse TOML");
    cfg.validate().expect("valid config should pass");
    assert_eq!(cfg.transform.scale, [-1.0, -1.0, 1.0]);
    assert_eq!(cfg.motion.average_count, 10);
    assert_eq!(cfg.link.port, "/dev/ttyAMA0");
    assert_eq!(cfg.runner.mode, RunMode::Direct);
}

#[rstest]
#[case("[geometry]\nr_max = 0.0\n", "r_max must be > 0")]
#[case("[geometry]\nz_min = -8.0\nz_max = -13.0\n", "z_min must be < geometry.z_max")]
#[case("[geometry]\nx_rct_min = 5.0\n", "x_rct_min must be <")]
#[case("[geometry]\ny_rct_max = -4.0\n", "y_rct_min must be <")]
#[case("[geometry]\nz_paper = -13.0\n", "z_paper must be <")]
#[case("[geometry]\npen_dist = -1.0\n", "pen_dist must be >= 0")]
#[case("[geometry]\nhome = [0.0, nan, -8.5]\n", "geometry.home must be finite")]
#[case("[geometry]\npen_dist = 1.0\n", "z_paper + pen_dist must be >= geometry.z_min")]
#[case("[geometry]\npen_dist = 6.0\n", "z_clamp + pen_dist must be <= geometry.z_max")]
#[case("[geometry]\nr_max = 5.0\n", "corners must lie within")]
#[case("[geometry]\nz_max = inf\n", "geometry must be finite")]
#[case("[transform]\nscale = [1.0, 0.0, 1.0]\n", "scale entries must be non-zero")]
#[case("[transform]\nmm_per_inch = 0.0\n", "mm_per_inch must be > 0")]
#[case("[motion]\naverage_count = 0\n", "average_count must be >= 1")]
#[case("[motion]\ncycle_ms = 0\n", "cycle_ms must be >= 1")]
#[case("[motion]\nrestrain_step_in = 2.0\n", "restrain_step_in must be <=")]
#[case("[motion]\nrestrain_threshold_in = -1.0\n", "restrain_threshold_in must be > 0")]
#[case("[motion]\nreplay_step_in = 0.0\n", "replay_step_in must be > 0")]
#[case("[link]\nbaud_rate = 0\n", "baud_rate must be > 0")]
#[case("[sensor]\nread_timeout_ms = 0\n", "read_timeout_ms must be >= 1")]
#[case("[logging]\nrotation = \"weekly\"\n", "logging.rotation must be one of")]
fn rejects_invalid_sections(#[case] toml: &str, #[case] needle: &str) {
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject");
    assert!(
        format!("{err}").contains(needle),
        "error {err} does not mention {needle}"
    );
}

#[test]
fn rejects_unknown_runner_mode() {
    assert!(load_toml("[runner]\nmode = \"turbo\"\n").is_err());
}

#[test]
fn load_file_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("delta.toml");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(FULL.as_bytes()).unwrap();
    let cfg = load_file(&path).unwrap();
    assert_eq!(cfg.sensor.read_timeout_ms, 20);
}

#[test]
fn load_file_reports_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(format!("{err}").contains("read config"));
}
