use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
use std::thread;
use std::time::Duration;

use delta_hardware::error::HwError;
use delta_hardware::util::wait_until_with_timeout;

#[test]
fn wait_until_ready_success_path() {
    let up = Arc::new(AtomicBool::new(false));
    let up_bg = up.clone();
    // Come up after a short delay
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(3));
        up_bg.store(true, Ordering::Relaxed);
    });

    let res = wait_until_with_timeout(
        || up.load(Ordering::Relaxed),
        Duration::from_millis(50),
        Duration::from_micros(200),
    );
    assert!(res.is_ok(), "expected success, got {res:?}");
}

#[test]
fn wait_until_ready_timeout_path() {
    let up = Arc::new(AtomicBool::new(false));

    let err = wait_until_with_timeout(
        || up.load(Ordering::Relaxed),
        Duration::from_millis(5),
        Duration::from_micros(200),
    )
    .expect_err("expected timeout error");

    match err {
        HwError::ConnectTimeout => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn already_ready_returns_immediately() {
    let res = wait_until_with_timeout(|| true, Duration::ZERO, Duration::from_secs(1));
    assert!(res.is_ok());
}
