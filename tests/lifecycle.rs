//! End-to-end lifecycle scenarios: a fake driver thread reports through a
//! session's event sink while callers on other threads wait.

pub mod common;

use capture_lifecycle::{
    CallerClass, CameraEvent, CameraState, CaptureSession, Config, DesignatedThread, WaitPolicy,
};
use common::harness::{FakeDriver, init_tracing};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const POLL: Duration = Duration::from_millis(10);

#[test]
fn test_normal_waiter_sees_device_open() {
    init_tracing();
    let session = Arc::new(CaptureSession::new(Config::default()).unwrap());

    let waiter = {
        let session = session.clone();
        thread::spawn(move || {
            let start = Instant::now();
            session
                .tracker()
                .wait_for_open(CallerClass::Normal, Duration::from_millis(300), POLL);
            (start.elapsed(), session.state())
        })
    };
    let driver = FakeDriver::spawn(
        session.event_sink(),
        vec![(Duration::from_millis(50), CameraEvent::FirstFrameAvailable)],
    );

    let (elapsed, state) = waiter.join().unwrap();
    driver.join();

    assert_eq!(state, CameraState::Opened);
    assert!(elapsed < Duration::from_millis(250), "took {elapsed:?}");
}

#[test]
fn test_sensitive_zero_budget_returns_immediately() {
    init_tracing();
    let session = CaptureSession::new(Config::default()).unwrap();

    let start = Instant::now();
    session
        .tracker()
        .wait_for_open(CallerClass::Sensitive, Duration::ZERO, POLL);

    assert!(start.elapsed() < Duration::from_millis(50));
    assert_eq!(session.state(), CameraState::New);
}

#[test]
fn test_reported_error_settles_both_waits() {
    init_tracing();
    let session = CaptureSession::new(Config::default()).unwrap();
    FakeDriver::spawn(
        session.event_sink(),
        vec![(Duration::ZERO, CameraEvent::error("init failed"))],
    )
    .join();

    let start = Instant::now();
    session.wait_for_open(&CallerClass::Normal);
    session.wait_for_closed(&CallerClass::Normal);

    assert!(start.elapsed() < Duration::from_millis(50));
    assert_eq!(session.state(), CameraState::Error);
}

#[test]
fn test_full_open_close_cycle() {
    init_tracing();
    let session = CaptureSession::new(Config::default()).unwrap();
    let driver = FakeDriver::spawn(
        session.event_sink(),
        vec![
            (Duration::from_millis(10), CameraEvent::opening("Camera 1, Facing front")),
            (Duration::from_millis(30), CameraEvent::FirstFrameAvailable),
            (Duration::from_millis(100), CameraEvent::Closed),
        ],
    );

    session.wait_for_open(&CallerClass::Normal);
    assert_eq!(session.state(), CameraState::Opened);

    session.wait_for_closed(&CallerClass::Normal);
    assert_eq!(session.state(), CameraState::Closed);

    driver.join();
    assert_eq!(session.tracker().generation(), 3);
}

#[test]
fn test_designated_thread_gets_sensitive_budget() {
    init_tracing();
    let config = Config {
        open: WaitPolicy::new(
            Duration::from_millis(20),
            Duration::from_secs(2),
            POLL,
        ),
        ..Config::default()
    };
    let session = Arc::new(CaptureSession::new(config).unwrap());
    let ui_thread = DesignatedThread::current();

    // The device never opens: the designated thread gives up after its short budget.
    let start = Instant::now();
    session.wait_for_open(&ui_thread);
    let ui_elapsed = start.elapsed();
    assert!(ui_elapsed >= Duration::from_millis(20));
    assert!(ui_elapsed < Duration::from_millis(500), "took {ui_elapsed:?}");

    // A background thread keeps waiting until the device opens.
    let background = {
        let session = session.clone();
        thread::spawn(move || {
            session.wait_for_open(&ui_thread);
            session.state()
        })
    };
    let driver = FakeDriver::spawn(
        session.event_sink(),
        vec![(Duration::from_millis(200), CameraEvent::FirstFrameAvailable)],
    );

    assert_eq!(background.join().unwrap(), CameraState::Opened);
    driver.join();
}

#[test]
fn test_default_close_skips_wait_on_designated_thread() {
    init_tracing();
    let session = CaptureSession::new(Config::default()).unwrap();
    let ui_thread = DesignatedThread::current();
    let driver = FakeDriver::spawn(
        session.event_sink(),
        vec![
            (Duration::ZERO, CameraEvent::FirstFrameAvailable),
            (Duration::from_millis(200), CameraEvent::Closed),
        ],
    );
    thread::sleep(Duration::from_millis(20));

    let start = Instant::now();
    session.wait_for_closed(&ui_thread);
    assert!(start.elapsed() < Duration::from_millis(50));
    assert_eq!(session.state(), CameraState::Opened);

    driver.join();
    assert_eq!(session.state(), CameraState::Closed);
}

#[test]
fn test_driver_outliving_session_is_harmless() {
    init_tracing();
    let session = CaptureSession::new(Config::default()).unwrap();
    let driver = FakeDriver::spawn(
        session.event_sink(),
        vec![
            (Duration::from_millis(30), CameraEvent::FirstFrameAvailable),
            (Duration::from_millis(10), CameraEvent::Closed),
        ],
    );
    drop(session);

    driver.join();
}

#[test]
fn test_fresh_session_per_device_instance() {
    init_tracing();
    let first = CaptureSession::new(Config::default()).unwrap();
    first.event_sink().report(CameraEvent::error("busy"));
    assert_eq!(first.state(), CameraState::Error);
    drop(first);

    let second = CaptureSession::new(Config::default()).unwrap();
    assert_eq!(second.state(), CameraState::New);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_waiter_with_driver_thread() {
    init_tracing();
    let session = CaptureSession::new(Config::default()).unwrap();
    let driver = FakeDriver::spawn(
        session.event_sink(),
        vec![
            (Duration::from_millis(10), CameraEvent::opening("back")),
            (Duration::from_millis(40), CameraEvent::FirstFrameAvailable),
        ],
    );

    let start = tokio::time::Instant::now();
    session.wait_for_open_async(CallerClass::Normal).await;
    assert_eq!(session.state(), CameraState::Opened);
    assert!(start.elapsed() < Duration::from_millis(300));

    tokio::task::spawn_blocking(move || driver.join()).await.unwrap();
}
