//! tests/common/harness.rs
use capture_lifecycle::{CameraEvent, CameraEventsHandler, EventSink};
use std::sync::Once;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Initializes tracing for tests, ensuring it's only done once.
pub fn init_tracing() {
    static TRACING_INIT: Once = Once::new();
    TRACING_INIT.call_once(|| {
        let filter = std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "capture_lifecycle=trace".to_string());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// A stand-in for the capture driver: replays a script of callbacks on its
/// own thread, sleeping before each one.
pub struct FakeDriver {
    handle: JoinHandle<()>,
}

impl FakeDriver {
    pub fn spawn(sink: EventSink, script: Vec<(Duration, CameraEvent)>) -> Self {
        let handle = thread::Builder::new()
            .name("camera-callbacks".into())
            .spawn(move || {
                for (delay, event) in script {
                    thread::sleep(delay);
                    deliver(&sink, event);
                }
            })
            .unwrap();
        Self { handle }
    }

    pub fn join(self) {
        self.handle.join().unwrap();
    }
}

fn deliver(handler: &dyn CameraEventsHandler, event: CameraEvent) {
    match event {
        CameraEvent::Opening { camera_name } => handler.on_camera_opening(&camera_name),
        CameraEvent::FirstFrameAvailable => handler.on_first_frame_available(),
        CameraEvent::Closed => handler.on_camera_closed(),
        CameraEvent::Disconnected => handler.on_camera_disconnected(),
        CameraEvent::Error { description } => handler.on_camera_error(&description),
        CameraEvent::Freezed { description } => handler.on_camera_freezed(&description),
    }
}
