#![deny(clippy::expect_used, clippy::unwrap_used)]

//! Lifecycle state tracking for asynchronously initialised capture devices.
//! 异步初始化采集设备的生命周期状态跟踪。
//!
//! A capture driver reports lifecycle events from its own callback thread;
//! callers on other threads (or tasks) wait, for a bounded time chosen by
//! their caller class, until the device is open, closed, or failed.

pub mod caller;
pub mod config;
pub mod error;
pub mod handler;
pub mod session;
pub mod state;
pub mod tracker;

pub use caller::{CallerClass, CallerClassifier, DesignatedThread};
pub use config::{Config, WaitPolicy};
pub use error::{Error, Result};
pub use handler::{CameraEventsHandler, EventSink};
pub use session::CaptureSession;
pub use state::{CameraEvent, CameraState};
pub use tracker::CameraStateTracker;
