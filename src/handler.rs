//! 驱动回调接口
//! Driver callback surface
//!
//! 采集驱动在自己的回调线程上调用这些方法。每个回调恰好对应一次 `report`。
//!
//! The capture driver invokes these on its own callback thread. Each callback
//! maps to exactly one `report`.

use crate::{state::CameraEvent, tracker::CameraStateTracker};
use std::sync::Weak;
use tracing::trace;

/// Callbacks emitted by a capture driver over the lifetime of one device.
/// 采集驱动在单个设备生命周期内发出的回调。
pub trait CameraEventsHandler: Send + Sync {
    /// The device could not be opened, or failed on the camera thread.
    fn on_camera_error(&self, description: &str);

    fn on_camera_disconnected(&self);

    /// The device stopped delivering frames.
    fn on_camera_freezed(&self, description: &str);

    fn on_camera_opening(&self, camera_name: &str);

    /// The first frame after opening is available.
    fn on_first_frame_available(&self);

    fn on_camera_closed(&self);
}

impl CameraEventsHandler for CameraStateTracker {
    fn on_camera_error(&self, description: &str) {
        self.report(CameraEvent::error(description));
    }

    fn on_camera_disconnected(&self) {
        self.report(CameraEvent::Disconnected);
    }

    fn on_camera_freezed(&self, description: &str) {
        self.report(CameraEvent::freezed(description));
    }

    fn on_camera_opening(&self, camera_name: &str) {
        self.report(CameraEvent::opening(camera_name));
    }

    fn on_first_frame_available(&self) {
        self.report(CameraEvent::FirstFrameAvailable);
    }

    fn on_camera_closed(&self) {
        self.report(CameraEvent::Closed);
    }
}

/// The driver's non-owning handle to a session's tracker.
///
/// Once the owning session is gone, callbacks are dropped.
///
/// 驱动持有的、不拥有跟踪器的句柄。会话被销毁后，回调将被丢弃。
#[derive(Debug, Clone)]
pub struct EventSink {
    tracker: Weak<CameraStateTracker>,
}

impl EventSink {
    pub(crate) fn new(tracker: Weak<CameraStateTracker>) -> Self {
        Self { tracker }
    }

    /// Whether the session this sink reports to is still alive.
    /// 目标会话是否仍然存在。
    pub fn is_attached(&self) -> bool {
        self.tracker.strong_count() > 0
    }

    /// Reports an event if the session is still alive.
    /// 若会话仍存在则报告事件。
    pub fn report(&self, event: CameraEvent) {
        match self.tracker.upgrade() {
            Some(tracker) => tracker.report(event),
            None => trace!(?event, "Session dropped, discarding camera event"),
        }
    }
}

impl CameraEventsHandler for EventSink {
    fn on_camera_error(&self, description: &str) {
        self.report(CameraEvent::error(description));
    }

    fn on_camera_disconnected(&self) {
        self.report(CameraEvent::Disconnected);
    }

    fn on_camera_freezed(&self, description: &str) {
        self.report(CameraEvent::freezed(description));
    }

    fn on_camera_opening(&self, camera_name: &str) {
        self.report(CameraEvent::opening(camera_name));
    }

    fn on_first_frame_available(&self) {
        self.report(CameraEvent::FirstFrameAvailable);
    }

    fn on_camera_closed(&self) {
        self.report(CameraEvent::Closed);
    }
}
