//! 采集会话：持有跟踪器的资源包装
//! Capture session: the resource wrapper that owns the tracker
//!
//! 每个设备实例创建一个会话，会话独占其跟踪器。驱动只拿到不拥有跟踪器的 `EventSink`，
//! 等待方在调用期间借用会话。新的设备实例必须使用新的会话。
//!
//! One session per device instance; it exclusively owns its tracker. The
//! driver gets a non-owning `EventSink` and waiters borrow the session for the
//! duration of a call. A new device instance needs a new session.

use crate::{
    caller::{CallerClass, CallerClassifier},
    config::Config,
    error::Result,
    handler::EventSink,
    state::CameraState,
    tracker::CameraStateTracker,
};
use std::sync::Arc;
use tracing::debug;

/// A capture device's lifecycle tracker together with its wait policy.
#[derive(Debug)]
pub struct CaptureSession {
    tracker: Arc<CameraStateTracker>,
    config: Config,
}

impl CaptureSession {
    /// 创建新的会话，校验配置
    /// Create a new session, validating the configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        debug!(?config, "Capture session created");
        Ok(Self {
            tracker: Arc::new(CameraStateTracker::new()),
            config,
        })
    }

    /// A handle for the driver's callback thread.
    /// 交给驱动回调线程的句柄。
    pub fn event_sink(&self) -> EventSink {
        EventSink::new(Arc::downgrade(&self.tracker))
    }

    pub fn tracker(&self) -> &CameraStateTracker {
        &self.tracker
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> CameraState {
        self.tracker.current_state()
    }

    /// Waits for the device to open with the budget configured for the caller's class.
    /// 按调用方类别的配置上限等待设备打开。
    pub fn wait_for_open(&self, classifier: &dyn CallerClassifier) {
        let caller = classifier.classify();
        let policy = &self.config.open;
        self.tracker
            .wait_for_open(caller, policy.max_wait_for(caller), policy.poll_interval);
    }

    /// Waits for the device to close with the budget configured for the caller's class.
    /// 按调用方类别的配置上限等待设备关闭。
    pub fn wait_for_closed(&self, classifier: &dyn CallerClassifier) {
        let caller = classifier.classify();
        let policy = &self.config.close;
        self.tracker
            .wait_for_closed(caller, policy.max_wait_for(caller), policy.poll_interval);
    }

    pub async fn wait_for_open_async(&self, caller: CallerClass) {
        self.tracker
            .wait_for_open_async(caller, self.config.open.max_wait_for(caller))
            .await;
    }

    pub async fn wait_for_closed_async(&self, caller: CallerClass) {
        self.tracker
            .wait_for_closed_async(caller, self.config.close.max_wait_for(caller))
            .await;
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        debug!(state = %self.tracker.current_state(), "Capture session dropped");
    }
}
