//! Defines the lifecycle state machine of a capture device.
//!
//! 定义采集设备的生命周期状态机。

use std::fmt;

/// The lifecycle state of a capture device.
/// 采集设备的生命周期状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CameraState {
    /// The device wrapper exists but the driver has reported nothing yet.
    /// 设备包装已创建，但驱动尚未报告任何事件。
    #[default]
    New,

    /// The driver has started opening the device.
    /// 驱动已开始打开设备。
    Opening,

    /// The first frame has been delivered; the device is ready.
    /// 第一帧已送达，设备就绪。
    Opened,

    /// The device has been closed.
    /// 设备已关闭。
    Closed,

    /// The device was disconnected by the system or another client.
    /// 设备被系统或其他客户端断开。
    Disconnected,

    /// The device failed and can make no further progress.
    /// 设备发生错误，无法继续推进。
    Error,

    /// The device stopped delivering frames.
    /// 设备停止输出帧。
    Freezed,
}

impl CameraState {
    /// Whether a wait for the device to open is over in this state.
    /// 在该状态下等待打开是否应结束。
    pub fn is_open_terminal(self) -> bool {
        matches!(self, CameraState::Opened | CameraState::Error)
    }

    /// Whether a wait for the device to close is over in this state.
    /// 在该状态下等待关闭是否应结束。
    pub fn is_close_terminal(self) -> bool {
        matches!(self, CameraState::Closed | CameraState::Error)
    }

    /// Gets the string representation of the state (for logging).
    /// 获取状态的字符串表示（用于日志）。
    pub fn name(self) -> &'static str {
        match self {
            CameraState::New => "New",
            CameraState::Opening => "Opening",
            CameraState::Opened => "Opened",
            CameraState::Closed => "Closed",
            CameraState::Disconnected => "Disconnected",
            CameraState::Error => "Error",
            CameraState::Freezed => "Freezed",
        }
    }
}

impl fmt::Display for CameraState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lifecycle event delivered by the capture driver.
///
/// There is no event for [`CameraState::New`]: it is only ever the initial state.
/// The strings are diagnostics for the log and are never interpreted.
///
/// 采集驱动送达的生命周期事件。`New` 没有对应事件，它只能是初始状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraEvent {
    /// 设备开始打开
    /// The device started opening
    Opening { camera_name: String },
    /// 第一帧可用
    /// The first frame is available
    FirstFrameAvailable,
    /// 设备已关闭
    /// The device closed
    Closed,
    /// 设备已断开
    /// The device was disconnected
    Disconnected,
    /// 设备错误
    /// The device reported an error
    Error { description: String },
    /// 设备冻结
    /// The device stopped producing frames
    Freezed { description: String },
}

impl CameraEvent {
    pub fn opening(camera_name: impl Into<String>) -> Self {
        CameraEvent::Opening {
            camera_name: camera_name.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        CameraEvent::Error {
            description: description.into(),
        }
    }

    pub fn freezed(description: impl Into<String>) -> Self {
        CameraEvent::Freezed {
            description: description.into(),
        }
    }

    /// The state the tracker moves to when this event is reported.
    /// 报告该事件后跟踪器进入的状态。
    pub fn target_state(&self) -> CameraState {
        match self {
            CameraEvent::Opening { .. } => CameraState::Opening,
            CameraEvent::FirstFrameAvailable => CameraState::Opened,
            CameraEvent::Closed => CameraState::Closed,
            CameraEvent::Disconnected => CameraState::Disconnected,
            CameraEvent::Error { .. } => CameraState::Error,
            CameraEvent::Freezed { .. } => CameraState::Freezed,
        }
    }
}
