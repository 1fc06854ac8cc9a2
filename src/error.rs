//! 定义了库中所有可能的错误类型。
//! Defines all possible error types in the library.
//!
//! 跟踪器本身从不失败：超时、设备报告的错误状态以及等待被取消都只意味着“停止等待”。
//! 只有等待策略的配置校验会产生错误。
//!
//! The tracker itself never fails: a timeout, an `Error` state reported by the
//! device, and a cancelled wait all just mean "stop waiting". Only validation
//! of the wait configuration produces errors.

use std::time::Duration;
use thiserror::Error;

/// The primary error type for the capture lifecycle library.
/// 采集生命周期库的主要错误类型。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A policy allows blocking but has a zero poll interval.
    /// 策略允许阻塞，但轮询间隔为零。
    #[error("{policy} wait policy allows blocking but has a zero poll interval")]
    ZeroPollInterval {
        /// Which policy failed validation ("open" or "close").
        policy: &'static str,
    },

    /// A policy grants latency-sensitive callers a longer budget than normal callers.
    /// 策略给延迟敏感调用方的等待上限大于普通调用方。
    #[error(
        "{policy} wait policy gives sensitive callers {sensitive:?}, more than the {normal:?} given to normal callers"
    )]
    SensitiveBudgetExceedsNormal {
        policy: &'static str,
        sensitive: Duration,
        normal: Duration,
    },
}

/// A specialized `Result` type for this library.
/// 本库专用的 `Result` 类型。
pub type Result<T> = std::result::Result<T, Error>;
