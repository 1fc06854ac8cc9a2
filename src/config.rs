//! 定义了等待操作的可配置参数。
//! Defines configurable parameters for the wait operations.

use crate::{
    caller::CallerClass,
    error::{Error, Result},
};
use std::time::Duration;

/// A structure containing the wait policies of a capture session.
///
/// 包含采集会话所有等待策略的结构体。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Budgets for waiting until the device is open.
    /// 等待设备打开的上限。
    pub open: WaitPolicy,

    /// Budgets for waiting until the device is closed.
    /// 等待设备关闭的上限。
    pub close: WaitPolicy,
}

/// Wait budgets per caller class.
///
/// 按调用方类别划分的等待上限。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// The maximum wait for latency-sensitive callers. Zero means they never block.
    /// 延迟敏感调用方的最长等待。为零表示从不阻塞。
    pub sensitive_max_wait: Duration,
    /// The maximum wait for normal callers.
    /// 普通调用方的最长等待。
    pub normal_max_wait: Duration,
    /// The longest a blocked waiter sleeps before re-checking the state.
    /// 阻塞的等待者在重新检查状态前的最长休眠时间。
    pub poll_interval: Duration,
}

impl WaitPolicy {
    pub fn new(sensitive_max_wait: Duration, normal_max_wait: Duration, poll_interval: Duration) -> Self {
        Self {
            sensitive_max_wait,
            normal_max_wait,
            poll_interval,
        }
    }

    /// A policy that never blocks sensitive callers.
    /// 从不阻塞敏感调用方的策略。
    pub fn non_blocking_for_sensitive(normal_max_wait: Duration, poll_interval: Duration) -> Self {
        Self::new(Duration::ZERO, normal_max_wait, poll_interval)
    }

    /// Picks the budget for a caller class.
    /// 为调用方类别选择等待上限。
    pub fn max_wait_for(&self, caller: CallerClass) -> Duration {
        match caller {
            CallerClass::Sensitive => self.sensitive_max_wait,
            CallerClass::Normal => self.normal_max_wait,
        }
    }

    /// Validates the policy. `label` names it in the error.
    /// 校验策略，`label` 用于错误信息。
    pub fn validate(&self, label: &'static str) -> Result<()> {
        if self.sensitive_max_wait > self.normal_max_wait {
            return Err(Error::SensitiveBudgetExceedsNormal {
                policy: label,
                sensitive: self.sensitive_max_wait,
                normal: self.normal_max_wait,
            });
        }
        if self.poll_interval.is_zero() && !self.normal_max_wait.is_zero() {
            return Err(Error::ZeroPollInterval { policy: label });
        }
        Ok(())
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.open.validate("open")?;
        self.close.validate("close")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            open: WaitPolicy::new(
                Duration::from_millis(100),
                Duration::from_millis(300),
                Duration::from_millis(10),
            ),
            // Closing completes through driver callbacks; a sensitive thread does not wait for it.
            close: WaitPolicy::non_blocking_for_sensitive(
                Duration::from_millis(300),
                Duration::from_millis(10),
            ),
        }
    }
}
