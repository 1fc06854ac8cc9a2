//! 调用方分类
//! Caller classification
//!
//! 调用方自行声明自己是否对延迟敏感（例如 UI 主线程），等待策略据此选择等待上限。
//! 如何识别线程由集成层决定，这里只提供接口和一个基于 `ThreadId` 的实现。
//!
//! Callers declare whether they are latency-sensitive (a UI/main thread, for
//! example) and the wait policy picks a budget from that. How a thread is
//! recognised is up to the integration layer; this module only provides the
//! seam and a `ThreadId`-based implementation of it.

use std::fmt;
use std::thread::{self, ThreadId};

/// The policy tag a caller supplies when it waits on the tracker.
/// 调用方等待时提供的策略标签。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CallerClass {
    /// A latency-sensitive caller that must get a short or zero budget.
    /// 延迟敏感的调用方，只能获得很短或为零的等待上限。
    Sensitive,
    /// A caller that tolerates a longer wait.
    /// 可以容忍更长等待的调用方。
    #[default]
    Normal,
}

impl fmt::Display for CallerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallerClass::Sensitive => f.write_str("sensitive"),
            CallerClass::Normal => f.write_str("normal"),
        }
    }
}

/// Decides the class of the calling thread.
/// 判定当前调用线程的类别。
pub trait CallerClassifier: Send + Sync {
    fn classify(&self) -> CallerClass;
}

/// A fixed class classifies every caller the same way.
impl CallerClassifier for CallerClass {
    fn classify(&self) -> CallerClass {
        *self
    }
}

/// Treats one designated thread as sensitive and every other thread as normal.
///
/// 将一个指定线程视为敏感线程，其余线程视为普通线程。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesignatedThread {
    id: ThreadId,
}

impl DesignatedThread {
    pub fn new(id: ThreadId) -> Self {
        Self { id }
    }

    /// Designates the thread this is called on.
    /// 将调用此函数的线程设为指定线程。
    pub fn current() -> Self {
        Self::new(thread::current().id())
    }

    pub fn id(&self) -> ThreadId {
        self.id
    }
}

impl CallerClassifier for DesignatedThread {
    fn classify(&self) -> CallerClass {
        if thread::current().id() == self.id {
            CallerClass::Sensitive
        } else {
            CallerClass::Normal
        }
    }
}
