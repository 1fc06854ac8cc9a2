//! 采集设备生命周期状态跟踪器
//! Capture device lifecycle state tracker
//!
//! 一个监视器（互斥锁 + 条件变量）保护唯一的状态值。驱动回调线程通过 `report` 写入状态，
//! 任意数量的等待者通过有上限的等待操作同步“设备已就绪/已停止/已失败”。
//!
//! A monitor (mutex + condition variable) guarding a single state value. The
//! driver's callback thread writes it through `report`; any number of waiters
//! rendezvous with "ready", "stopped" or "failed" through bounded waits.
//!
//! ```text
//! driver thread ── report(event) ──► state write ──► notify_all / notify_waiters
//!                                                        │
//! waiters ◄── predicate re-check ◄── wake (event, poll or spurious)
//! ```

use crate::{
    caller::CallerClass,
    state::{CameraEvent, CameraState},
};
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::{sync::Notify, time};
use tracing::{debug, trace};


#[derive(Debug)]
struct Slot {
    state: CameraState,
    generation: u64,
}

/// Tracks the lifecycle state of one capture device instance.
///
/// Created with [`CameraState::New`]. The state only changes through
/// [`report`](Self::report), which applies every event unconditionally: the
/// driver is the sole authority on ordering. None of the wait operations
/// report how they ended; inspect [`current_state`](Self::current_state)
/// afterwards when that matters.
///
/// 跟踪单个采集设备实例的生命周期状态。
#[derive(Debug)]
pub struct CameraStateTracker {
    slot: Mutex<Slot>,
    /// 同步等待者
    /// Blocked threads
    changed: Condvar,
    /// 异步等待者
    /// Parked async tasks
    notify: Notify,
}

impl Default for CameraStateTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraStateTracker {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                state: CameraState::New,
                generation: 0,
            }),
            changed: Condvar::new(),
            notify: Notify::new(),
        }
    }

    /// Applies a lifecycle event and wakes every waiter.
    ///
    /// Holds the lock only for the write, so the driver thread calling this
    /// cannot be stalled by waiters.
    ///
    /// 应用生命周期事件并唤醒所有等待者。
    pub fn report(&self, event: CameraEvent) {
        let to = event.target_state();
        let (from, generation) = {
            let mut slot = self.slot.lock();
            let from = slot.state;
            slot.state = to;
            slot.generation = slot.generation.wrapping_add(1);
            (from, slot.generation)
        };

        self.changed.notify_all();
        self.notify.notify_waiters();

        match &event {
            CameraEvent::Opening { camera_name } => {
                debug!(%from, %to, generation, camera_name = %camera_name, "Camera opening")
            }
            CameraEvent::Error { description } | CameraEvent::Freezed { description } => {
                debug!(%from, %to, generation, description = %description, "Camera fault reported")
            }
            _ => debug!(%from, %to, generation, "Camera state changed"),
        }
    }

    /// 获取当前状态
    /// Get current state
    pub fn current_state(&self) -> CameraState {
        self.slot.lock().state
    }

    /// The number of events reported so far.
    /// 已报告的事件数量。
    pub fn generation(&self) -> u64 {
        self.slot.lock().generation
    }

    /// Blocks until the device is `Opened` or `Error`, or `max_wait` has elapsed.
    ///
    /// A blocked caller re-checks the state at least every `poll_interval`.
    /// A zero `max_wait` never blocks; a zero `poll_interval` disables the
    /// periodic wake and relies on `report` alone.
    pub fn wait_for_open(&self, caller: CallerClass, max_wait: Duration, poll_interval: Duration) {
        self.wait_until("open", caller, max_wait, poll_interval, CameraState::is_open_terminal);
    }

    /// Blocks until the device is `Closed` or `Error`, or `max_wait` has elapsed.
    ///
    /// Same budget rules as [`wait_for_open`](Self::wait_for_open).
    pub fn wait_for_closed(&self, caller: CallerClass, max_wait: Duration, poll_interval: Duration) {
        self.wait_until("closed", caller, max_wait, poll_interval, CameraState::is_close_terminal);
    }

    /// Async counterpart of [`wait_for_open`](Self::wait_for_open).
    ///
    /// Woken directly by `report`, so it needs no poll interval. Dropping the
    /// future abandons the wait and leaves the state untouched.
    pub async fn wait_for_open_async(&self, caller: CallerClass, max_wait: Duration) {
        self.wait_until_async("open", caller, max_wait, CameraState::is_open_terminal)
            .await;
    }

    /// Async counterpart of [`wait_for_closed`](Self::wait_for_closed).
    pub async fn wait_for_closed_async(&self, caller: CallerClass, max_wait: Duration) {
        self.wait_until_async("closed", caller, max_wait, CameraState::is_close_terminal)
            .await;
    }

    fn wait_until(
        &self,
        target: &'static str,
        caller: CallerClass,
        max_wait: Duration,
        poll_interval: Duration,
        settled: fn(CameraState) -> bool,
    ) {
        let start = Instant::now();
        let mut slot = self.slot.lock();

        if settled(slot.state) {
            trace!(target_state = target, state = %slot.state, %caller, "Already settled, not waiting");
            return;
        }
        if max_wait.is_zero() {
            debug!(target_state = target, state = %slot.state, %caller, "Zero wait budget, not blocking");
            return;
        }

        // Fixed at entry; never extended by later wake-ups.
        let deadline = start.checked_add(max_wait);

        loop {
            if settled(slot.state) {
                trace!(
                    target_state = target,
                    state = %slot.state,
                    %caller,
                    elapsed = ?start.elapsed(),
                    "Wait settled"
                );
                return;
            }

            let remaining = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        debug!(
                            target_state = target,
                            state = %slot.state,
                            %caller,
                            elapsed = ?start.elapsed(),
                            "Wait timed out, device continues asynchronously"
                        );
                        return;
                    }
                    Some(deadline - now)
                }
                None => None,
            };

            self.park(&mut slot, remaining, poll_interval);
        }
    }

    /// Sleeps on the condition variable for at most one poll step.
    fn park(&self, slot: &mut MutexGuard<'_, Slot>, remaining: Option<Duration>, poll_interval: Duration) {
        let step = match (remaining, poll_interval.is_zero()) {
            (Some(remaining), false) => remaining.min(poll_interval),
            (Some(remaining), true) => remaining,
            (None, false) => poll_interval,
            (None, true) => {
                self.changed.wait(slot);
                return;
            }
        };
        self.changed.wait_for(slot, step);
    }

    async fn wait_until_async(
        &self,
        target: &'static str,
        caller: CallerClass,
        max_wait: Duration,
        settled: fn(CameraState) -> bool,
    ) {
        let state = self.current_state();
        if settled(state) {
            trace!(target_state = target, %state, %caller, "Already settled, not waiting");
            return;
        }
        if max_wait.is_zero() {
            debug!(target_state = target, %state, %caller, "Zero wait budget, not blocking");
            return;
        }

        let start = time::Instant::now();
        let wait = async {
            loop {
                let notified = self.notify.notified();
                tokio::pin!(notified);
                // Register before re-checking so a report in between is not missed.
                notified.as_mut().enable();
                if settled(self.current_state()) {
                    return;
                }
                notified.await;
            }
        };

        match time::timeout(max_wait, wait).await {
            Ok(()) => trace!(
                target_state = target,
                state = %self.current_state(),
                %caller,
                elapsed = ?start.elapsed(),
                "Wait settled"
            ),
            Err(_) => debug!(
                target_state = target,
                state = %self.current_state(),
                %caller,
                elapsed = ?start.elapsed(),
                "Wait timed out, device continues asynchronously"
            ),
        }
    }
}
