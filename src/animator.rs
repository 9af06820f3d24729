//! Spin animation loop.
//!
//! The animator never blocks or sleeps. Each frame the host calls [`Animator::tick`]
//! with the current clock reading; between frames it yields to whatever
//! scheduler drives it (`requestAnimationFrame` in the browser, a manual clock
//! in tests and the simulator). Exactly one animation can be in flight.

use crate::error::WheelError;
use crate::rotation::{compute_target_delta, ease_out_quart, landed_index};

/// Default spin duration in milliseconds.
pub const DEFAULT_SPIN_DURATION_MS: f64 = 5000.0;

/// Opaque id of a scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host timer abstraction: schedule one frame callback, or cancel a pending one.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Everything needed to run one spin, fixed at spin start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub winning_index: usize,
    pub option_count: usize,
    pub start_rotation: f64,
    pub total_delta: f64,
    pub duration_ms: f64,
}

impl SpinPlan {
    /// Plan a spin from the wheel's current cumulative rotation.
    pub fn new(
        winning_index: usize,
        option_count: usize,
        start_rotation: f64,
        extra_turns: u32,
        duration_ms: f64,
    ) -> Result<Self, WheelError> {
        let total_delta = compute_target_delta(winning_index, option_count, start_rotation, extra_turns)?;
        Ok(Self {
            winning_index,
            option_count,
            start_rotation,
            total_delta,
            duration_ms,
        })
    }

    #[inline(always)]
    pub fn final_rotation(&self) -> f64 {
        self.start_rotation + self.total_delta
    }

    /// Linear progress in `[0, 1]` after `elapsed_ms`.
    #[inline(always)]
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Rotation to render after `elapsed_ms`.
    #[inline(always)]
    pub fn rotation_at(&self, elapsed_ms: f64) -> f64 {
        self.start_rotation + self.total_delta * ease_out_quart(self.progress(elapsed_ms))
    }
}

/// What a single tick produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// No animation running; nothing to render.
    Idle,
    /// Intermediate frame; another frame has been scheduled.
    Frame { rotation: f64 },
    /// Final frame. Emitted exactly once per completed spin.
    Landed { rotation: f64, index: usize },
}

struct ActiveSpin {
    plan: SpinPlan,
    start_time: f64,
}

/// Drives a [`SpinPlan`] to completion one tick at a time.
pub struct Animator<S: FrameScheduler> {
    scheduler: S,
    active: Option<ActiveSpin>,
    pending: Option<FrameHandle>,
}

impl<S: FrameScheduler> Animator<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            active: None,
            pending: None,
        }
    }

    #[inline(always)]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn plan(&self) -> Option<&SpinPlan> {
        self.active.as_ref().map(|a| &a.plan)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Begin animating `plan` with its clock origin at `now`.
    ///
    /// Rejected without side effects while another spin is running.
    pub fn start(&mut self, plan: SpinPlan, now: f64) -> Result<(), WheelError> {
        if self.is_running() {
            return Err(WheelError::SpinInProgress);
        }
        // A stale handle can survive a cancelled frame that never fired.
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }

        tracing::debug!(
            index = plan.winning_index,
            count = plan.option_count,
            start_rotation = plan.start_rotation,
            total_delta = plan.total_delta,
            "spin started"
        );

        self.active = Some(ActiveSpin { plan, start_time: now });
        self.pending = Some(self.scheduler.request_frame());
        Ok(())
    }

    /// Advance the animation to clock reading `now`.
    pub fn tick(&mut self, now: f64) -> Tick {
        // The frame being serviced is no longer pending.
        self.pending = None;

        let Some(active) = self.active.as_ref() else {
            return Tick::Idle;
        };

        let elapsed = now - active.start_time;
        let progress = active.plan.progress(elapsed);
        let rotation = active.plan.rotation_at(elapsed);

        if progress < 1.0 {
            self.pending = Some(self.scheduler.request_frame());
            return Tick::Frame { rotation };
        }

        let plan = active.plan;
        self.active = None;
        let index = landed_index(rotation, plan.option_count);
        if index != plan.winning_index {
            tracing::error!(
                expected = plan.winning_index,
                landed = index,
                rotation,
                "landing mismatch"
            );
        }
        Tick::Landed { rotation, index }
    }

    /// Stop the running spin without reporting a result.
    ///
    /// Returns whether a spin was actually running.
    pub fn cancel(&mut self) -> bool {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        let was_running = self.active.take().is_some();
        if was_running {
            tracing::debug!("spin cancelled");
        }
        was_running
    }
}

impl<S: FrameScheduler> Drop for Animator<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}

/// Scheduler for hosts that pump [`Animator::tick`] themselves.
///
/// Records requests and cancellations so callers can tell whether a frame is due.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    outstanding: Option<FrameHandle>,
    pub requested: usize,
    pub cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a frame has been requested and not yet cancelled or taken.
    pub fn has_pending(&self) -> bool {
        self.outstanding.is_some()
    }

    /// Consume the outstanding frame request, as a host would when firing it.
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.outstanding.take()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.outstanding = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.outstanding == Some(handle) {
            self.outstanding = None;
        }
        self.cancelled += 1;
    }
}
