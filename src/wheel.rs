//! The wheel controller: selector → animator handoff.
//!
//! Owns the option list, the cumulative rotation, the random source and the
//! completion handler. The rotation is only written at tick boundaries and is
//! never reset, so every spin starts from what is currently on screen.

use crate::animator::{Animator, FrameScheduler, SpinPlan, Tick};
use crate::config::SpinConfig;
use crate::error::WheelError;
use crate::selector;
use crate::types::{SpinResult, WheelOptions};

/// Rotation to render this frame and, on the final frame, the result.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelFrame {
    pub rotation: f64,
    pub result: Option<SpinResult>,
}

type CompletionHandler = Box<dyn FnMut(&SpinResult)>;

pub struct Wheel<S: FrameScheduler, R: FnMut() -> f64> {
    options: WheelOptions,
    spin: SpinConfig,
    rotation: f64,
    animator: Animator<S>,
    random: R,
    on_complete: Option<CompletionHandler>,
    last_result: Option<SpinResult>,
}

impl<S: FrameScheduler, R: FnMut() -> f64> Wheel<S, R> {
    pub fn new(options: WheelOptions, spin: SpinConfig, scheduler: S, random: R) -> Result<Self, WheelError> {
        spin.validate()?;
        Ok(Self {
            options,
            spin,
            rotation: 0.0,
            animator: Animator::new(scheduler),
            random,
            on_complete: None,
            last_result: None,
        })
    }

    /// Called exactly once per completed spin, never for a cancelled one.
    pub fn on_complete<F>(&mut self, handler: F)
    where
        F: FnMut(&SpinResult) + 'static,
    {
        self.on_complete = Some(Box::new(handler));
    }

    #[inline(always)]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[inline(always)]
    pub fn is_spinning(&self) -> bool {
        self.animator.is_running()
    }

    pub fn options(&self) -> &WheelOptions {
        &self.options
    }

    pub fn spin_config(&self) -> &SpinConfig {
        &self.spin
    }

    pub fn last_result(&self) -> Option<&SpinResult> {
        self.last_result.as_ref()
    }

    pub fn animator(&self) -> &Animator<S> {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut Animator<S> {
        &mut self.animator
    }

    /// Swap the option list. Only allowed between spins.
    pub fn replace_options(&mut self, options: WheelOptions) -> Result<(), WheelError> {
        if self.is_spinning() {
            return Err(WheelError::SpinInProgress);
        }
        tracing::debug!(count = options.len(), "options replaced");
        self.options = options;
        Ok(())
    }

    /// Pick a winner and start animating towards it. Returns the winning index.
    ///
    /// While a spin is running this is rejected and nothing changes.
    pub fn request_spin(&mut self, now: f64) -> Result<usize, WheelError> {
        if self.is_spinning() {
            tracing::warn!("spin requested while another is running");
            return Err(WheelError::SpinInProgress);
        }

        let index = selector::pick(self.options.as_slice(), &mut self.random)?;
        let plan = SpinPlan::new(
            index,
            self.options.len(),
            self.rotation,
            self.spin.extra_turns,
            self.spin.duration_ms,
        )?;
        self.animator.start(plan, now)?;
        self.last_result = None;
        Ok(index)
    }

    /// Advance the running spin to clock reading `now`.
    pub fn tick(&mut self, now: f64) -> WheelFrame {
        match self.animator.tick(now) {
            Tick::Idle => WheelFrame { rotation: self.rotation, result: None },
            Tick::Frame { rotation } => {
                self.rotation = rotation;
                WheelFrame { rotation, result: None }
            }
            Tick::Landed { rotation, index } => {
                self.rotation = rotation;
                let result = self.options.get(index).cloned().map(|option| SpinResult {
                    option,
                    index,
                    timestamp_ms: wall_clock_ms(),
                });

                if let Some(result) = &result {
                    tracing::info!(index, label = %result.option.label, rotation, "spin landed");
                    if let Some(handler) = self.on_complete.as_mut() {
                        handler(result);
                    }
                    self.last_result = Some(result.clone());
                }

                WheelFrame { rotation, result }
            }
        }
    }

    /// Abort the running spin. The wheel keeps the last rendered rotation.
    pub fn cancel(&mut self) -> bool {
        self.animator.cancel()
    }
}

/// Milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
pub fn wall_clock_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch.
#[cfg(not(target_arch = "wasm32"))]
pub fn wall_clock_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
