//! WebAssembly prize wheel engine.
//!
//! Weighted selection ([`selector`]) picks a winner; the animator
//! ([`animator`]) spins the wheel so the pointer lands on that exact slice
//! from whatever orientation it is currently in. [`wheel::Wheel`] ties the two
//! together for a host that drives frames.
//!
//! The JS surface is a `PrizeWheel` class that schedules its own frames with
//! `requestAnimationFrame` and optionally draws onto a canvas.

pub mod animator;
pub mod celebration;
pub mod config;
pub mod error;
pub mod generator;
pub mod render;
pub mod rng;
pub mod rotation;
pub mod selector;
pub mod types;
pub mod wheel;

#[cfg(target_arch = "wasm32")]
mod canvas;

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use serde::Serialize;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use crate::animator::{FrameHandle, FrameScheduler};
        use crate::config::WheelConfig;
    use crate::render::{slice_layout, WheelChrome};
    use crate::rng::WheelRng;
    use crate::types::{WeightedOption, WheelOptions};
    use crate::wheel::Wheel;
    use crate::{canvas, generator};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
    type RandomSource = Box<dyn FnMut() -> f64>;

    fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    /// `requestAnimationFrame`-backed scheduler sharing one frame closure.
    struct RafScheduler {
        callback: FrameCallback,
    }

    impl FrameScheduler for RafScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            let id = match (web_sys::window(), self.callback.borrow().as_ref()) {
                (Some(window), Some(cb)) => window
                    .request_animation_frame(cb.as_ref().unchecked_ref())
                    .unwrap_or(0),
                _ => 0,
            };
            FrameHandle(id)
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle.0);
            }
        }
    }

    struct State {
        wheel: Wheel<RafScheduler, RandomSource>,
        config: WheelConfig,
        chrome: WheelChrome,
        canvas: Option<(CanvasRenderingContext2d, f64)>,
        on_frame: Option<js_sys::Function>,
        on_complete: Option<js_sys::Function>,
    }

    impl State {
        fn draw(&self) {
            if let Some((ctx, size)) = &self.canvas {
                if let Err(e) = canvas::draw_wheel(ctx, *size, self.wheel.options(), self.wheel.rotation(), &self.chrome) {
                    tracing::warn!(error = ?e, "wheel draw failed");
                }
            }
        }
    }

    /// Plain JS objects rather than `Map`s, and numbers rather than `BigInt`s.
    fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
        value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(to_js)
    }

    /// A prize wheel driven by the browser's frame clock.
    #[wasm_bindgen(js_name = "PrizeWheel")]
    pub struct WheelHandle {
        state: Rc<RefCell<State>>,
        // Owns the frame closure; the scheduler inside `state` only borrows it.
        _frame: FrameCallback,
    }

    #[wasm_bindgen(js_class = "PrizeWheel")]
    impl WheelHandle {
        /// Build from an optional config object (defaults for missing fields).
        #[wasm_bindgen(constructor)]
        pub fn new(config: JsValue) -> Result<WheelHandle, JsValue> {
            let config: WheelConfig = if config.is_undefined() || config.is_null() {
                WheelConfig::default()
            } else {
                serde_wasm_bindgen::from_value(config).map_err(to_js)?
            };
            config.validate().map_err(to_js)?;

            let frame: FrameCallback = Rc::new(RefCell::new(None));
            let scheduler = RafScheduler { callback: frame.clone() };
            let mut rng = WheelRng::new();
            let random: RandomSource = Box::new(move || rng.next_unit());
            let wheel = Wheel::new(config.wheel_options().map_err(to_js)?, config.spin, scheduler, random)
                .map_err(to_js)?;

            let state = Rc::new(RefCell::new(State {
                wheel,
                config,
                chrome: WheelChrome::default(),
                canvas: None,
                on_frame: None,
                on_complete: None,
            }));

            let weak: Weak<RefCell<State>> = Rc::downgrade(&state);
            *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
                let Some(state) = weak.upgrade() else { return };

                // Release the borrow before calling back into JS, which may spin again.
                let (frame, outcome, on_frame, on_complete) = {
                    let mut s = state.borrow_mut();
                    let frame = s.wheel.tick(timestamp);
                    s.draw();
                    let outcome = frame
                        .result
                        .as_ref()
                        .map(|r| to_value(&s.config.celebration.outcome(r)));
                    (frame, outcome, s.on_frame.clone(), s.on_complete.clone())
                };

                if let Some(f) = on_frame {
                    let _ = f.call1(&JsValue::NULL, &JsValue::from_f64(frame.rotation));
                }
                if let (Some(outcome), Some(f)) = (outcome, on_complete) {
                    match outcome {
                        Ok(value) => {
                            let _ = f.call1(&JsValue::NULL, &value);
                        }
                        Err(e) => tracing::warn!(error = ?e, "spin result not serializable"),
                    }
                }
            }) as Box<dyn FnMut(f64)>));

            Ok(WheelHandle { state, _frame: frame })
        }

        /// Draw onto `canvas` on every frame and whenever options change.
        #[wasm_bindgen(js_name = "attachCanvas")]
        pub fn attach_canvas(&self, canvas: HtmlCanvasElement) -> Result<(), JsValue> {
            let ctx = canvas
                .get_context("2d")?
                .ok_or_else(|| JsValue::from_str("2D context not available"))?
                .dyn_into::<CanvasRenderingContext2d>()?;
            let mut s = self.state.borrow_mut();
            s.canvas = Some((ctx, canvas.width() as f64));
            s.draw();
            Ok(())
        }

        /// Called with the current rotation (radians) on every frame.
        #[wasm_bindgen(js_name = "onFrame")]
        pub fn on_frame(&self, callback: js_sys::Function) {
            self.state.borrow_mut().on_frame = Some(callback);
        }

        /// Called once with the result when a spin lands.
        #[wasm_bindgen(js_name = "onComplete")]
        pub fn on_complete(&self, callback: js_sys::Function) {
            self.state.borrow_mut().on_complete = Some(callback);
        }

        /// Start a spin. Returns the winning index; throws while a spin is running.
        pub fn spin(&self) -> Result<usize, JsValue> {
            self.state.borrow_mut().wheel.request_spin(now_ms()).map_err(to_js)
        }

        /// Stop the running spin without a result. Returns whether one was running.
        pub fn cancel(&self) -> bool {
            self.state.borrow_mut().wheel.cancel()
        }

        #[wasm_bindgen(js_name = "isSpinning")]
        pub fn is_spinning(&self) -> bool {
            self.state.borrow().wheel.is_spinning()
        }

        pub fn rotation(&self) -> f64 {
            self.state.borrow().wheel.rotation()
        }

        /// Replace the option list between spins.
        #[wasm_bindgen(js_name = "replaceOptions")]
        pub fn replace_options(&self, options: JsValue) -> Result<(), JsValue> {
            let options: WheelOptions = serde_wasm_bindgen::from_value(options).map_err(to_js)?;
            let mut s = self.state.borrow_mut();
            s.wheel.replace_options(options).map_err(to_js)?;
            s.draw();
            Ok(())
        }

        pub fn options(&self) -> Result<JsValue, JsValue> {
            to_value(self.state.borrow().wheel.options())
        }

        /// Selection probability of each option, in list order.
        pub fn probabilities(&self) -> Vec<f64> {
            let s = self.state.borrow();
            let options = s.wheel.options();
            (0..options.len()).filter_map(|i| options.probability(i)).collect()
        }

        /// Slice geometry at the current rotation, for custom renderers.
        pub fn layout(&self) -> Result<JsValue, JsValue> {
            let s = self.state.borrow();
            to_value(&slice_layout(s.wheel.options(), s.wheel.rotation()))
        }

        #[wasm_bindgen(js_name = "lastResult")]
        pub fn last_result(&self) -> Result<JsValue, JsValue> {
            let s = self.state.borrow();
            match s.wheel.last_result() {
                Some(result) => to_value(&s.config.celebration.outcome(result)),
                None => Ok(JsValue::NULL),
            }
        }
    }

    /// Prompt to send to the text generator for `topic`.
    #[wasm_bindgen(js_name = "generatorPrompt")]
    pub fn wasm_generator_prompt(topic: &str) -> String {
        generator::build_prompt(topic)
    }

    /// JSON schema the generator should answer with.
    #[wasm_bindgen(js_name = "generatorSchema")]
    pub fn wasm_generator_schema() -> String {
        generator::response_schema().to_string()
    }

    /// Turn a generator reply (or `undefined` after a failed request) into an
    /// option list. Never throws for bad replies: falls back to default labels.
    #[wasm_bindgen(js_name = "optionsFromGeneratorResponse")]
    pub fn wasm_options_from_generator_response(text: Option<String>) -> Result<JsValue, JsValue> {
        let outcome = match text {
            Some(text) => generator::parse_response(&text),
            None => Err(crate::error::GeneratorError::Request("no response".to_string())),
        };
        let labels = generator::labels_or_default(outcome);
        let palette = WheelConfig::default().palette;
        let options: Vec<WeightedOption> = generator::options_from_labels(&labels, &palette);
        to_value(&options)
    }

    /// The stock configuration, for hosts that want to tweak it.
    #[wasm_bindgen(js_name = "defaultConfig")]
    pub fn wasm_default_config() -> Result<JsValue, JsValue> {
        to_value(&WheelConfig::default())
    }
}
