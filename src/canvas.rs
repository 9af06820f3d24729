//! Canvas 2D drawing of the wheel face.
//!
//! Pure presentation: every angle comes from [`crate::render::slice_layout`],
//! so the drawn slice under the pointer is the one the engine reports.

use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use crate::render::{slice_layout, WheelChrome, DARK_TEXT};
use crate::types::WheelOptions;

const HUB_ACCENT: &str = "#cc9933";
const INNER_RING: &str = "#ffffff22";
const OUTER_RING: &str = "#cc993333";
const LABEL_FONT: &str = "bold 18px \"Plus Jakarta Sans\"";

pub fn draw_wheel(
    ctx: &CanvasRenderingContext2d,
    size: f64,
    options: &WheelOptions,
    rotation: f64,
    chrome: &WheelChrome,
) -> Result<(), JsValue> {
    let center = size / 2.0;
    let radius = chrome.slice_radius(size);
    let full = std::f64::consts::TAU;

    ctx.clear_rect(0.0, 0.0, size, size);

    for slice in slice_layout(options, rotation) {
        ctx.begin_path();
        ctx.move_to(center, center);
        ctx.arc(center, center, radius, slice.start_angle, slice.end_angle)?;
        ctx.set_fill_style_str(&slice.fill);
        ctx.fill();

        ctx.set_stroke_style_str(DARK_TEXT);
        ctx.set_line_width(2.0);
        ctx.stroke();

        ctx.save();
        ctx.translate(center, center)?;
        ctx.rotate(slice.mid_angle)?;
        ctx.set_text_align("right");
        ctx.set_fill_style_str(slice.text_color);
        ctx.set_font(LABEL_FONT);
        ctx.fill_text(&slice.label, radius - chrome.label_inset, 6.0)?;
        ctx.restore();
    }

    ctx.begin_path();
    ctx.arc(center, center, radius + chrome.inner_ring_offset, 0.0, full)?;
    ctx.set_stroke_style_str(INNER_RING);
    ctx.set_line_width(1.0);
    ctx.stroke();

    ctx.begin_path();
    ctx.arc(center, center, radius + chrome.outer_ring_offset, 0.0, full)?;
    ctx.set_stroke_style_str(OUTER_RING);
    ctx.set_line_width(2.0);
    ctx.stroke();

    ctx.begin_path();
    ctx.arc(center, center, chrome.hub_radius, 0.0, full)?;
    ctx.set_fill_style_str(DARK_TEXT);
    ctx.fill();
    ctx.set_stroke_style_str(HUB_ACCENT);
    ctx.set_line_width(4.0);
    ctx.stroke();

    ctx.begin_path();
    ctx.arc(center, center, chrome.hub_dot_radius, 0.0, full)?;
    ctx.set_fill_style_str(HUB_ACCENT);
    ctx.fill();

    Ok(())
}
