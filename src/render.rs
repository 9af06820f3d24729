//! Slice layout for the renderer.
//!
//! Uses the same index → angle mapping as [`crate::rotation`]: slice `i` spans
//! `[i * s + rotation, (i + 1) * s + rotation)`, so whatever the pointer sits on
//! visually is what [`crate::rotation::landed_index`] reports.

use serde::Serialize;

use crate::rotation::slice_angle;
use crate::types::WheelOptions;

pub const DARK_TEXT: &str = "#2d4a3e";
pub const LIGHT_TEXT: &str = "#ffffff";

/// Fills brighter than this get dark label text.
const BRIGHTNESS_THRESHOLD: f64 = 0.75;

/// Screen geometry of one slice at a given rotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceGeometry {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub mid_angle: f64,
    pub label: String,
    pub fill: String,
    pub text_color: &'static str,
}

pub fn slice_layout(options: &WheelOptions, rotation: f64) -> Vec<SliceGeometry> {
    let s = slice_angle(options.len());
    options
        .iter()
        .enumerate()
        .map(|(i, opt)| {
            let start_angle = i as f64 * s + rotation;
            SliceGeometry {
                index: i,
                start_angle,
                end_angle: start_angle + s,
                mid_angle: start_angle + s / 2.0,
                label: opt.label.to_uppercase(),
                fill: opt.color.clone(),
                text_color: text_color_for(&opt.color),
            }
        })
        .collect()
}

/// Parse `#rgb` or `#rrggbb` (alpha suffixes ignored).
fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 | 4 => {
            let r = channel(&hex[0..1])?;
            let g = channel(&hex[1..2])?;
            let b = channel(&hex[2..3])?;
            Some((r * 17, g * 17, b * 17))
        }
        6 | 8 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}

/// Label color that stays readable on `fill`.
pub fn text_color_for(fill: &str) -> &'static str {
    match parse_hex_color(fill) {
        Some((r, g, b)) => {
            let brightness = (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0;
            if brightness > BRIGHTNESS_THRESHOLD {
                DARK_TEXT
            } else {
                LIGHT_TEXT
            }
        }
        None => LIGHT_TEXT,
    }
}

/// Fixed decorative chrome around the slices, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelChrome {
    /// Gap between the canvas edge and the slice radius.
    pub margin: f64,
    pub inner_ring_offset: f64,
    pub outer_ring_offset: f64,
    pub hub_radius: f64,
    pub hub_dot_radius: f64,
    pub label_inset: f64,
}

impl Default for WheelChrome {
    fn default() -> Self {
        Self {
            margin: 20.0,
            inner_ring_offset: 5.0,
            outer_ring_offset: 15.0,
            hub_radius: 30.0,
            hub_dot_radius: 5.0,
            label_inset: 40.0,
        }
    }
}

impl WheelChrome {
    pub fn slice_radius(&self, canvas_size: f64) -> f64 {
        (canvas_size / 2.0 - self.margin).max(0.0)
    }
}
