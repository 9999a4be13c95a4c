use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::Color;
use crate::vec2::Vec2;

/// Minimal drawing surface the particle renderer needs. `save`/`restore`
/// bracket every particle so fill color and global alpha never leak into
/// whatever the host draws next.
pub trait DrawSurface {
    fn save(&mut self);
    fn restore(&mut self);
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_fill_color(&mut self, color: &Color);
    fn fill_circle(&mut self, center: Vec2, radius: f64);
}

impl DrawSurface for CanvasRenderingContext2d {
    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        CanvasRenderingContext2d::set_global_alpha(self, alpha);
    }

    fn set_fill_color(&mut self, color: &Color) {
        self.set_fill_style(&JsValue::from_str(&color.to_string()));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64) {
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, TAU).ok();
        self.close_path();
        self.fill();
    }
}
