use serde::{Deserialize, Serialize};

pub mod canvas;
pub mod drag;
pub mod export;
pub mod geometry;
pub mod host;
pub mod image;
pub mod input;
pub mod options;
pub mod pen;
pub mod surface;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

pub use canvas::Canvas;
pub use drag::{track, track_fn, Gesture};
pub use export::{save_href, ExportError};
pub use geometry::{relative_pos, Rect};
pub use host::{Prompt, RandomSource, TimerId, Timers};
pub use image::{load_image, replace_with_image, ImageDecoder, LoadError, RasterImage};
pub use input::{Button, ListenerId, PointerEvent, PointerHandler, PointerHub, PointerPhase};
pub use options::{OptionsError, WidgetOptions};
pub use pen::{CompositeMode, LineCap, LineJoin, PenStyle, BRUSH_SIZES};
pub use surface::Surface;
pub use tools::{dispatch, Dispatch, EndHook, Tool, ToolRegistry};

/// A surface-relative pixel position.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A sub-pixel offset, used for spray dots.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}
