use crate::input::PointerEvent;
use crate::Point;

/// Layout box of an element in client (viewport) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[cfg(test)]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && y >= self.top && x < self.left + self.width && y < self.top + self.height
    }
}

/// Translates an event's client position into the local space of `rect`,
/// flooring both axes. The result may be negative or past the far edge when
/// the pointer is outside the element.
pub fn relative_pos(event: &PointerEvent, rect: &Rect) -> Point {
    Point {
        x: (event.client_x - rect.left).floor() as i32,
        y: (event.client_y - rect.top).floor() as i32,
    }
}
