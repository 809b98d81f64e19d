use std::rc::Rc;

use crate::canvas::Canvas;
use crate::drag::{track, Gesture};
use crate::input::PointerEvent;
use crate::pen::{LineCap, LineJoin};
use crate::surface::Surface;
use crate::tools::{EndHook, Tool};
use crate::Point;

/// Freehand stroke following the pointer.
#[derive(Clone, Copy, Debug, Default)]
pub struct Line;

/// One segment per move event; the round cap and join make consecutive
/// segments read as one stroke.
struct LineStroke<S: Surface> {
    surface: Rc<S>,
    last: Point,
    on_end: Option<EndHook<S>>,
}

impl<S: Surface> Gesture for LineStroke<S> {
    fn on_move(&mut self, event: &PointerEvent) {
        let surface = self.surface.as_ref();
        surface.begin_path();
        surface.move_to(self.last.x as f64, self.last.y as f64);
        self.last = surface.relative_pos(event);
        surface.line_to(self.last.x as f64, self.last.y as f64);
        surface.stroke();
    }

    fn on_end(&mut self, _event: &PointerEvent) {
        if let Some(on_end) = self.on_end.take() {
            on_end(self.surface.as_ref());
        }
    }
}

impl<S: Surface + 'static> Tool<S> for Line {
    fn activate(&self, event: &PointerEvent, canvas: &Canvas<S>, on_end: Option<EndHook<S>>) {
        let surface = canvas.surface.clone();
        surface.set_line_cap(LineCap::Round);
        surface.set_line_join(LineJoin::Round);
        let last = surface.relative_pos(event);
        track(
            &canvas.pointer,
            LineStroke {
                surface,
                last,
                on_end,
            },
        );
    }
}
