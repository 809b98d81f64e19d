use crate::canvas::Canvas;
use crate::input::PointerEvent;
use crate::pen::CompositeMode;
use crate::surface::Surface;
use crate::tools::{EndHook, Line, Tool};

/// A [`Line`] drawn with `destination-out`, so the stroke removes pixels.
#[derive(Clone, Copy, Debug, Default)]
pub struct Erase {
    line: Line,
}

impl<S: Surface + 'static> Tool<S> for Erase {
    fn activate(&self, event: &PointerEvent, canvas: &Canvas<S>, on_end: Option<EndHook<S>>) {
        canvas.surface.set_composite(CompositeMode::DestinationOut);
        let restore: EndHook<S> = Box::new(move |surface: &S| {
            surface.set_composite(CompositeMode::SourceOver);
            if let Some(on_end) = on_end {
                on_end(surface);
            }
        });
        self.line.activate(event, canvas, Some(restore));
    }
}
