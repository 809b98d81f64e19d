use crate::canvas::Canvas;
use crate::input::PointerEvent;
use crate::pen::text_font;
use crate::surface::Surface;
use crate::tools::{EndHook, Tool};

/// Stamps a line of text typed into a prompt at the press position.
#[derive(Clone, Copy, Debug, Default)]
pub struct Text;

impl<S: Surface + 'static> Tool<S> for Text {
    fn activate(&self, event: &PointerEvent, canvas: &Canvas<S>, on_end: Option<EndHook<S>>) {
        let surface = canvas.surface.as_ref();
        match canvas.prompt.ask("Text:", "") {
            Some(text) if !text.is_empty() => {
                let pos = surface.relative_pos(event);
                surface.set_font(&text_font(surface.line_width()));
                surface.fill_text(&text, pos.x as f64, pos.y as f64);
            }
            _ => {}
        }
        if let Some(on_end) = on_end {
            on_end(surface);
        }
    }
}
