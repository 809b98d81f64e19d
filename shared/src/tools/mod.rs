//! Drawing tools and the registry the tool selector dispatches through.
//!
//! A tool is activated on primary pointer-down. Tools that follow the pointer
//! start a drag session (see [`crate::drag`]); the rest finish immediately.

mod erase;
mod line;
mod spray;
mod text;

use std::rc::Rc;

pub use erase::Erase;
pub use line::Line;
pub use spray::{dots_per_tick, random_point_in_radius, Spray};
pub use text::Text;

use crate::canvas::Canvas;
use crate::input::PointerEvent;
use crate::surface::Surface;

/// Completion callback a tool runs once its gesture is over.
pub type EndHook<S> = Box<dyn FnOnce(&S)>;

pub trait Tool<S: Surface> {
    fn activate(&self, event: &PointerEvent, canvas: &Canvas<S>, on_end: Option<EndHook<S>>);
}

/// Ordered, open mapping from display name to tool.
pub struct ToolRegistry<S: Surface> {
    entries: Vec<(String, Rc<dyn Tool<S>>)>,
}

impl<S: Surface> Default for ToolRegistry<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<S: Surface + 'static> ToolRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line, Erase, Text and Spray, in that order.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("Line", Line);
        registry.register("Erase", Erase::default());
        registry.register("Text", Text);
        registry.register("Spray", Spray::default());
        registry
    }

    /// Adds a tool, or replaces the one already registered under `name`
    /// without changing its position.
    pub fn register(&mut self, name: impl Into<String>, tool: impl Tool<S> + 'static) {
        let name = name.into();
        let tool: Rc<dyn Tool<S>> = Rc::new(tool);
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = tool,
            None => self.entries.push((name, tool)),
        }
    }

    pub fn get(&self, name: &str) -> Option<Rc<dyn Tool<S>>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, tool)| tool.clone())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The selected tool ran; the host should suppress its default action.
    Handled,
    /// Not a primary-button press.
    Ignored,
    UnknownTool,
}

/// Routes a pointer-down on the surface to the tool named `selected`.
///
/// The tool is looked up on every call so a change in the selector takes
/// effect on the next press.
pub fn dispatch<S: Surface + 'static>(
    registry: &ToolRegistry<S>,
    selected: &str,
    event: &PointerEvent,
    canvas: &Canvas<S>,
) -> Dispatch {
    if !event.button.is_primary() {
        return Dispatch::Ignored;
    }
    let Some(tool) = registry.get(selected) else {
        log::warn!("no tool registered as {selected:?}");
        return Dispatch::UnknownTool;
    };
    log::debug!("dispatching pointer-down to {selected}");
    tool.activate(event, canvas, None);
    Dispatch::Handled
}
