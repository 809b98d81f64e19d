mod app;
mod controls;
mod dom;
mod host;
mod loader;
mod surface;
mod util;

pub use app::{mount, run, standard_tools, PaintHandle, PaintWidget, OPTIONS_ATTRIBUTE};
pub use controls::{
    BrushSize, ColorPicker, Control, ControlRegistry, OpenFile, OpenUrl, SaveLink, ToolSelect,
    WidgetContext,
};
pub use dom::{elt, Child};
pub use surface::{CanvasSurface, LoadedImage};
