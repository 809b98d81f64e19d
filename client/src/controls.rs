//! Toolbar controls. Each one builds its element and wires its own listeners.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlAnchorElement, HtmlInputElement, HtmlSelectElement, MouseEvent,
};

use paintpad_shared::pen::{brush_label, parse_brush_size};
use paintpad_shared::{dispatch, save_href, Canvas, Dispatch, Surface, ToolRegistry, WidgetOptions};

use crate::dom::{elt, elt_as, event_to_pointer, Child};
use crate::loader::{load_into, read_file_as_data_url, ElementDecoder};
use crate::surface::CanvasSurface;

/// What a control gets to work with while it is being built.
#[derive(Clone)]
pub struct WidgetContext {
    pub document: Document,
    pub root: Element,
    pub canvas: Canvas<CanvasSurface>,
    pub tools: Rc<ToolRegistry<CanvasSurface>>,
    pub decoder: Rc<ElementDecoder>,
    pub options: Rc<WidgetOptions>,
}

impl WidgetContext {
    pub fn surface(&self) -> &Rc<CanvasSurface> {
        &self.canvas.surface
    }

    pub fn load_url(&self, url: &str) {
        load_into(self.surface(), &self.decoder, &self.root, url);
    }
}

pub trait Control {
    fn build(&self, cx: &WidgetContext) -> Result<Element, JsValue>;
}

/// Ordered, open mapping from control name to control.
#[derive(Default)]
pub struct ControlRegistry {
    entries: Vec<(String, Box<dyn Control>)>,
}

impl ControlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("tool", ToolSelect);
        registry.register("color", ColorPicker);
        registry.register("brushSize", BrushSize);
        registry.register("save", SaveLink);
        registry.register("openFile", OpenFile);
        registry.register("openURL", OpenUrl);
        registry
    }

    /// Adds a control, or replaces the one already registered under `name`.
    pub fn register(&mut self, name: impl Into<String>, control: impl Control + 'static) {
        let name = name.into();
        let control: Box<dyn Control> = Box::new(control);
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = control,
            None => self.entries.push((name, control)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Control)> {
        self.entries
            .iter()
            .map(|(name, control)| (name.as_str(), control.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tool picker. Also owns the canvas `mousedown` listener, which dispatches to
/// whatever the picker shows at the time of the press.
pub struct ToolSelect;

impl Control for ToolSelect {
    fn build(&self, cx: &WidgetContext) -> Result<Element, JsValue> {
        let document = &cx.document;
        let select: HtmlSelectElement = elt_as(document, "select", &[], &[])?;
        for name in cx.tools.names() {
            let option = elt(document, "option", &[], &[name.into()])?;
            select.append_child(&option)?;
        }
        if let Some(tool) = cx.options.default_tool.as_deref() {
            if cx.tools.contains(tool) {
                select.set_value(tool);
            } else {
                log::warn!("default tool {tool:?} is not registered");
            }
        }

        {
            let select = select.clone();
            let tools = cx.tools.clone();
            let canvas = cx.canvas.clone();
            let onmousedown = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                let pointer = event_to_pointer(&event);
                if dispatch(&tools, &select.value(), &pointer, &canvas) == Dispatch::Handled {
                    event.prevent_default();
                }
            });
            cx.surface().canvas().add_event_listener_with_callback(
                "mousedown",
                onmousedown.as_ref().unchecked_ref(),
            )?;
            onmousedown.forget();
        }

        elt(document, "span", &[], &["Tool: ".into(), Child::node(&select)])
    }
}

/// Sets fill and stroke color together.
pub struct ColorPicker;

impl Control for ColorPicker {
    fn build(&self, cx: &WidgetContext) -> Result<Element, JsValue> {
        let input: HtmlInputElement = elt_as(&cx.document, "input", &[("type", "color")], &[])?;
        {
            let input_cb = input.clone();
            let surface = cx.surface().clone();
            let onchange = Closure::<dyn FnMut(Event)>::new(move |_| {
                surface.set_color(&input_cb.value());
            });
            input.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
            onchange.forget();
        }
        elt(&cx.document, "span", &[], &["Color: ".into(), Child::node(&input)])
    }
}

pub struct BrushSize;

impl Control for BrushSize {
    fn build(&self, cx: &WidgetContext) -> Result<Element, JsValue> {
        let document = &cx.document;
        let select: HtmlSelectElement = elt_as(document, "select", &[], &[])?;
        for size in &cx.options.brush_sizes {
            let value = size.to_string();
            let option = elt(document, "option", &[("value", value.as_str())], &[brush_label(*size).into()])?;
            select.append_child(&option)?;
        }
        // keep the pen in step with the first listed size
        if let Some(first) = cx.options.brush_sizes.first() {
            cx.surface().set_line_width(*first as f64);
        }

        {
            let select_cb = select.clone();
            let surface = cx.surface().clone();
            let onchange = Closure::<dyn FnMut(Event)>::new(move |_| {
                let value = select_cb.value();
                match parse_brush_size(&value) {
                    Some(size) => surface.set_line_width(size),
                    None => log::warn!("ignoring brush size {value:?}"),
                }
            });
            select.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
            onchange.forget();
        }
        elt(document, "span", &[], &["Brush size: ".into(), Child::node(&select)])
    }
}

/// Download link whose target is refreshed on hover and focus.
pub struct SaveLink;

impl Control for SaveLink {
    fn build(&self, cx: &WidgetContext) -> Result<Element, JsValue> {
        let link: HtmlAnchorElement = elt_as(&cx.document, "a", &[("href", "/")], &["Save".into()])?;

        let link_cb = link.clone();
        let surface = cx.surface().clone();
        let update = Closure::<dyn FnMut(Event) -> Result<(), JsValue>>::new(move |_| {
            let href = save_href(surface.export_data_url())
                .map_err(|error| JsValue::from_str(&error.to_string()))?;
            link_cb.set_href(&href);
            Ok(())
        });
        link.add_event_listener_with_callback("mouseover", update.as_ref().unchecked_ref())?;
        link.add_event_listener_with_callback("focus", update.as_ref().unchecked_ref())?;
        update.forget();

        Ok(link.into())
    }
}

pub struct OpenFile;

impl Control for OpenFile {
    fn build(&self, cx: &WidgetContext) -> Result<Element, JsValue> {
        let input: HtmlInputElement = elt_as(&cx.document, "input", &[("type", "file")], &[])?;
        {
            let input_cb = input.clone();
            let cx_cb = cx.clone();
            let onchange = Closure::<dyn FnMut(Event)>::new(move |_| {
                let Some(file) = input_cb.files().and_then(|files| files.get(0)) else {
                    return;
                };
                let cx = cx_cb.clone();
                read_file_as_data_url(file, move |result| match result {
                    Ok(url) => cx.load_url(&url),
                    Err(error) => {
                        log::warn!("{error}");
                        let _ = cx.root.set_attribute("data-state", "load-error");
                    }
                });
            });
            input.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
            onchange.forget();
        }
        elt(&cx.document, "div", &[], &["Open file: ".into(), Child::node(&input)])
    }
}

pub struct OpenUrl;

impl Control for OpenUrl {
    fn build(&self, cx: &WidgetContext) -> Result<Element, JsValue> {
        let document = &cx.document;
        let input: HtmlInputElement = elt_as(document, "input", &[("type", "text")], &[])?;
        let button = elt(document, "button", &[("type", "submit")], &["load".into()])?;
        let form = elt(
            document,
            "form",
            &[],
            &["Open URL: ".into(), Child::node(&input), Child::node(&button)],
        )?;
        {
            let input_cb = input.clone();
            let cx_cb = cx.clone();
            let onsubmit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                event.prevent_default();
                cx_cb.load_url(&input_cb.value());
            });
            form.add_event_listener_with_callback("submit", onsubmit.as_ref().unchecked_ref())?;
            onsubmit.forget();
        }
        Ok(form)
    }
}
