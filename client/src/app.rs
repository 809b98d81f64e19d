use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlCanvasElement};

use paintpad_shared::tools::Spray;
use paintpad_shared::{Canvas, Surface, ToolRegistry, WidgetOptions};

use crate::controls::{ControlRegistry, WidgetContext};
use crate::dom::{debug_enabled, document_ready_state, elt, elt_as, window_and_document, Child};
use crate::host::{WindowPointerHub, WindowPrompt, WindowTimers};
use crate::loader::ElementDecoder;
use crate::surface::CanvasSurface;
use crate::util::MathRandom;

/// Attribute carrying the JSON options; also marks auto-mounted elements.
pub const OPTIONS_ATTRIBUTE: &str = "data-paintpad";

/// The standard tools, with spray timing taken from `options`.
pub fn standard_tools(options: &WidgetOptions) -> ToolRegistry<CanvasSurface> {
    let mut tools = ToolRegistry::standard();
    tools.register("Spray", Spray::with_interval(options.spray_interval_ms));
    tools
}

/// One canvas with its toolbar, appended to a parent element.
pub struct PaintWidget {
    cx: WidgetContext,
}

impl PaintWidget {
    pub fn new(
        parent: &Element,
        tools: ToolRegistry<CanvasSurface>,
        controls: &ControlRegistry,
        options: WidgetOptions,
    ) -> Result<Self, JsValue> {
        let (window, document) = window_and_document()?;

        let width = options.width.to_string();
        let height = options.height.to_string();
        let canvas: HtmlCanvasElement = elt_as(
            &document,
            "canvas",
            &[("width", width.as_str()), ("height", height.as_str())],
            &[],
        )?;
        let surface = Rc::new(CanvasSurface::new(canvas.clone())?);
        let toolbar = elt(&document, "div", &[("class", "toolbar")], &[])?;
        let panel = elt(
            &document,
            "div",
            &[("class", "picturepanel")],
            &[Child::node(&canvas)],
        )?;
        let root = elt(
            &document,
            "div",
            &[("class", "paintpad")],
            &[Child::node(&panel), Child::node(&toolbar)],
        )?;

        let cx = WidgetContext {
            document: document.clone(),
            root: root.clone(),
            canvas: Canvas {
                surface,
                pointer: Rc::new(WindowPointerHub::new(window.clone())),
                timers: Rc::new(WindowTimers::new(window.clone())),
                random: Rc::new(MathRandom),
                prompt: Rc::new(WindowPrompt::new(window)),
            },
            tools: Rc::new(tools),
            decoder: Rc::new(ElementDecoder::new(document)),
            options: Rc::new(options),
        };

        for (name, control) in controls.iter() {
            let element = control.build(&cx)?;
            toolbar.append_child(&element)?;
            log::debug!("control {name} ready");
        }
        parent.append_child(&root)?;
        log::info!(
            "paint widget mounted: {}x{}, {} tools, {} controls",
            cx.options.width,
            cx.options.height,
            cx.tools.len(),
            controls.len()
        );
        Ok(Self { cx })
    }

    pub fn surface(&self) -> &Rc<CanvasSurface> {
        self.cx.surface()
    }

    pub fn root(&self) -> &Element {
        &self.cx.root
    }

    pub fn load_url(&self, url: &str) {
        self.cx.load_url(url);
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.cx.options
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.cx.tools.names().map(str::to_string).collect()
    }
}

/// JS-facing handle to a mounted widget.
#[wasm_bindgen]
pub struct PaintHandle {
    widget: PaintWidget,
}

#[wasm_bindgen]
impl PaintHandle {
    pub fn width(&self) -> u32 {
        self.widget.surface().width()
    }

    pub fn height(&self) -> u32 {
        self.widget.surface().height()
    }

    #[wasm_bindgen(js_name = loadUrl)]
    pub fn load_url(&self, url: &str) {
        self.widget.load_url(url);
    }

    /// The canvas as a data URL; throws when the canvas cannot be read.
    #[wasm_bindgen(js_name = toDataUrl)]
    pub fn to_data_url(&self) -> Result<String, JsValue> {
        self.widget
            .surface()
            .export_data_url()
            .map_err(|error| JsValue::from_str(&error.to_string()))
    }

    #[wasm_bindgen(js_name = toolNames)]
    pub fn tool_names(&self) -> js_sys::Array {
        self.widget
            .tool_names()
            .into_iter()
            .map(|name| JsValue::from_str(&name))
            .collect()
    }

    pub fn root(&self) -> Element {
        self.widget.root().clone()
    }

    /// The options the widget was built with, as JSON.
    pub fn options(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.widget.options())
            .map_err(|error| JsValue::from_str(&error.to_string()))
    }
}

/// Builds a widget with the standard tools and controls inside `parent`.
/// Options come from the parent's `data-paintpad` attribute.
#[wasm_bindgen]
pub fn mount(parent: &Element) -> Result<PaintHandle, JsValue> {
    let options = WidgetOptions::parse_or_default(parent.get_attribute(OPTIONS_ATTRIBUTE).as_deref());
    let tools = standard_tools(&options);
    let widget = PaintWidget::new(parent, tools, &ControlRegistry::standard(), options)?;
    Ok(PaintHandle { widget })
}

fn mount_all() -> Result<(), JsValue> {
    let (_, document) = window_and_document()?;
    let targets = document.query_selector_all(&format!("[{OPTIONS_ATTRIBUTE}]"))?;
    for index in 0..targets.length() {
        let Some(target) = targets
            .get(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        if let Err(error) = mount(&target) {
            log::error!("mount failed: {error:?}");
        }
    }
    Ok(())
}

fn log_level(debug: bool) -> log::Level {
    if debug {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let (window, document) = window_and_document()?;
    console_log::init_with_level(log_level(debug_enabled(&window)))
        .map_err(|error| JsValue::from_str(&error.to_string()))?;

    if document_ready_state(&document).as_deref() == Some("complete") {
        return mount_all();
    }

    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if let Err(error) = mount_all() {
            log::error!("{error:?}");
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn debug_query_lowers_log_level() {
        assert_eq!(log_level(true), log::Level::Debug);
        assert_eq!(log_level(false), log::Level::Info);
    }
}
