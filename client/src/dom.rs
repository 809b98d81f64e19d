use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent, Node, Window};

use paintpad_shared::{Button, PointerEvent};

/// A child handed to [`elt`]: literal text or an existing node.
pub enum Child {
    Text(String),
    Node(Node),
}

impl Child {
    pub fn node(node: &impl AsRef<Node>) -> Self {
        Child::Node(node.as_ref().clone())
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

/// Creates `<tag>` with `attributes` set and `children` appended in order.
pub fn elt(
    document: &Document,
    tag: &str,
    attributes: &[(&str, &str)],
    children: &[Child],
) -> Result<Element, JsValue> {
    let node = document.create_element(tag)?;
    for (name, value) in attributes {
        node.set_attribute(name, value)?;
    }
    for child in children {
        match child {
            Child::Text(text) => {
                node.append_child(&document.create_text_node(text))?;
            }
            Child::Node(child) => {
                node.append_child(child)?;
            }
        }
    }
    Ok(node)
}

/// [`elt`] for callers that need the concrete element type.
pub fn elt_as<T: JsCast>(
    document: &Document,
    tag: &str,
    attributes: &[(&str, &str)],
    children: &[Child],
) -> Result<T, JsValue> {
    elt(document, tag, attributes, children)?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {tag}")))
}

pub fn event_to_pointer(event: &MouseEvent) -> PointerEvent {
    PointerEvent::new(
        event.client_x() as f64,
        event.client_y() as f64,
        Button::from_code(event.button()),
    )
}

pub fn window_and_document() -> Result<(Window, Document), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    Ok((window, document))
}

pub fn debug_enabled(window: &Window) -> bool {
    let search = window.location().search().ok().unwrap_or_default();
    debug_requested(&search)
}

fn debug_requested(search: &str) -> bool {
    search.contains("debug=1")
        || search.contains("debug=true")
        || search.contains("log=1")
        || search.contains("log=true")
}

pub fn document_ready_state(document: &Document) -> Option<String> {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}
