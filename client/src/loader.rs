use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, File, FileReader, HtmlImageElement, ProgressEvent};

use paintpad_shared::image::{display_url, DecodeCallback};
use paintpad_shared::{load_image, ImageDecoder, LoadError};

use crate::surface::{CanvasSurface, LoadedImage};

/// Decodes through a detached `<img>` element.
pub struct ElementDecoder {
    document: Document,
}

impl ElementDecoder {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ImageDecoder<LoadedImage> for ElementDecoder {
    fn decode(&self, url: &str, done: DecodeCallback<LoadedImage>) {
        let image = match self
            .document
            .create_element("img")
            .ok()
            .and_then(|element| element.dyn_into::<HtmlImageElement>().ok())
        {
            Some(image) => image,
            None => {
                done(Err(LoadError::Decode {
                    url: display_url(url),
                }));
                return;
            }
        };

        // Exactly one of load/error fires.
        let done = Rc::new(RefCell::new(Some(done)));
        let onload = {
            let done = done.clone();
            let image_cb = image.clone();
            Closure::once_into_js(move |_: Event| {
                let callback = done.borrow_mut().take();
                if let Some(callback) = callback {
                    callback(Ok(LoadedImage(image_cb)));
                }
            })
        };
        let onerror = {
            let url = display_url(url);
            Closure::once_into_js(move |_: Event| {
                let callback = done.borrow_mut().take();
                if let Some(callback) = callback {
                    callback(Err(LoadError::Decode { url }));
                }
            })
        };
        image.set_onload(Some(onload.unchecked_ref()));
        image.set_onerror(Some(onerror.unchecked_ref()));
        image.set_src(url);
    }
}

type ReadCallback = Box<dyn FnOnce(Result<String, LoadError>)>;

/// Reads `file` as a data URL.
pub fn read_file_as_data_url<F>(file: File, on_done: F)
where
    F: FnOnce(Result<String, LoadError>) + 'static,
{
    let name = file.name();
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(error) => {
            on_done(Err(LoadError::Read {
                name,
                reason: format!("{error:?}"),
            }));
            return;
        }
    };

    let done: Rc<RefCell<Option<ReadCallback>>> = Rc::new(RefCell::new(Some(Box::new(on_done))));
    let finish = {
        let done = done.clone();
        move |result: Result<String, LoadError>| {
            let callback = done.borrow_mut().take();
            if let Some(callback) = callback {
                callback(result);
            }
        }
    };

    let onload = {
        let reader_cb = reader.clone();
        let name = name.clone();
        let finish = finish.clone();
        Closure::once_into_js(move |_: ProgressEvent| {
            let result = reader_cb
                .result()
                .ok()
                .and_then(|value| value.as_string())
                .ok_or_else(|| LoadError::Read {
                    name,
                    reason: "reader result is not a string".into(),
                });
            finish(result);
        })
    };
    let onerror = {
        let reader_cb = reader.clone();
        let name = name.clone();
        let finish = finish.clone();
        Closure::once_into_js(move |_: ProgressEvent| {
            let reason = reader_cb
                .error()
                .map(|error| error.message())
                .unwrap_or_else(|| "unknown error".into());
            finish(Err(LoadError::Read { name, reason }));
        })
    };
    reader.set_onload(Some(onload.unchecked_ref()));
    reader.set_onerror(Some(onerror.unchecked_ref()));
    if let Err(error) = reader.read_as_data_url(&file) {
        finish(Err(LoadError::Read {
            name,
            reason: format!("{error:?}"),
        }));
    }
}

/// Loads `url` onto the surface and reports the outcome on `root`'s
/// `data-state` attribute.
pub fn load_into(surface: &Rc<CanvasSurface>, decoder: &ElementDecoder, root: &Element, url: &str) {
    let _ = root.set_attribute("data-state", "loading");
    let root = root.clone();
    let shown = display_url(url.trim());
    load_image(surface, decoder, url, move |outcome| match outcome {
        Ok((width, height)) => {
            log::info!("loaded {shown} ({width}x{height})");
            let _ = root.set_attribute("data-state", "loaded");
        }
        Err(error) => {
            log::warn!("image load failed: {error}");
            let _ = root.set_attribute("data-state", "load-error");
        }
    });
}
