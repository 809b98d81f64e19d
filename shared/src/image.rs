use std::rc::Rc;

use thiserror::Error;

use crate::surface::Surface;

pub trait RasterImage {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoadError {
    #[error("no image url given")]
    EmptyUrl,
    #[error("could not load image from {url}")]
    Decode { url: String },
    #[error("could not read {name}: {reason}")]
    Read { name: String, reason: String },
}

pub type DecodeCallback<I> = Box<dyn FnOnce(Result<I, LoadError>)>;

/// Asynchronous "fetch bytes, decode as image". `done` is called at most once.
pub trait ImageDecoder<I> {
    fn decode(&self, url: &str, done: DecodeCallback<I>);
}

/// Shortens data URLs for log lines.
pub fn display_url(url: &str) -> String {
    const MAX_CHARS: usize = 64;
    match url.char_indices().nth(MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &url[..cut]),
        None => url.to_string(),
    }
}

/// Replaces the surface contents with `image`, keeping the user's pen.
pub fn replace_with_image<S: Surface>(surface: &S, image: &S::Image) -> (u32, u32) {
    let pen = surface.pen_style();
    let (width, height) = (image.width(), image.height());
    surface.resize(width, height);
    surface.draw_image(image, 0.0, 0.0);
    surface.apply_pen_style(&pen);
    (width, height)
}

/// Decodes `url` and, once it arrives, replaces the surface contents with it.
/// The surface is left untouched when decoding fails.
pub fn load_image<S, F>(surface: &Rc<S>, decoder: &dyn ImageDecoder<S::Image>, url: &str, on_done: F)
where
    S: Surface + 'static,
    F: FnOnce(Result<(u32, u32), LoadError>) + 'static,
{
    let url = url.trim();
    if url.is_empty() {
        on_done(Err(LoadError::EmptyUrl));
        return;
    }
    let surface = surface.clone();
    decoder.decode(
        url,
        Box::new(move |decoded| {
            on_done(decoded.map(|image| replace_with_image(surface.as_ref(), &image)));
        }),
    );
}
