use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, DomException, HtmlCanvasElement, HtmlImageElement};

use paintpad_shared::{CompositeMode, ExportError, LineCap, LineJoin, RasterImage, Rect, Surface};

/// A decoded `<img>` ready to be drawn.
pub struct LoadedImage(pub HtmlImageElement);

impl RasterImage for LoadedImage {
    fn width(&self) -> u32 {
        self.0.natural_width()
    }

    fn height(&self) -> u32 {
        self.0.natural_height()
    }
}

/// `<canvas>` plus its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    // fillStyle/strokeStyle may hold gradients; those read back as "".
    fn style_string(&self, property: &str) -> String {
        Reflect::get(self.ctx.as_ref(), &JsValue::from_str(property))
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_default()
    }
}

fn export_error(error: JsValue) -> ExportError {
    match error.dyn_ref::<DomException>() {
        Some(exception) if exception.name() == "SecurityError" => {
            ExportError::Tainted(format!("{}: {}", exception.name(), exception.message()))
        }
        Some(exception) => {
            ExportError::Other(format!("{}: {}", exception.name(), exception.message()))
        }
        None => ExportError::Other(error.as_string().unwrap_or_else(|| format!("{error:?}"))),
    }
}

impl Surface for CanvasSurface {
    type Image = LoadedImage;

    fn bounding_rect(&self) -> Rect {
        let rect = self.canvas.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn begin_path(&self) {
        self.ctx.begin_path();
    }

    fn move_to(&self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn stroke(&self) {
        self.ctx.stroke();
    }

    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn fill_text(&self, text: &str, x: f64, y: f64) {
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn draw_image(&self, image: &LoadedImage, x: f64, y: f64) {
        if let Err(error) = self.ctx.draw_image_with_html_image_element(&image.0, x, y) {
            log::warn!("drawImage failed: {error:?}");
        }
    }

    fn fill_style(&self) -> String {
        self.style_string("fillStyle")
    }

    fn set_fill_style(&self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn stroke_style(&self) -> String {
        self.style_string("strokeStyle")
    }

    fn set_stroke_style(&self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn line_width(&self) -> f64 {
        self.ctx.line_width()
    }

    fn set_line_width(&self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_cap(&self, cap: LineCap) {
        self.ctx.set_line_cap(cap.as_str());
    }

    fn set_line_join(&self, join: LineJoin) {
        self.ctx.set_line_join(join.as_str());
    }

    fn set_font(&self, font: &str) {
        self.ctx.set_font(font);
    }

    fn composite(&self) -> CompositeMode {
        self.ctx
            .global_composite_operation()
            .ok()
            .and_then(|mode| CompositeMode::parse(&mode))
            .unwrap_or_default()
    }

    fn set_composite(&self, mode: CompositeMode) {
        let _ = self.ctx.set_global_composite_operation(mode.as_str());
    }

    fn export_data_url(&self) -> Result<String, ExportError> {
        self.canvas.to_data_url().map_err(export_error)
    }
}
