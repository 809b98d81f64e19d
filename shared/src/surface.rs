use crate::export::ExportError;
use crate::geometry::{relative_pos, Rect};
use crate::image::RasterImage;
use crate::input::PointerEvent;
use crate::pen::{CompositeMode, LineCap, LineJoin, PenStyle};
use crate::Point;

/// A raster surface with an immediate-mode 2D context.
///
/// Every method takes `&self`: the surface is one shared object that tools,
/// controls and the image loader all draw through, the way a canvas context
/// is shared in the browser.
pub trait Surface {
    type Image: RasterImage;

    fn bounding_rect(&self) -> Rect;

    fn relative_pos(&self, event: &PointerEvent) -> Point {
        relative_pos(event, &self.bounding_rect())
    }

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Resizing clears the bitmap and resets all pen state to defaults.
    fn resize(&self, width: u32, height: u32);

    fn begin_path(&self);
    fn move_to(&self, x: f64, y: f64);
    fn line_to(&self, x: f64, y: f64);
    fn stroke(&self);
    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64);
    fn fill_text(&self, text: &str, x: f64, y: f64);
    fn draw_image(&self, image: &Self::Image, x: f64, y: f64);

    fn fill_style(&self) -> String;
    fn set_fill_style(&self, color: &str);
    fn stroke_style(&self) -> String;
    fn set_stroke_style(&self, color: &str);
    fn line_width(&self) -> f64;
    fn set_line_width(&self, width: f64);
    fn set_line_cap(&self, cap: LineCap);
    fn set_line_join(&self, join: LineJoin);
    fn set_font(&self, font: &str);
    fn composite(&self) -> CompositeMode;
    fn set_composite(&self, mode: CompositeMode);

    /// Encodes the current bitmap as a self-contained data URL.
    fn export_data_url(&self) -> Result<String, ExportError>;

    fn set_color(&self, color: &str) {
        self.set_fill_style(color);
        self.set_stroke_style(color);
    }

    fn pen_style(&self) -> PenStyle {
        PenStyle {
            fill: self.fill_style(),
            stroke: self.stroke_style(),
            line_width: self.line_width(),
        }
    }

    fn apply_pen_style(&self, style: &PenStyle) {
        self.set_fill_style(&style.fill);
        self.set_stroke_style(&style.stroke);
        self.set_line_width(style.line_width);
    }
}
