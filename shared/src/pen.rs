/// Brush sizes offered by the brush size control, in pixels.
pub const BRUSH_SIZES: [u32; 11] = [1, 2, 3, 5, 8, 12, 25, 35, 50, 75, 100];

pub const MIN_FONT_SIZE: f64 = 7.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompositeMode {
    #[default]
    SourceOver,
    DestinationOut,
}

impl CompositeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CompositeMode::SourceOver => "source-over",
            CompositeMode::DestinationOut => "destination-out",
        }
    }

    /// Modes the widget never sets itself read back as `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "source-over" => Some(CompositeMode::SourceOver),
            "destination-out" => Some(CompositeMode::DestinationOut),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    pub fn as_str(self) -> &'static str {
        match self {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        }
    }
}

/// The user-chosen part of the pen: what the color and brush size controls
/// set, and what survives an image load.
#[derive(Clone, Debug, PartialEq)]
pub struct PenStyle {
    pub fill: String,
    pub stroke: String,
    pub line_width: f64,
}

pub fn parse_brush_size(value: &str) -> Option<f64> {
    let size = value.trim().parse::<f64>().ok()?;
    if size.is_finite() && size > 0.0 {
        Some(size)
    } else {
        None
    }
}

pub fn brush_label(size: u32) -> String {
    format!("{size} pixels")
}

/// CSS font used by the text tool for the given brush width.
pub fn text_font(line_width: f64) -> String {
    format!("{}px sans-serif", line_width.max(MIN_FONT_SIZE))
}
