//! In-memory stand-ins for the browser pieces, for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::canvas::Canvas;
use crate::export::ExportError;
use crate::geometry::Rect;
use crate::host::{Prompt, RandomSource, TimerId, Timers};
use crate::image::{DecodeCallback, ImageDecoder, LoadError, RasterImage};
use crate::input::{ListenerId, PointerEvent, PointerHandler, PointerHub, PointerPhase};
use crate::pen::{CompositeMode, LineCap, LineJoin};
use crate::surface::Surface;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Stroke,
    FillRect(f64, f64, f64, f64),
    FillText(String, f64, f64),
    DrawImage(u32, u32, f64, f64),
}

#[derive(Clone, Debug, PartialEq)]
struct Pen {
    fill: String,
    stroke: String,
    line_width: f64,
    line_cap: LineCap,
    line_join: LineJoin,
    font: String,
    composite: CompositeMode,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            fill: "#000000".into(),
            stroke: "#000000".into(),
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            font: "10px sans-serif".into(),
            composite: CompositeMode::SourceOver,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TestImage {
    pub width: u32,
    pub height: u32,
}

impl TestImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl RasterImage for TestImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// Records draw calls and keeps pen state the way a canvas context does,
/// including the reset on resize.
pub struct RecordingSurface {
    rect: Cell<Rect>,
    size: Cell<(u32, u32)>,
    pen: RefCell<Pen>,
    ops: RefCell<Vec<DrawOp>>,
    stroke_modes: RefCell<Vec<CompositeMode>>,
    export: RefCell<Result<String, ExportError>>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            rect: Cell::new(Rect::new(0.0, 0.0, width as f64, height as f64)),
            size: Cell::new((width, height)),
            pen: RefCell::new(Pen::default()),
            ops: RefCell::new(Vec::new()),
            stroke_modes: RefCell::new(Vec::new()),
            export: RefCell::new(Ok("data:image/png;base64,".into())),
        }
    }

    pub fn place_at(&self, left: f64, top: f64) {
        let rect = self.rect.get();
        self.rect.set(Rect::new(left, top, rect.width, rect.height));
    }

    pub fn ops(&self) -> Vec<DrawOp> {
        self.ops.borrow().clone()
    }

    pub fn images_drawn(&self) -> Vec<(u32, u32, f64, f64)> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                DrawOp::DrawImage(w, h, x, y) => Some((*w, *h, *x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn strokes_with(&self, mode: CompositeMode) -> usize {
        self.stroke_modes
            .borrow()
            .iter()
            .filter(|used| **used == mode)
            .count()
    }

    pub fn line_cap(&self) -> LineCap {
        self.pen.borrow().line_cap
    }

    pub fn line_join(&self) -> LineJoin {
        self.pen.borrow().line_join
    }

    pub fn font(&self) -> String {
        self.pen.borrow().font.clone()
    }

    pub fn fail_export(&self, error: ExportError) {
        *self.export.borrow_mut() = Err(error);
    }

    fn record(&self, op: DrawOp) {
        self.ops.borrow_mut().push(op);
    }
}

impl Surface for RecordingSurface {
    type Image = TestImage;

    fn bounding_rect(&self) -> Rect {
        self.rect.get()
    }

    fn width(&self) -> u32 {
        self.size.get().0
    }

    fn height(&self) -> u32 {
        self.size.get().1
    }

    fn resize(&self, width: u32, height: u32) {
        self.size.set((width, height));
        *self.pen.borrow_mut() = Pen::default();
    }

    fn begin_path(&self) {
        self.record(DrawOp::BeginPath);
    }

    fn move_to(&self, x: f64, y: f64) {
        self.record(DrawOp::MoveTo(x, y));
    }

    fn line_to(&self, x: f64, y: f64) {
        self.record(DrawOp::LineTo(x, y));
    }

    fn stroke(&self) {
        let mode = self.pen.borrow().composite;
        self.stroke_modes.borrow_mut().push(mode);
        self.record(DrawOp::Stroke);
    }

    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.record(DrawOp::FillRect(x, y, width, height));
    }

    fn fill_text(&self, text: &str, x: f64, y: f64) {
        self.record(DrawOp::FillText(text.to_string(), x, y));
    }

    fn draw_image(&self, image: &TestImage, x: f64, y: f64) {
        self.record(DrawOp::DrawImage(image.width, image.height, x, y));
    }

    fn fill_style(&self) -> String {
        self.pen.borrow().fill.clone()
    }

    fn set_fill_style(&self, color: &str) {
        self.pen.borrow_mut().fill = color.to_string();
    }

    fn stroke_style(&self) -> String {
        self.pen.borrow().stroke.clone()
    }

    fn set_stroke_style(&self, color: &str) {
        self.pen.borrow_mut().stroke = color.to_string();
    }

    fn line_width(&self) -> f64 {
        self.pen.borrow().line_width
    }

    fn set_line_width(&self, width: f64) {
        self.pen.borrow_mut().line_width = width;
    }

    fn set_line_cap(&self, cap: LineCap) {
        self.pen.borrow_mut().line_cap = cap;
    }

    fn set_line_join(&self, join: LineJoin) {
        self.pen.borrow_mut().line_join = join;
    }

    fn set_font(&self, font: &str) {
        self.pen.borrow_mut().font = font.to_string();
    }

    fn composite(&self) -> CompositeMode {
        self.pen.borrow().composite
    }

    fn set_composite(&self, mode: CompositeMode) {
        self.pen.borrow_mut().composite = mode;
    }

    fn export_data_url(&self) -> Result<String, ExportError> {
        self.export.borrow().clone()
    }
}

/// Pointer stream fired by hand.
#[derive(Default)]
pub struct ManualHub {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(PointerPhase, ListenerId, PointerHandler)>>,
}

impl ManualHub {
    pub fn fire(&self, phase: PointerPhase, event: &PointerEvent) {
        let handlers: Vec<PointerHandler> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(listening, _, _)| *listening == phase)
            .map(|(_, _, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl PointerHub for ManualHub {
    fn listen(&self, phase: PointerPhase, handler: PointerHandler) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((phase, id, handler));
        id
    }

    fn unlisten(&self, phase: PointerPhase, id: ListenerId) {
        self.listeners
            .borrow_mut()
            .retain(|(listening, existing, _)| !(*listening == phase && *existing == id));
    }
}

/// Interval timers advanced by hand.
#[derive(Default)]
pub struct ManualTimers {
    next_id: Cell<i32>,
    timers: RefCell<BTreeMap<i32, Rc<RefCell<Box<dyn FnMut()>>>>>,
    periods: RefCell<Vec<u32>>,
    cleared: Cell<usize>,
}

impl ManualTimers {
    /// Runs every live timer once.
    pub fn tick_all(&self) {
        let ticks: Vec<_> = self.timers.borrow().values().cloned().collect();
        for tick in ticks {
            (tick.borrow_mut())();
        }
    }

    pub fn active(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn periods(&self) -> Vec<u32> {
        self.periods.borrow().clone()
    }

    pub fn cleared(&self) -> usize {
        self.cleared.get()
    }
}

impl Timers for ManualTimers {
    fn set_interval(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Option<TimerId> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.timers
            .borrow_mut()
            .insert(id, Rc::new(RefCell::new(tick)));
        self.periods.borrow_mut().push(period_ms);
        Some(TimerId(id))
    }

    fn clear_interval(&self, id: TimerId) {
        if self.timers.borrow_mut().remove(&id.0).is_some() {
            self.cleared.set(self.cleared.get() + 1);
        }
    }
}

/// xorshift64*; deterministic and good enough for distribution checks.
pub struct SeqRandom {
    state: Cell<u64>,
}

impl SeqRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            state: Cell::new(seed.max(1)),
        }
    }
}

impl RandomSource for SeqRandom {
    fn next_f64(&self) -> f64 {
        let mut x = self.state.get();
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state.set(x);
        let bits = x.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 11;
        bits as f64 / (1u64 << 53) as f64
    }
}

#[derive(Default)]
pub struct ScriptedPrompt {
    answer: RefCell<Option<String>>,
    asked: RefCell<Vec<(String, String)>>,
}

impl ScriptedPrompt {
    pub fn answer(&self, answer: Option<&str>) {
        *self.answer.borrow_mut() = answer.map(str::to_string);
    }

    pub fn asked(&self) -> Vec<(String, String)> {
        self.asked.borrow().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&self, message: &str, default: &str) -> Option<String> {
        self.asked
            .borrow_mut()
            .push((message.to_string(), default.to_string()));
        self.answer.borrow().clone()
    }
}

/// Decoder that knows a fixed set of URLs and answers when told to.
#[derive(Default)]
pub struct StubDecoder {
    images: BTreeMap<String, TestImage>,
    pending: RefCell<Vec<(String, DecodeCallback<TestImage>)>>,
}

impl StubDecoder {
    pub fn with_image(url: &str, image: TestImage) -> Self {
        let mut decoder = Self::default();
        decoder.images.insert(url.to_string(), image);
        decoder
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn finish_all(&self) {
        let pending = std::mem::take(&mut *self.pending.borrow_mut());
        for (url, done) in pending {
            match self.images.get(&url) {
                Some(image) => done(Ok(*image)),
                None => done(Err(LoadError::Decode { url })),
            }
        }
    }
}

impl ImageDecoder<TestImage> for StubDecoder {
    fn decode(&self, url: &str, done: DecodeCallback<TestImage>) {
        self.pending.borrow_mut().push((url.to_string(), done));
    }
}

pub struct Harness {
    pub surface: Rc<RecordingSurface>,
    pub hub: Rc<ManualHub>,
    pub timers: Rc<ManualTimers>,
    pub prompt: Rc<ScriptedPrompt>,
}

pub fn test_canvas(width: u32, height: u32) -> (Canvas<RecordingSurface>, Harness) {
    let harness = Harness {
        surface: Rc::new(RecordingSurface::new(width, height)),
        hub: Rc::new(ManualHub::default()),
        timers: Rc::new(ManualTimers::default()),
        prompt: Rc::new(ScriptedPrompt::default()),
    };
    let canvas = Canvas {
        surface: harness.surface.clone(),
        pointer: harness.hub.clone(),
        timers: harness.timers.clone(),
        random: Rc::new(SeqRandom::new(7)),
        prompt: harness.prompt.clone(),
    };
    (canvas, harness)
}
