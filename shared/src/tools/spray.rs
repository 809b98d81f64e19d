use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;

use crate::canvas::Canvas;
use crate::drag::{track, Gesture};
use crate::host::{RandomSource, TimerId, Timers};
use crate::input::PointerEvent;
use crate::options::SPRAY_INTERVAL_MS;
use crate::surface::Surface;
use crate::tools::{EndHook, Tool};
use crate::{Offset, Point};

/// Area of brush disk covered by one dot per tick.
const AREA_PER_DOT: f64 = 30.0;

/// Speckles random dots under the brush while the button is held.
#[derive(Clone, Copy, Debug)]
pub struct Spray {
    interval_ms: u32,
}

impl Default for Spray {
    fn default() -> Self {
        Self::with_interval(SPRAY_INTERVAL_MS)
    }
}

impl Spray {
    pub fn with_interval(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

pub fn dots_per_tick(radius: f64) -> u32 {
    (radius * radius * PI / AREA_PER_DOT).ceil() as u32
}

/// Uniform point in the disk of `radius` around the origin, by rejection
/// sampling from the enclosing square.
pub fn random_point_in_radius(radius: f64, random: &dyn RandomSource) -> Offset {
    loop {
        let unit = Offset {
            x: random.next_signed(),
            y: random.next_signed(),
        };
        if unit.length_squared() <= 1.0 {
            return Offset {
                x: unit.x * radius,
                y: unit.y * radius,
            };
        }
    }
}

struct SprayStroke<S: Surface> {
    surface: Rc<S>,
    position: Rc<Cell<Point>>,
    timers: Rc<dyn Timers>,
    timer: Option<TimerId>,
    on_end: Option<EndHook<S>>,
}

impl<S: Surface> Gesture for SprayStroke<S> {
    fn on_move(&mut self, event: &PointerEvent) {
        self.position.set(self.surface.relative_pos(event));
    }

    fn on_end(&mut self, _event: &PointerEvent) {
        if let Some(timer) = self.timer.take() {
            self.timers.clear_interval(timer);
        }
        if let Some(on_end) = self.on_end.take() {
            on_end(self.surface.as_ref());
        }
    }
}

impl<S: Surface + 'static> Tool<S> for Spray {
    fn activate(&self, event: &PointerEvent, canvas: &Canvas<S>, on_end: Option<EndHook<S>>) {
        let surface = canvas.surface.clone();
        let radius = surface.line_width() / 2.0;
        let dots = dots_per_tick(radius);
        let position = Rc::new(Cell::new(surface.relative_pos(event)));

        let tick = {
            let surface = surface.clone();
            let position = position.clone();
            let random = canvas.random.clone();
            move || {
                let center = position.get();
                for _ in 0..dots {
                    let offset = random_point_in_radius(radius, random.as_ref());
                    surface.fill_rect(
                        center.x as f64 + offset.x,
                        center.y as f64 + offset.y,
                        1.0,
                        1.0,
                    );
                }
            }
        };
        let timer = canvas.timers.set_interval(self.interval_ms, Box::new(tick));
        if timer.is_none() {
            log::warn!("spray timer could not be scheduled");
        }

        track(
            &canvas.pointer,
            SprayStroke {
                surface,
                position,
                timers: canvas.timers.clone(),
                timer,
                on_end,
            },
        );
    }
}
