//! Host services the tools need besides the surface and the pointer stream.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub i32);

pub trait Timers {
    /// Returns `None` when the host refused to schedule the timer.
    fn set_interval(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Option<TimerId>;
    fn clear_interval(&self, id: TimerId);
}

/// Uniform values in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&self) -> f64;

    /// Uniform value in `[-1, 1)`.
    fn next_signed(&self) -> f64 {
        self.next_f64() * 2.0 - 1.0
    }
}

/// Blocking single-line text input. `None` means the user cancelled.
pub trait Prompt {
    fn ask(&self, message: &str, default: &str) -> Option<String>;
}
