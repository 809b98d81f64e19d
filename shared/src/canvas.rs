use std::rc::Rc;

use crate::host::{Prompt, RandomSource, Timers};
use crate::input::PointerHub;
use crate::surface::Surface;

/// Everything a tool reaches for while handling a gesture: the surface and
/// the host services around it. Cloning is cheap.
pub struct Canvas<S: Surface> {
    pub surface: Rc<S>,
    pub pointer: Rc<dyn PointerHub>,
    pub timers: Rc<dyn Timers>,
    pub random: Rc<dyn RandomSource>,
    pub prompt: Rc<dyn Prompt>,
}

impl<S: Surface> Clone for Canvas<S> {
    fn clone(&self) -> Self {
        Self {
            surface: self.surface.clone(),
            pointer: self.pointer.clone(),
            timers: self.timers.clone(),
            random: self.random.clone(),
            prompt: self.prompt.clone(),
        }
    }
}
