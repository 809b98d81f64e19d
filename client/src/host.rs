use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, Window};

use paintpad_shared::{
    ListenerId, PointerHandler, PointerHub, PointerPhase, Prompt, TimerId, Timers,
};

use crate::dom::event_to_pointer;

type MouseClosure = Closure<dyn FnMut(MouseEvent)>;

/// `mousemove`/`mouseup` on the window.
pub struct WindowPointerHub {
    window: Window,
    next_id: Cell<u64>,
    listeners: RefCell<HashMap<u64, (PointerPhase, MouseClosure)>>,
    // An `unlisten` usually runs inside the mouseup closure being removed, so
    // removed closures are dropped on the next `listen` instead.
    retired: RefCell<Vec<MouseClosure>>,
}

impl WindowPointerHub {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            next_id: Cell::new(0),
            listeners: RefCell::new(HashMap::new()),
            retired: RefCell::new(Vec::new()),
        }
    }
}

impl PointerHub for WindowPointerHub {
    fn listen(&self, phase: PointerPhase, handler: PointerHandler) -> ListenerId {
        self.retired.borrow_mut().clear();
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let closure = MouseClosure::new(move |event: MouseEvent| {
            handler(&event_to_pointer(&event));
        });
        if let Err(error) = self
            .window
            .add_event_listener_with_callback(phase.event_type(), closure.as_ref().unchecked_ref())
        {
            log::error!("could not listen for {}: {error:?}", phase.event_type());
        }
        self.listeners.borrow_mut().insert(id, (phase, closure));
        ListenerId(id)
    }

    fn unlisten(&self, phase: PointerPhase, id: ListenerId) {
        let removed = self.listeners.borrow_mut().remove(&id.0);
        let Some((registered, closure)) = removed else {
            return;
        };
        debug_assert_eq!(registered, phase);
        match self.window.remove_event_listener_with_callback(
            registered.event_type(),
            closure.as_ref().unchecked_ref(),
        ) {
            Ok(()) => self.retired.borrow_mut().push(closure),
            Err(error) => {
                // The window may still call it, so it must outlive the hub.
                log::error!("could not stop {}: {error:?}", registered.event_type());
                closure.forget();
            }
        }
    }
}

/// `setInterval`/`clearInterval` on the window.
pub struct WindowTimers {
    window: Window,
    intervals: RefCell<HashMap<i32, Closure<dyn FnMut()>>>,
}

impl WindowTimers {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            intervals: RefCell::new(HashMap::new()),
        }
    }
}

impl Timers for WindowTimers {
    fn set_interval(&self, period_ms: u32, mut tick: Box<dyn FnMut()>) -> Option<TimerId> {
        let closure = Closure::<dyn FnMut()>::new(move || tick());
        let handle = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms.min(i32::MAX as u32) as i32,
            )
            .ok()?;
        self.intervals.borrow_mut().insert(handle, closure);
        Some(TimerId(handle))
    }

    fn clear_interval(&self, id: TimerId) {
        self.window.clear_interval_with_handle(id.0);
        self.intervals.borrow_mut().remove(&id.0);
    }
}

/// `window.prompt`.
pub struct WindowPrompt {
    window: Window,
}

impl WindowPrompt {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Prompt for WindowPrompt {
    fn ask(&self, message: &str, default: &str) -> Option<String> {
        self.window
            .prompt_with_message_and_default(message, default)
            .ok()
            .flatten()
    }
}
