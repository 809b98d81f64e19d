use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::input::{ListenerId, PointerEvent, PointerHandler, PointerHub, PointerPhase};

/// Per-gesture state driven by a drag session.
///
/// The session owns the gesture from pointer-down until the first pointer-up
/// and drops it right after `on_end`.
pub trait Gesture {
    fn on_move(&mut self, event: &PointerEvent);

    fn on_end(&mut self, _event: &PointerEvent) {}
}

struct DragSession<G> {
    gesture: RefCell<Option<G>>,
    listeners: Cell<Option<(ListenerId, ListenerId)>>,
}

/// Feeds ambient move events into `gesture` until the next pointer-up.
///
/// Both listeners are removed before `on_end` runs, so `on_end` fires exactly
/// once and nothing reaches the gesture afterwards.
pub fn track<G: Gesture + 'static>(hub: &Rc<dyn PointerHub>, gesture: G) {
    let session = Rc::new(DragSession {
        gesture: RefCell::new(Some(gesture)),
        listeners: Cell::new(None),
    });

    let move_session = session.clone();
    let on_move: PointerHandler = Rc::new(move |event: &PointerEvent| {
        if let Some(gesture) = move_session.gesture.borrow_mut().as_mut() {
            gesture.on_move(event);
        }
    });

    let end_session = session.clone();
    let end_hub: Weak<dyn PointerHub> = Rc::downgrade(hub);
    let on_up: PointerHandler = Rc::new(move |event: &PointerEvent| {
        let Some((move_id, up_id)) = end_session.listeners.take() else {
            return;
        };
        if let Some(hub) = end_hub.upgrade() {
            hub.unlisten(PointerPhase::Move, move_id);
            hub.unlisten(PointerPhase::Up, up_id);
        }
        let gesture = end_session.gesture.borrow_mut().take();
        if let Some(mut gesture) = gesture {
            gesture.on_end(event);
        }
        log::debug!("drag ended at ({}, {})", event.client_x, event.client_y);
    });

    let move_id = hub.listen(PointerPhase::Move, on_move);
    let up_id = hub.listen(PointerPhase::Up, on_up);
    session.listeners.set(Some((move_id, up_id)));
}

struct FnGesture<M, E> {
    on_move: M,
    on_end: Option<E>,
}

impl<M, E> Gesture for FnGesture<M, E>
where
    M: FnMut(&PointerEvent),
    E: FnOnce(&PointerEvent),
{
    fn on_move(&mut self, event: &PointerEvent) {
        (self.on_move)(event);
    }

    fn on_end(&mut self, event: &PointerEvent) {
        if let Some(on_end) = self.on_end.take() {
            on_end(event);
        }
    }
}

/// Closure form of [`track`] for callers without their own gesture type.
pub fn track_fn<M, E>(hub: &Rc<dyn PointerHub>, on_move: M, on_end: Option<E>)
where
    M: FnMut(&PointerEvent) + 'static,
    E: FnOnce(&PointerEvent) + 'static,
{
    track(hub, FnGesture { on_move, on_end });
}
