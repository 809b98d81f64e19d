use std::rc::Rc;

/// Mouse button as reported by `MouseEvent.button`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Primary,
    Auxiliary,
    Secondary,
    Other(i16),
}

impl Button {
    pub fn from_code(code: i16) -> Self {
        match code {
            0 => Button::Primary,
            1 => Button::Auxiliary,
            2 => Button::Secondary,
            other => Button::Other(other),
        }
    }

    pub fn is_primary(self) -> bool {
        self == Button::Primary
    }
}

/// The parts of a host pointer event the tools look at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
    pub button: Button,
}

impl PointerEvent {
    pub fn new(client_x: f64, client_y: f64, button: Button) -> Self {
        Self {
            client_x,
            client_y,
            button,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Move,
    Up,
}

impl PointerPhase {
    pub fn event_type(self) -> &'static str {
        match self {
            PointerPhase::Move => "mousemove",
            PointerPhase::Up => "mouseup",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

pub type PointerHandler = Rc<dyn Fn(&PointerEvent)>;

/// The ambient (document-wide) pointer stream a drag subscribes to.
pub trait PointerHub {
    fn listen(&self, phase: PointerPhase, handler: PointerHandler) -> ListenerId;

    /// Removing an unknown or already removed listener is a no-op.
    fn unlisten(&self, phase: PointerPhase, id: ListenerId);
}
