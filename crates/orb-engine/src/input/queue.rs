use glam::Vec2;

/// Input events the engine understands, in world coordinates.
/// `pointer` identifies the touch (or 0 for the mouse).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32, pointer: u32 },
    PointerMove { x: f32, y: f32, pointer: u32 },
    PointerUp { x: f32, y: f32, pointer: u32 },
    /// The platform took the touch away (gesture, focus loss).
    PointerCancel { x: f32, y: f32, pointer: u32 },
}

impl InputEvent {
    pub fn pointer(&self) -> u32 {
        match *self {
            InputEvent::PointerDown { pointer, .. }
            | InputEvent::PointerMove { pointer, .. }
            | InputEvent::PointerUp { pointer, .. }
            | InputEvent::PointerCancel { pointer, .. } => pointer,
        }
    }

    pub fn position(&self) -> Vec2 {
        match *self {
            InputEvent::PointerDown { x, y, .. }
            | InputEvent::PointerMove { x, y, .. }
            | InputEvent::PointerUp { x, y, .. }
            | InputEvent::PointerCancel { x, y, .. } => Vec2::new(x, y),
        }
    }
}

/// JS pushes events in; the runner hands the whole batch to the game once per tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Follows a single touch: the first pointer that goes down owns the gesture
/// until it goes up or is cancelled. Other pointers are ignored meanwhile.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrimaryPointer {
    active: Option<u32>,
}

impl PrimaryPointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the event if it belongs to the primary pointer, claiming the
    /// pointer on a down event when none is held.
    pub fn filter(&mut self, event: InputEvent) -> Option<InputEvent> {
        let id = event.pointer();
        match event {
            InputEvent::PointerDown { .. } => match self.active {
                None => {
                    self.active = Some(id);
                    Some(event)
                }
                Some(_) => None,
            },
            InputEvent::PointerMove { .. } => (self.active == Some(id)).then_some(event),
            InputEvent::PointerUp { .. } | InputEvent::PointerCancel { .. } => {
                if self.active == Some(id) {
                    self.active = None;
                    Some(event)
                } else {
                    None
                }
            }
        }
    }

    pub fn is_down(&self) -> bool {
        self.active.is_some()
    }

    pub fn reset(&mut self) {
        self.active = None;
    }
}
