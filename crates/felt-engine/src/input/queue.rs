/// Raw host events, before they are decoded into table triggers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key was pressed. `key_code` is the DOM key code.
    KeyDown { key_code: u32 },
    /// A debug panel control fired. `kind` selects the control; `a`, `b`, `c`
    /// carry its values.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Events queued by the host between frames, drained once per frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take every pending event, oldest first, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
