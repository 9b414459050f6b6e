//! Decoding of host events into table triggers.

use crate::input::queue::InputEvent;

/// DOM key code of the space bar.
pub const KEY_SPACE: u32 = 32;

/// `Custom` event kinds sent by the debug panel.
pub mod custom {
    pub const DROP_BALLS: u32 = 1;
    pub const CUE_STRIKE: u32 = 2;
    pub const WIREFRAME: u32 = 3;
    pub const CUE_FORCE: u32 = 4;
    pub const DROP_COUNT: u32 = 5;
}

/// Something the session can act on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    DropBalls,
    CueStrike,
    SetWireframe(bool),
    SetCueForce(f32),
    SetDropCount(u32),
}

impl Trigger {
    /// `None` for events with no table meaning.
    pub fn from_event(event: &InputEvent) -> Option<Self> {
        match *event {
            InputEvent::KeyDown { key_code: KEY_SPACE } => Some(Trigger::CueStrike),
            InputEvent::KeyDown { .. } => None,
            InputEvent::Custom { kind, a, .. } => match kind {
                custom::DROP_BALLS => Some(Trigger::DropBalls),
                custom::CUE_STRIKE => Some(Trigger::CueStrike),
                custom::WIREFRAME => Some(Trigger::SetWireframe(a != 0.0)),
                custom::CUE_FORCE => Some(Trigger::SetCueForce(a)),
                // Negative and fractional slider values round toward the
                // panel range; the config clamps the rest.
                custom::DROP_COUNT => Some(Trigger::SetDropCount(a.round().max(0.0) as u32)),
                _ => None,
            },
        }
    }
}
