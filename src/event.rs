//! The raw input event written to a virtual device.

use crate::abi;
use crate::codes::{EV_KEY, EV_SYN, SYN_REPORT};

/// Key state values carried in the `value` field of an [`EV_KEY`] event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Released,
    Pressed,
    /// Autorepeat while held.
    Repeat,
}

impl KeyState {
    pub fn value(self) -> i32 {
        match self {
            KeyState::Released => 0,
            KeyState::Pressed => 1,
            KeyState::Repeat => 2,
        }
    }
}

/// One state change: a `(type, code, value)` triple.
///
/// Codes are not checked against the device's declared capabilities; an
/// undeclared code reaches the kernel as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputEvent {
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}

impl InputEvent {
    pub fn new(event_type: u16, code: u16, value: i32) -> Self {
        Self {
            event_type,
            code,
            value,
        }
    }

    /// A key event for `code` in the given state.
    pub fn key(code: u16, state: KeyState) -> Self {
        Self::new(EV_KEY, code, state.value())
    }

    /// The `SYN_REPORT` marker that closes an input frame.
    pub fn sync() -> Self {
        Self::new(EV_SYN, SYN_REPORT, 0)
    }

    pub(crate) fn to_raw(self) -> abi::input_event {
        abi::event(self.event_type, self.code, self.value)
    }
}
