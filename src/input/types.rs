/// Logical key identity, independent of the platform key code type.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,

    /// Any key this demo does not name; carries the platform scan code.
    Unknown(u32),
}

/// Key transition direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic input event delivered by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        repeat: bool,
    },

    Focused(bool),
}
