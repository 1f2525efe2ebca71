use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Current input state for the window.
///
/// Holds "is down" information. Per-frame transitions are recorded into an
/// `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss, clear the "down" set. Avoids stuck keys
                    // when focus changes mid-press.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    let inserted = self.keys_down.insert(*key);
                    if inserted {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    let removed = self.keys_down.remove(key);
                    if removed {
                        frame.keys_released.insert(*key);
                    }
                }
            },
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key, repeat: bool) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            repeat,
        }
    }

    fn release(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Released,
            repeat: false,
        }
    }

    #[test]
    fn escape_press_sets_key_down() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(Key::Escape, false));

        assert!(state.key_down(Key::Escape));
        assert!(frame.keys_pressed.contains(&Key::Escape));
    }

    #[test]
    fn release_clears_key_down() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(Key::Escape, false));
        state.apply_event(&mut frame, release(Key::Escape));

        assert!(!state.key_down(Key::Escape));
        assert!(frame.keys_released.contains(&Key::Escape));
    }

    #[test]
    fn repeat_does_not_double_count_press() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(Key::Space, false));
        frame.clear();
        state.apply_event(&mut frame, press(Key::Space, true));

        // Still held, but no new press transition this frame.
        assert!(state.key_down(Key::Space));
        assert!(frame.keys_pressed.is_empty());
    }

    #[test]
    fn release_without_press_records_nothing() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, release(Key::Enter));

        assert!(frame.keys_released.is_empty());
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::Focused(true));
        state.apply_event(&mut frame, press(Key::Escape, false));
        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(!state.focused);
        assert!(!state.key_down(Key::Escape));
    }

    #[test]
    fn frame_clear_resets_deltas() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(Key::Escape, false));
        frame.clear();

        assert!(frame.events.is_empty());
        assert!(frame.keys_pressed.is_empty());
        // State survives the frame boundary.
        assert!(state.key_down(Key::Escape));
    }
}
