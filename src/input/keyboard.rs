use super::control_surface::{ControlAction, ControlSurface};
use crate::synth::{chord_for_key, SynthConfig, SynthControl};
use device_query::{DeviceQuery, DeviceState, Keycode};
use std::collections::HashMap;

/// Maps a key to its action. Chord letters come from the chord table.
pub fn action_for_key(key: Keycode) -> Option<ControlAction> {
    let action = match key {
        Keycode::Space => ControlAction::ToggleMaster,
        Keycode::Key1 => ControlAction::FocusVoice(0),
        Keycode::Key2 => ControlAction::FocusVoice(1),
        Keycode::Key3 => ControlAction::FocusVoice(2),
        Keycode::Up => ControlAction::NudgeFrequency { semitones: 1 },
        Keycode::Down => ControlAction::NudgeFrequency { semitones: -1 },
        Keycode::Right => ControlAction::NudgeGain { steps: 1 },
        Keycode::Left => ControlAction::NudgeGain { steps: -1 },
        Keycode::Escape => ControlAction::Quit,
        other => return letter(other).and_then(chord_for_key).map(ControlAction::SelectChord),
    };
    Some(action)
}

fn letter(key: Keycode) -> Option<char> {
    match key {
        Keycode::A => Some('A'),
        Keycode::C => Some('C'),
        Keycode::F => Some('F'),
        Keycode::G => Some('G'),
        _ => None,
    }
}

/// Polls the keyboard and fires an action on each key's press edge.
pub struct KeyboardHandler {
    device_state: DeviceState,
    key_states: HashMap<Keycode, bool>,
    surface: ControlSurface,
}

impl KeyboardHandler {
    pub fn new(config: SynthConfig) -> Self {
        Self {
            device_state: DeviceState::new(),
            key_states: HashMap::new(),
            surface: ControlSurface::new(config),
        }
    }

    /// Returns `false` once the quit key was pressed.
    pub fn update(&mut self, control: &mut SynthControl) -> bool {
        let keys: Vec<Keycode> = self.device_state.get_keys();
        let pressed = self.pressed_edges(&keys);

        let mut running = true;
        for key in pressed {
            if let Some(action) = action_for_key(key) {
                tracing::debug!(?key, ?action, "key pressed");
                running &= self.surface.apply(action, control);
            }
        }
        running
    }

    /// Keys down now that were up on the previous poll.
    fn pressed_edges(&mut self, keys: &[Keycode]) -> Vec<Keycode> {
        let mut pressed = Vec::new();
        for key in keys {
            let was_pressed = self.key_states.get(key).copied().unwrap_or(false);
            if !was_pressed {
                pressed.push(*key);
            }
        }
        for (key, state) in self.key_states.iter_mut() {
            *state = keys.contains(key);
        }
        for key in keys {
            self.key_states.insert(*key, true);
        }
        pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chord_keys_follow_the_table() {
        assert_eq!(action_for_key(Keycode::C), Some(ControlAction::SelectChord(0)));
        assert_eq!(action_for_key(Keycode::A), Some(ControlAction::SelectChord(1)));
        assert_eq!(action_for_key(Keycode::F), Some(ControlAction::SelectChord(2)));
        assert_eq!(action_for_key(Keycode::G), Some(ControlAction::SelectChord(3)));
    }

    #[test]
    fn transport_and_edit_keys() {
        assert_eq!(action_for_key(Keycode::Space), Some(ControlAction::ToggleMaster));
        assert_eq!(action_for_key(Keycode::Key3), Some(ControlAction::FocusVoice(2)));
        assert_eq!(
            action_for_key(Keycode::Down),
            Some(ControlAction::NudgeFrequency { semitones: -1 })
        );
        assert_eq!(action_for_key(Keycode::Escape), Some(ControlAction::Quit));
        assert_eq!(action_for_key(Keycode::Z), None);
    }
}
