mod control_surface;
mod keyboard;
pub use self::control_surface::{ControlAction, ControlSurface};
pub use self::keyboard::{action_for_key, KeyboardHandler};
