/// Keyboard input and the toggles it drives
use log::debug;

use crate::config::ControlsConfig;

/// Keys the demo reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable key, always lowercase
    Char(char),
    Left,
    Right,
    Up,
    Down,
}

/// Discrete events drained from the window once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The window was asked to close
    QuitRequested,
    KeyDown(Key),
}

/// Outcome of a discrete event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopSignal {
    Continue,
    Quit,
}

/// User-controlled flags and manual offsets
#[derive(Debug, Clone, PartialEq)]
pub struct InputState {
    pub rotation_on: bool,
    pub translation_on: bool,
    pub scaling_on: bool,
    pub mirroring_on: bool,
    pub manual_tx: f32,
    pub manual_ty: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            rotation_on: true,
            translation_on: true,
            scaling_on: true,
            mirroring_on: false,
            manual_tx: 0.0,
            manual_ty: 0.0,
        }
    }

    /// Apply a discrete event: toggle keys flip their flag, quit events stop the loop
    pub fn apply_discrete_event(
        &mut self,
        event: InputEvent,
        controls: &ControlsConfig,
    ) -> LoopSignal {
        let key = match event {
            InputEvent::QuitRequested => return LoopSignal::Quit,
            InputEvent::KeyDown(key) => key,
        };

        let (name, flag) = if key == controls.quit {
            return LoopSignal::Quit;
        } else if key == controls.toggle_rotation {
            ("rotation", &mut self.rotation_on)
        } else if key == controls.toggle_translation {
            ("translation", &mut self.translation_on)
        } else if key == controls.toggle_scaling {
            ("scaling", &mut self.scaling_on)
        } else if key == controls.toggle_mirroring {
            ("mirroring", &mut self.mirroring_on)
        } else {
            return LoopSignal::Continue;
        };

        *flag = !*flag;
        debug!("{} toggled {}", name, if *flag { "on" } else { "off" });
        LoopSignal::Continue
    }

    /// Move the ship for every held directional key; opposite keys cancel out
    pub fn apply_continuous_input(
        &mut self,
        controls: &ControlsConfig,
        is_held: impl Fn(Key) -> bool,
        dt: f32,
    ) {
        let step = controls.movement_speed * dt;
        if is_held(controls.left) {
            self.manual_tx -= step;
        }
        if is_held(controls.right) {
            self.manual_tx += step;
        }
        if is_held(controls.up) {
            self.manual_ty += step;
        }
        if is_held(controls.down) {
            self.manual_ty -= step;
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
