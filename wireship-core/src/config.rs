/// Demo configuration
///
/// Every tunable of the demo lives here. There is no file or command line
/// loading; `DemoConfig::default()` is the configuration.
use crate::input::Key;
use crate::render::Color;
use crate::text::FontSpec;

/// Window surface settings
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Background clear color
    pub clear_color: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
            title: "Interactive Spaceship".to_string(),
            clear_color: Color::BLACK,
        }
    }
}

/// Speeds and amplitudes of the oscillating transforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    /// Degrees per second
    pub rotation_speed: f32,
    pub translation_amplitude: f32,
    pub scaling_base: f32,
    pub scaling_variation: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 90.0,
            translation_amplitude: 3.0,
            scaling_base: 2.0,
            scaling_variation: 0.5,
        }
    }
}

/// Key bindings and manual movement
#[derive(Debug, Clone, PartialEq)]
pub struct ControlsConfig {
    pub quit: Key,
    pub toggle_rotation: Key,
    pub toggle_translation: Key,
    pub toggle_scaling: Key,
    pub toggle_mirroring: Key,
    pub left: Key,
    pub right: Key,
    pub up: Key,
    pub down: Key,
    /// Manual movement in world units per second
    pub movement_speed: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            quit: Key::Char('q'),
            toggle_rotation: Key::Char('r'),
            toggle_translation: Key::Char('t'),
            toggle_scaling: Key::Char('s'),
            toggle_mirroring: Key::Char('e'),
            left: Key::Left,
            right: Key::Right,
            up: Key::Up,
            down: Key::Down,
            movement_speed: 5.0,
        }
    }
}

/// Background star generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarfieldConfig {
    pub count: usize,
    pub range_x: f32,
    pub range_y: f32,
    pub range_z: f32,
    pub point_size: f32,
    pub color: Color,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 300,
            range_x: 50.0,
            range_y: 50.0,
            range_z: 50.0,
            point_size: 2.0,
            color: Color::WHITE,
        }
    }
}

/// Text overlay layout, in window pixels from the bottom-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    pub font: FontSpec,
    pub color: Color,
    pub left: f32,
    /// Distance from the top edge to the first line
    pub top: f32,
    pub line_spacing: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            font: FontSpec::new("Arial", 18.0),
            color: Color::WHITE,
            left: 10.0,
            top: 20.0,
            line_spacing: 20.0,
        }
    }
}

/// Complete demo configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub animation: AnimationConfig,
    pub controls: ControlsConfig,
    pub starfield: StarfieldConfig,
    pub overlay: OverlayConfig,
    pub ship_color: Color,
    /// Frame clock target, in updates per second
    pub target_fps: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            animation: AnimationConfig::default(),
            controls: ControlsConfig::default(),
            starfield: StarfieldConfig::default(),
            overlay: OverlayConfig::default(),
            ship_color: Color::WHITE,
            target_fps: 60,
        }
    }
}
