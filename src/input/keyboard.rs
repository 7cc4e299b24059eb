// Keyboard-to-controller mapping
//
// The core samples the controller port; which physical key drives which
// button is purely a presenter concern, configured through a small TOML
// file with sensible defaults when the file is absent or malformed.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use winit::keyboard::{KeyCode, PhysicalKey};

use super::{
    BUTTON_A, BUTTON_B, BUTTON_DOWN, BUTTON_LEFT, BUTTON_SELECT, BUTTON_START,
    BUTTON_UP,
};

/// Key bindings as they appear in the config file
///
/// Names are winit `KeyCode` identifiers ("KeyX", "ArrowUp", "Enter", ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub button_a: String,
    pub button_b: String,
    pub select: String,
    pub start: String,
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            button_a: "KeyX".into(),
            button_b: "KeyZ".into(),
            select: "ShiftRight".into(),
            start: "Enter".into(),
            up: "ArrowUp".into(),
            down: "ArrowDown".into(),
            left: "ArrowLeft".into(),
            right: "ArrowRight".into(),
        }
    }
}

impl InputConfig {
    /// Load bindings from a TOML file, falling back to the defaults when
    /// the file is missing or does not parse
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|contents| toml::from_str(&contents).ok())
            .unwrap_or_default()
    }

    /// Persist the bindings
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)
    }
}

/// Resolve a config key name to a winit keycode
///
/// Only the names usable as NES bindings are recognized; anything else
/// falls back to the default binding for that button.
fn keycode_from_name(name: &str) -> Option<KeyCode> {
    let code = match name {
        "KeyA" => KeyCode::KeyA,
        "KeyB" => KeyCode::KeyB,
        "KeyC" => KeyCode::KeyC,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyH" => KeyCode::KeyH,
        "KeyI" => KeyCode::KeyI,
        "KeyJ" => KeyCode::KeyJ,
        "KeyK" => KeyCode::KeyK,
        "KeyL" => KeyCode::KeyL,
        "KeyM" => KeyCode::KeyM,
        "KeyN" => KeyCode::KeyN,
        "KeyO" => KeyCode::KeyO,
        "KeyP" => KeyCode::KeyP,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyT" => KeyCode::KeyT,
        "KeyU" => KeyCode::KeyU,
        "KeyV" => KeyCode::KeyV,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyY" => KeyCode::KeyY,
        "KeyZ" => KeyCode::KeyZ,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "Enter" => KeyCode::Enter,
        "Space" => KeyCode::Space,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "Tab" => KeyCode::Tab,
        _ => return None,
    };
    Some(code)
}

/// Default keycode for a button index
pub fn keycode_for_button(index: usize) -> KeyCode {
    match index {
        BUTTON_A => KeyCode::KeyX,
        BUTTON_B => KeyCode::KeyZ,
        BUTTON_SELECT => KeyCode::ShiftRight,
        BUTTON_START => KeyCode::Enter,
        BUTTON_UP => KeyCode::ArrowUp,
        BUTTON_DOWN => KeyCode::ArrowDown,
        BUTTON_LEFT => KeyCode::ArrowLeft,
        _ => KeyCode::ArrowRight,
    }
}

/// Resolved mapping: one keycode per button index
pub struct KeyboardHandler {
    bindings: [KeyCode; 8],
}

impl KeyboardHandler {
    /// Build the handler from a config, falling back per button
    pub fn from_config(config: &InputConfig) -> Self {
        let names = [
            &config.button_a,
            &config.button_b,
            &config.select,
            &config.start,
            &config.up,
            &config.down,
            &config.left,
            &config.right,
        ];
        let mut bindings = [KeyCode::KeyX; 8];
        for (index, name) in names.iter().enumerate() {
            bindings[index] =
                keycode_from_name(name.as_str()).unwrap_or_else(|| keycode_for_button(index));
        }
        KeyboardHandler { bindings }
    }

    /// Which button a physical key drives, if any
    pub fn button_for_key(&self, physical_key: PhysicalKey) -> Option<usize> {
        if let PhysicalKey::Code(code) = physical_key {
            self.bindings.iter().position(|&binding| binding == code)
        } else {
            None
        }
    }
}

impl Default for KeyboardHandler {
    fn default() -> Self {
        Self::from_config(&InputConfig::default())
    }
}
