// Configuration persistence
//
// Window/video settings round-trip through a TOML file next to the binary.
// Missing or malformed files silently fall back to the defaults; the
// emulator must always be able to start.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE: &str = "famicore.toml";

/// User-facing emulator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmulatorConfig {
    pub video: VideoConfig,
}

/// Video settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Integer window scale (1-8); the core always renders 256x240
    pub scale: u32,
    /// Target frame rate; 60 for NTSC
    pub fps: u32,
    /// Ask the surface for vsync
    pub vsync: bool,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        EmulatorConfig {
            video: VideoConfig {
                scale: 3,
                fps: 60,
                vsync: true,
            },
        }
    }
}

impl EmulatorConfig {
    /// Load from `path`, falling back to defaults on any failure
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|contents| toml::from_str(&contents).ok())
            .unwrap_or_default()
    }

    /// Persist the configuration
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)
    }
}
