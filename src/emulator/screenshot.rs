// Screenshot capture: PNG dump of the current frame buffer

use crate::display::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use chrono::Local;
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Screenshot failure
#[derive(Debug)]
pub enum ScreenshotError {
    Io(std::io::Error),
    Encoding(png::EncodingError),
}

impl fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "screenshot I/O error: {}", e),
            ScreenshotError::Encoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<std::io::Error> for ScreenshotError {
    fn from(e: std::io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::Encoding(e)
    }
}

/// Write the frame buffer as a timestamped PNG next to the working
/// directory; returns the path written
pub fn save_screenshot(
    frame: &FrameBuffer,
    rom_path: Option<&Path>,
) -> Result<PathBuf, ScreenshotError> {
    let stem = rom_path
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("famicore");
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = PathBuf::from(format!("{}_{}.png", stem, timestamp));

    let mut rgba = vec![0u8; SCREEN_WIDTH * SCREEN_HEIGHT * 4];
    frame.to_rgba(&mut rgba);

    let file = File::create(&path)?;
    let writer = BufWriter::new(file);
    let mut encoder = png::Encoder::new(writer, SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.write_header()?.write_image_data(&rgba)?;

    Ok(path)
}
