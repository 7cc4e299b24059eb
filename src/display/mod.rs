// Display module - presentation layer
//
// The core is presentation-agnostic: once per frame the Console pushes the
// PPU's pixel lists through the `VideoSink` contract below. `FrameBuffer`
// is the standard sink (a 256x240 plane of palette indices); `window.rs`
// scales and blits it through winit + pixels at 60 Hz.

pub mod framebuffer;
pub mod palette;
pub mod window;

pub use framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use palette::{palette_to_rgb, palette_to_rgba, NES_PALETTE};
pub use window::{run_emulator, WindowConfig};

use crate::ppu::Pixel;

/// Presentation sink contract
///
/// Called once per frame in a fixed order: `set_bg_color`, then
/// `flush_pixels` for sprites-behind, background, and sprites-in-front,
/// then `present`.
pub trait VideoSink {
    /// Fill the screen with the backdrop color (palette entry $3F00)
    fn set_bg_color(&mut self, palette_index: u8);

    /// Apply one pixel list on top of what has been drawn so far
    fn flush_pixels(&mut self, pixels: &[Pixel]);

    /// Frame is complete; make it visible
    fn present(&mut self);
}
