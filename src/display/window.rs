// Window - winit event loop and pixels surface around the Console
//
// The window paces emulation: once per target-FPS interval it runs one full
// console frame into the frame buffer, converts to RGBA, and blits through
// the pixels surface. Keyboard events feed the controller port; F9 dumps a
// screenshot; Escape or the close button exits.

use super::framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::emulator::{save_screenshot, Console, EmulatorConfig};
use crate::input::KeyboardHandler;
use pixels::{Pixels, SurfaceTexture};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Window configuration derived from the emulator config
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    /// Integer scale factor (1-8)
    pub scale: u32,
    /// Target frame rate
    pub target_fps: u32,
    /// Enable vsync on the surface
    pub vsync: bool,
}

impl WindowConfig {
    pub fn new() -> Self {
        WindowConfig {
            scale: 3,
            target_fps: 60,
            vsync: true,
        }
    }

    pub fn from_emulator_config(config: &EmulatorConfig) -> Self {
        WindowConfig {
            scale: config.video.scale.clamp(1, 8),
            target_fps: config.video.fps.max(1),
            vsync: config.video.vsync,
        }
    }

    pub fn window_width(&self) -> u32 {
        SCREEN_WIDTH as u32 * self.scale
    }

    pub fn window_height(&self) -> u32 {
        SCREEN_HEIGHT as u32 * self.scale
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.target_fps as u64)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The running emulator window
struct EmulatorWindow {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    config: WindowConfig,
    console: Console,
    frame_buffer: FrameBuffer,
    keyboard: KeyboardHandler,
    rom_path: Option<PathBuf>,
    last_frame_time: Instant,
}

impl EmulatorWindow {
    fn new(
        console: Console,
        config: WindowConfig,
        keyboard: KeyboardHandler,
        rom_path: Option<PathBuf>,
    ) -> Self {
        EmulatorWindow {
            window: None,
            pixels: None,
            config,
            console,
            frame_buffer: FrameBuffer::new(),
            keyboard,
            rom_path,
            last_frame_time: Instant::now(),
        }
    }

    /// Run one console frame and blit it when the frame interval elapsed
    fn advance_and_render(&mut self) -> Result<(), pixels::Error> {
        if self.last_frame_time.elapsed() < self.config.frame_duration() {
            return Ok(());
        }
        self.last_frame_time = Instant::now();

        self.console.run_frame(&mut self.frame_buffer);

        if let Some(pixels) = &mut self.pixels {
            self.frame_buffer.to_rgba(pixels.frame_mut());
            pixels.render()?;
        }
        Ok(())
    }

    fn handle_key(&mut self, event: KeyEvent, event_loop: &ActiveEventLoop) {
        let pressed = event.state == ElementState::Pressed;

        if let PhysicalKey::Code(code) = event.physical_key {
            match code {
                KeyCode::Escape if pressed => {
                    event_loop.exit();
                    return;
                }
                KeyCode::F9 if pressed => {
                    match save_screenshot(&self.frame_buffer, self.rom_path.as_deref()) {
                        Ok(path) => println!("Screenshot saved to {}", path.display()),
                        Err(e) => eprintln!("Screenshot failed: {}", e),
                    }
                    return;
                }
                _ => {}
            }
        }

        if let Some(button) = self.keyboard.button_for_key(event.physical_key) {
            self.console
                .bus_mut()
                .controller
                .set_button(button, pressed);
        }
    }
}

impl ApplicationHandler for EmulatorWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("famicore")
            .with_inner_size(LogicalSize::new(
                self.config.window_width(),
                self.config.window_height(),
            ))
            .with_resizable(false);

        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .expect("failed to create window"),
        );
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, window.clone());
        let pixels = Pixels::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32, surface)
            .expect("failed to create pixel surface");

        self.window = Some(window);
        self.pixels = Some(pixels);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event, event_loop),
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.advance_and_render() {
                    eprintln!("Render error: {}", e);
                    event_loop.exit();
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Open the window and run the console until the user quits
pub fn run_emulator(
    console: Console,
    config: WindowConfig,
    keyboard: KeyboardHandler,
    rom_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(if config.vsync {
        ControlFlow::Wait
    } else {
        ControlFlow::Poll
    });

    let mut app = EmulatorWindow::new(console, config, keyboard, rom_path);
    event_loop.run_app(&mut app)?;
    Ok(())
}
