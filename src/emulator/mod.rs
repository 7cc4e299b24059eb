// Emulator module - the Console frame driver
//
// `Console` owns the CPU and the bus (which in turn owns the PPU, the
// controller port, and all memory) and advances the machine one frame at a
// time: 262 PPU scanline ticks, each followed by a fixed CPU cycle budget.
// The PPU-to-CPU back edge is the polled NMI line, not a direct call.

mod config;
mod screenshot;

pub use config::{EmulatorConfig, VideoConfig, CONFIG_FILE};
pub use screenshot::{save_screenshot, ScreenshotError};

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::cpu::{Cpu, PPU_WARMUP_CYCLES};
use crate::display::VideoSink;

/// Scanlines per frame, pre-render included
pub const SCANLINES_PER_FRAME: u32 = 262;

/// CPU cycles granted per scanline: 1364 NTSC master cycles per line at 12
/// master cycles per CPU cycle
pub const CPU_CYCLES_PER_SCANLINE: u64 = 1364 / 12;

/// The whole machine
pub struct Console {
    cpu: Cpu,
    bus: Bus,
}

impl Console {
    /// Build a console around a loaded cartridge and run the CPU power-up
    /// sequence (reset vector fetch included)
    pub fn new(cartridge: Cartridge) -> Self {
        let mut bus = Bus::new();
        bus.insert_cartridge(cartridge);
        let mut cpu = Cpu::new();
        cpu.power_up(&mut bus);
        Console { cpu, bus }
    }

    /// Advance the machine by one scanline: PPU tick, NMI poll, CPU budget
    pub fn step_scanline(&mut self) {
        self.bus.ppu.tick_scanline();

        // The PPU ignores configuration writes until the CPU clears its
        // warm-up period
        if self.cpu.cycles >= PPU_WARMUP_CYCLES {
            self.bus.ppu.set_ready();
        }

        // The NMI edge raised at scanline 241 is observed here, before the
        // next CPU batch: the handler runs inside this frame's VBlank
        if self.bus.ppu.take_nmi() {
            self.cpu.nmi(&mut self.bus);
        }

        self.cpu.run(&mut self.bus, CPU_CYCLES_PER_SCANLINE);
    }

    /// Run one full frame and, when the pre-render line signals completion,
    /// drain the pixel lists to the sink
    pub fn run_frame(&mut self, sink: &mut dyn VideoSink) {
        for _ in 0..SCANLINES_PER_FRAME {
            self.step_scanline();
        }

        if self.bus.ppu.take_frame_complete() {
            self.present(sink);
        }
    }

    /// Push the finished frame through the sink contract: backdrop, then
    /// sprites-behind, background, sprites-in-front, then present
    fn present(&mut self, sink: &mut dyn VideoSink) {
        let ppu = &self.bus.ppu;
        sink.set_bg_color(ppu.backdrop_color());

        let (behind, background, front) = ppu.frame_pixels();
        if ppu.show_sprites() {
            sink.flush_pixels(behind);
        }
        if ppu.show_background() {
            sink.flush_pixels(background);
        }
        if ppu.show_sprites() {
            sink.flush_pixels(front);
        }
        sink.present();

        self.bus.ppu.clear_frame();
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }
}
