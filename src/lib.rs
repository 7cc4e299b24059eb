// famicore - NTSC NES (mapper 0) emulator core
//
// The emulated machine is the interacting triple of a 6502-derived CPU, a
// scanline-based PPU, and the shared address-decoding fabric, driven one
// frame at a time by the Console.

pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod debug;
pub mod display;
pub mod emulator;
pub mod input;
pub mod ppu;

// Re-export the main types for convenience
pub use bus::Bus;
pub use cartridge::{Cartridge, INesError, Mirroring};
pub use cpu::Cpu;
pub use debug::{disassemble_instruction, disassemble_prg, DisassembledInstruction};
pub use display::{FrameBuffer, VideoSink, WindowConfig, NES_PALETTE};
pub use emulator::{Console, EmulatorConfig};
pub use input::{Controller, ControllerIO, InputConfig, KeyboardHandler};
pub use ppu::{Pixel, Ppu};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_components() {
        let _cpu = Cpu::new();
        let _ppu = Ppu::new();
        let _bus = Bus::new();
        let _controller_io = ControllerIO::new();
        let _frame_buffer = FrameBuffer::new();
    }
}
