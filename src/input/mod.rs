// Input module - controller port emulation
//
// The standard controller is a parallel-in/serial-out shift register. A
// strobe write with bit 0 going 1 -> 0 latches the button states; the next
// eight reads of $4016 clock them out one per read in the order A, B,
// SELECT, START, UP, DOWN, LEFT, RIGHT. Every read after the eighth
// returns 1.

pub mod keyboard;

pub use keyboard::{keycode_for_button, InputConfig, KeyboardHandler};

/// Button indices in shift-register order
pub const BUTTON_A: usize = 0;
pub const BUTTON_B: usize = 1;
pub const BUTTON_SELECT: usize = 2;
pub const BUTTON_START: usize = 3;
pub const BUTTON_UP: usize = 4;
pub const BUTTON_DOWN: usize = 5;
pub const BUTTON_LEFT: usize = 6;
pub const BUTTON_RIGHT: usize = 7;

/// State of the eight buttons on one controller
#[derive(Debug, Clone, Copy, Default)]
pub struct Controller {
    buttons: [bool; 8],
}

impl Controller {
    pub fn new() -> Self {
        Controller { buttons: [false; 8] }
    }

    /// Button state by shift-register index (0 = A ... 7 = RIGHT)
    pub fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    pub fn set_button(&mut self, index: usize, pressed: bool) {
        if let Some(slot) = self.buttons.get_mut(index) {
            *slot = pressed;
        }
    }
}

/// The $4016 port: strobe latch plus serial read-out
pub struct ControllerIO {
    controller1: Controller,
    /// Bit 0 of the last strobe write
    strobe: u8,
    /// Next button to clock out; saturates past 8
    shift_index: usize,
}

impl ControllerIO {
    pub fn new() -> Self {
        ControllerIO {
            controller1: Controller::new(),
            strobe: 0,
            shift_index: 0,
        }
    }

    /// Update a button on controller 1 (called by the keyboard layer)
    pub fn set_button(&mut self, index: usize, pressed: bool) {
        self.controller1.set_button(index, pressed);
    }

    /// Strobe write at $4016: a 1 -> 0 transition rewinds the shift register
    pub fn write(&mut self, data: u8) {
        let bit = data & 1;
        if bit == 0 && self.strobe == 1 {
            self.shift_index = 0;
        }
        self.strobe = bit;
    }

    /// Serial read at $4016: one button per read, then all ones
    pub fn read(&mut self) -> u8 {
        // While the strobe is held high the register keeps reloading, so
        // every read reports the A button
        if self.strobe == 1 {
            return self.controller1.button(BUTTON_A) as u8;
        }

        let value = if self.shift_index < 8 {
            self.controller1.button(self.shift_index) as u8
        } else {
            1
        };
        if self.shift_index <= 8 {
            self.shift_index += 1;
        }
        value
    }
}

impl Default for ControllerIO {
    fn default() -> Self {
        Self::new()
    }
}
