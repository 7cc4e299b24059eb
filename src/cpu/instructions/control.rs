// Control flow: JMP, JSR, RTS, BRK, RTI
//
// JSR pushes the address of its own last byte (PC - 1); RTS pops and adds
// one, so the pair round-trips. BRK vectors through $FFFA on this machine
// and pushes P with B set so a handler can tell it apart from an NMI.

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::{flags, vectors};

impl crate::cpu::Cpu {
    /// JMP - jump to the resolved address (absolute or indirect)
    pub(crate) fn jmp(&mut self, op: &Operand) {
        self.pc = op.address;
    }

    /// JSR - jump to subroutine, pushing PC - 1
    pub(crate) fn jsr(&mut self, bus: &mut Bus, op: &Operand) {
        self.stack_push_u16(bus, self.pc.wrapping_sub(1));
        self.pc = op.address;
    }

    /// RTS - return from subroutine
    pub(crate) fn rts(&mut self, bus: &mut Bus) {
        self.pc = self.stack_pop_u16(bus).wrapping_add(1);
    }

    /// BRK - software interrupt
    pub(crate) fn brk(&mut self, bus: &mut Bus) {
        self.stack_push_u16(bus, self.pc);
        self.stack_push(bus, self.status | flags::BREAK | flags::UNUSED);
        self.set_flag(flags::INTERRUPT_DISABLE, true);
        self.pc = bus.read_u16(vectors::NMI);
    }

    /// RTI - return from interrupt
    ///
    /// Pops P (forcing U, dropping B) then PC. Unlike RTS there is no +1
    /// adjustment: interrupts push the exact return address.
    pub(crate) fn rti(&mut self, bus: &mut Bus) {
        let popped = self.stack_pop(bus);
        self.status = (popped & !flags::BREAK) | flags::UNUSED;
        self.pc = self.stack_pop_u16(bus);
    }
}
