// Load and store instructions
//
// Loads move memory into a register and update Z/N; stores move a register
// into memory and touch no flags.

use crate::bus::Bus;
use crate::cpu::addressing::Operand;

impl crate::cpu::Cpu {
    /// LDA - load accumulator. Flags: Z, N
    pub(crate) fn lda(&mut self, bus: &mut Bus, op: &Operand) {
        self.a = self.read_operand(bus, op);
        self.set_zn(self.a);
    }

    /// LDX - load X. Flags: Z, N
    pub(crate) fn ldx(&mut self, bus: &mut Bus, op: &Operand) {
        self.x = self.read_operand(bus, op);
        self.set_zn(self.x);
    }

    /// LDY - load Y. Flags: Z, N
    pub(crate) fn ldy(&mut self, bus: &mut Bus, op: &Operand) {
        self.y = self.read_operand(bus, op);
        self.set_zn(self.y);
    }

    /// STA - store accumulator
    pub(crate) fn sta(&mut self, bus: &mut Bus, op: &Operand) {
        bus.write(op.address, self.a);
    }

    /// STX - store X
    pub(crate) fn stx(&mut self, bus: &mut Bus, op: &Operand) {
        bus.write(op.address, self.x);
    }

    /// STY - store Y
    pub(crate) fn sty(&mut self, bus: &mut Bus, op: &Operand) {
        bus.write(op.address, self.y);
    }
}
