// Bitwise logic instructions: AND, ORA, EOR, BIT

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::flags;

impl crate::cpu::Cpu {
    /// AND - bitwise and into A. Flags: Z, N
    pub(crate) fn and(&mut self, bus: &mut Bus, op: &Operand) {
        self.a &= self.read_operand(bus, op);
        self.set_zn(self.a);
    }

    /// ORA - bitwise or into A. Flags: Z, N
    pub(crate) fn ora(&mut self, bus: &mut Bus, op: &Operand) {
        self.a |= self.read_operand(bus, op);
        self.set_zn(self.a);
    }

    /// EOR - bitwise exclusive-or into A. Flags: Z, N
    pub(crate) fn eor(&mut self, bus: &mut Bus, op: &Operand) {
        self.a ^= self.read_operand(bus, op);
        self.set_zn(self.a);
    }

    /// BIT - test bits without modifying A
    ///
    /// N and V are copied straight from bits 7 and 6 of the operand;
    /// Z reflects `A & operand`.
    pub(crate) fn bit(&mut self, bus: &mut Bus, op: &Operand) {
        let operand = self.read_operand(bus, op);
        self.set_flag(flags::NEGATIVE, operand & 0x80 != 0);
        self.set_flag(flags::OVERFLOW, operand & 0x40 != 0);
        self.set_flag(flags::ZERO, self.a & operand == 0);
    }
}
