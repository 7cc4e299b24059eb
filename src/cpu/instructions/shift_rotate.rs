// Shift and rotate instructions
//
// Each comes in an accumulator form and a read-modify-write memory form.
// Rotates go through the carry flag: the bit shifted out lands in C, the
// previous C enters at the far end.

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::flags;

impl crate::cpu::Cpu {
    #[inline]
    fn modify(&mut self, bus: &mut Bus, op: &Operand, accumulator: bool, result: u8) {
        if accumulator {
            self.a = result;
        } else {
            bus.write(op.address, result);
        }
        self.set_zn(result);
    }

    /// ASL - arithmetic shift left. Flags: C, Z, N
    pub(crate) fn asl(&mut self, bus: &mut Bus, op: &Operand, accumulator: bool) {
        let value = if accumulator {
            self.a
        } else {
            bus.read(op.address)
        };
        self.set_flag(flags::CARRY, value & 0x80 != 0);
        self.modify(bus, op, accumulator, value << 1);
    }

    /// LSR - logical shift right. Flags: C, Z, N (N always clears)
    pub(crate) fn lsr(&mut self, bus: &mut Bus, op: &Operand, accumulator: bool) {
        let value = if accumulator {
            self.a
        } else {
            bus.read(op.address)
        };
        self.set_flag(flags::CARRY, value & 0x01 != 0);
        self.modify(bus, op, accumulator, value >> 1);
    }

    /// ROL - rotate left through carry. Flags: C, Z, N
    pub(crate) fn rol(&mut self, bus: &mut Bus, op: &Operand, accumulator: bool) {
        let value = if accumulator {
            self.a
        } else {
            bus.read(op.address)
        };
        let carry_in = if self.get_flag(flags::CARRY) { 1 } else { 0 };
        self.set_flag(flags::CARRY, value & 0x80 != 0);
        self.modify(bus, op, accumulator, (value << 1) | carry_in);
    }

    /// ROR - rotate right through carry. Flags: C, Z, N
    pub(crate) fn ror(&mut self, bus: &mut Bus, op: &Operand, accumulator: bool) {
        let value = if accumulator {
            self.a
        } else {
            bus.read(op.address)
        };
        let carry_in = if self.get_flag(flags::CARRY) { 0x80 } else { 0 };
        self.set_flag(flags::CARRY, value & 0x01 != 0);
        self.modify(bus, op, accumulator, (value >> 1) | carry_in);
    }
}
