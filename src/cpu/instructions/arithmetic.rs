// Arithmetic instructions: ADC, SBC, INC/DEC and the register forms
//
// ADC computes A + operand + C. Overflow is signed disagreement between the
// operands and the result: `((A ^ R) & (OP ^ R) & 0x80) != 0`. SBC is ADC
// with the operand inverted, which makes carry the borrow-complement.
// Decimal mode is decoded but has no effect (the NES 2A03 hard-wires it off).

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::flags;

impl crate::cpu::Cpu {
    #[inline]
    fn add_with_carry(&mut self, operand: u8) {
        let carry_in = if self.get_flag(flags::CARRY) { 1u16 } else { 0 };
        let sum = self.a as u16 + operand as u16 + carry_in;
        let result = sum as u8;

        self.set_flag(flags::CARRY, sum > 0xFF);
        self.set_flag(
            flags::OVERFLOW,
            (self.a ^ result) & (operand ^ result) & 0x80 != 0,
        );
        self.a = result;
        self.set_zn(result);
    }

    /// ADC - add with carry. Flags: C, Z, V, N
    pub(crate) fn adc(&mut self, bus: &mut Bus, op: &Operand) {
        let operand = self.read_operand(bus, op);
        self.add_with_carry(operand);
    }

    /// SBC - subtract with carry. Flags: C, Z, V, N
    pub(crate) fn sbc(&mut self, bus: &mut Bus, op: &Operand) {
        let operand = self.read_operand(bus, op);
        self.add_with_carry(!operand);
    }

    /// INC - increment memory. Flags: Z, N
    pub(crate) fn inc(&mut self, bus: &mut Bus, op: &Operand) {
        let result = bus.read(op.address).wrapping_add(1);
        bus.write(op.address, result);
        self.set_zn(result);
    }

    /// DEC - decrement memory. Flags: Z, N
    pub(crate) fn dec(&mut self, bus: &mut Bus, op: &Operand) {
        let result = bus.read(op.address).wrapping_sub(1);
        bus.write(op.address, result);
        self.set_zn(result);
    }

    /// INX - increment X. Flags: Z, N
    pub(crate) fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.set_zn(self.x);
    }

    /// INY - increment Y. Flags: Z, N
    pub(crate) fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.set_zn(self.y);
    }

    /// DEX - decrement X. Flags: Z, N
    pub(crate) fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.set_zn(self.x);
    }

    /// DEY - decrement Y. Flags: Z, N
    pub(crate) fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.set_zn(self.y);
    }
}
