// Compare instructions: CMP, CPX, CPY
//
// A compare is a subtraction that throws the result away: C is set when the
// register is >= the operand, Z when equal, N from bit 7 of the difference.

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::flags;

impl crate::cpu::Cpu {
    #[inline]
    fn compare(&mut self, bus: &mut Bus, op: &Operand, register: u8) {
        let operand = self.read_operand(bus, op);
        self.set_flag(flags::CARRY, register >= operand);
        self.set_zn(register.wrapping_sub(operand));
    }

    /// CMP - compare accumulator. Flags: C, Z, N
    pub(crate) fn cmp(&mut self, bus: &mut Bus, op: &Operand) {
        self.compare(bus, op, self.a);
    }

    /// CPX - compare X. Flags: C, Z, N
    pub(crate) fn cpx(&mut self, bus: &mut Bus, op: &Operand) {
        self.compare(bus, op, self.x);
    }

    /// CPY - compare Y. Flags: C, Z, N
    pub(crate) fn cpy(&mut self, bus: &mut Bus, op: &Operand) {
        self.compare(bus, op, self.y);
    }
}
