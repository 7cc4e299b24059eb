// Stack instructions: PHA, PLA, PHP, PLP
//
// PHP pushes P with both B and U forced set. PLP discards the B bit coming
// off the stack (B does not exist as live processor state) and forces U.

use crate::bus::Bus;
use crate::cpu::flags;

impl crate::cpu::Cpu {
    /// PHA - push accumulator
    pub(crate) fn pha(&mut self, bus: &mut Bus) {
        self.stack_push(bus, self.a);
    }

    /// PLA - pop into accumulator. Flags: Z, N
    pub(crate) fn pla(&mut self, bus: &mut Bus) {
        self.a = self.stack_pop(bus);
        self.set_zn(self.a);
    }

    /// PHP - push processor status with B and U set
    pub(crate) fn php(&mut self, bus: &mut Bus) {
        self.stack_push(bus, self.status | flags::BREAK | flags::UNUSED);
    }

    /// PLP - pop processor status, ignoring B and forcing U
    pub(crate) fn plp(&mut self, bus: &mut Bus) {
        let popped = self.stack_pop(bus);
        self.status = (popped & !flags::BREAK) | flags::UNUSED;
    }
}
