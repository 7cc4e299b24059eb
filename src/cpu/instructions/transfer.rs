// Register transfer instructions
//
// All update Z/N from the copied value except TXS, which touches no flags.

impl crate::cpu::Cpu {
    /// TAX - A to X. Flags: Z, N
    pub(crate) fn tax(&mut self) {
        self.x = self.a;
        self.set_zn(self.x);
    }

    /// TAY - A to Y. Flags: Z, N
    pub(crate) fn tay(&mut self) {
        self.y = self.a;
        self.set_zn(self.y);
    }

    /// TXA - X to A. Flags: Z, N
    pub(crate) fn txa(&mut self) {
        self.a = self.x;
        self.set_zn(self.a);
    }

    /// TYA - Y to A. Flags: Z, N
    pub(crate) fn tya(&mut self) {
        self.a = self.y;
        self.set_zn(self.a);
    }

    /// TSX - SP to X. Flags: Z, N
    pub(crate) fn tsx(&mut self) {
        self.x = self.sp;
        self.set_zn(self.x);
    }

    /// TXS - X to SP (no flags)
    pub(crate) fn txs(&mut self) {
        self.sp = self.x;
    }
}
