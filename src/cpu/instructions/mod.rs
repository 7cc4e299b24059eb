// Instruction semantics, grouped by family
//
// Every handler takes the operand already resolved by the addressing layer.
// Branch and control-flow handlers return the extra cycles they consumed;
// everything else is flat-cost and accounted in the decode table.

pub mod arithmetic;
pub mod branch;
pub mod compare;
pub mod control;
pub mod flags;
pub mod load_store;
pub mod logic;
pub mod shift_rotate;
pub mod stack;
pub mod transfer;

use crate::bus::Bus;
use crate::cpu::addressing::Operand;

impl crate::cpu::Cpu {
    /// Fetch the operand value: inline for immediate/accumulator forms,
    /// otherwise a read through the bus
    #[inline]
    pub(crate) fn read_operand(&self, bus: &mut Bus, op: &Operand) -> u8 {
        match op.value {
            Some(value) => value,
            None => bus.read(op.address),
        }
    }
}
