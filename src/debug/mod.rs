// Debug tooling: the 6502 disassembler

pub mod disassembler;

pub use disassembler::{
    disassemble_instruction, disassemble_prg, disassemble_range, DisassembledInstruction,
};
