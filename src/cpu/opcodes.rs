// Opcode decode table
//
// One entry per opcode byte: mnemonic, addressing mode, instruction length,
// base cycle count, and whether a page-crossing access adds a cycle. The 151
// official opcodes are present along with the multi-byte unofficial NOP
// group; every remaining slot decodes as a one-byte, two-cycle NOP so that
// no opcode can halt execution.
//
// Cycle counts are the canonical 6502 figures. The unofficial NOPs take the
// cost of their addressing mode (2-4 cycles, plus the page penalty for the
// absolute,X forms).

use super::addressing::AddressingMode;
use super::addressing::AddressingMode::*;

/// Static description of one opcode
#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    /// Three-letter mnemonic ("LDA", "NOP", ...)
    pub mnemonic: &'static str,
    /// Addressing mode used to resolve the operand
    pub mode: AddressingMode,
    /// Total instruction length in bytes, opcode included
    pub bytes: u8,
    /// Base cycle cost
    pub cycles: u8,
    /// True when a page-crossing operand fetch costs one extra cycle
    pub page_cycle: bool,
}

const fn op(
    mnemonic: &'static str,
    mode: AddressingMode,
    bytes: u8,
    cycles: u8,
    page_cycle: bool,
) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        mode,
        bytes,
        cycles,
        page_cycle,
    }
}

const fn build_table() -> [OpcodeInfo; 256] {
    // Anything not assigned below is an undefined opcode: one-byte NOP.
    let mut t = [op("NOP", Implied, 1, 2, false); 256];

    // BRK / interrupt return
    t[0x00] = op("BRK", Implied, 1, 7, false);
    t[0x40] = op("RTI", Implied, 1, 6, false);

    // Loads
    t[0xA9] = op("LDA", Immediate, 2, 2, false);
    t[0xA5] = op("LDA", ZeroPage, 2, 3, false);
    t[0xB5] = op("LDA", ZeroPageX, 2, 4, false);
    t[0xAD] = op("LDA", Absolute, 3, 4, false);
    t[0xBD] = op("LDA", AbsoluteX, 3, 4, true);
    t[0xB9] = op("LDA", AbsoluteY, 3, 4, true);
    t[0xA1] = op("LDA", IndexedIndirect, 2, 6, false);
    t[0xB1] = op("LDA", IndirectIndexed, 2, 5, true);
    t[0xA2] = op("LDX", Immediate, 2, 2, false);
    t[0xA6] = op("LDX", ZeroPage, 2, 3, false);
    t[0xB6] = op("LDX", ZeroPageY, 2, 4, false);
    t[0xAE] = op("LDX", Absolute, 3, 4, false);
    t[0xBE] = op("LDX", AbsoluteY, 3, 4, true);
    t[0xA0] = op("LDY", Immediate, 2, 2, false);
    t[0xA4] = op("LDY", ZeroPage, 2, 3, false);
    t[0xB4] = op("LDY", ZeroPageX, 2, 4, false);
    t[0xAC] = op("LDY", Absolute, 3, 4, false);
    t[0xBC] = op("LDY", AbsoluteX, 3, 4, true);

    // Stores (no page penalty: the write always costs the fixup cycle)
    t[0x85] = op("STA", ZeroPage, 2, 3, false);
    t[0x95] = op("STA", ZeroPageX, 2, 4, false);
    t[0x8D] = op("STA", Absolute, 3, 4, false);
    t[0x9D] = op("STA", AbsoluteX, 3, 5, false);
    t[0x99] = op("STA", AbsoluteY, 3, 5, false);
    t[0x81] = op("STA", IndexedIndirect, 2, 6, false);
    t[0x91] = op("STA", IndirectIndexed, 2, 6, false);
    t[0x86] = op("STX", ZeroPage, 2, 3, false);
    t[0x96] = op("STX", ZeroPageY, 2, 4, false);
    t[0x8E] = op("STX", Absolute, 3, 4, false);
    t[0x84] = op("STY", ZeroPage, 2, 3, false);
    t[0x94] = op("STY", ZeroPageX, 2, 4, false);
    t[0x8C] = op("STY", Absolute, 3, 4, false);

    // Arithmetic
    t[0x69] = op("ADC", Immediate, 2, 2, false);
    t[0x65] = op("ADC", ZeroPage, 2, 3, false);
    t[0x75] = op("ADC", ZeroPageX, 2, 4, false);
    t[0x6D] = op("ADC", Absolute, 3, 4, false);
    t[0x7D] = op("ADC", AbsoluteX, 3, 4, true);
    t[0x79] = op("ADC", AbsoluteY, 3, 4, true);
    t[0x61] = op("ADC", IndexedIndirect, 2, 6, false);
    t[0x71] = op("ADC", IndirectIndexed, 2, 5, true);
    t[0xE9] = op("SBC", Immediate, 2, 2, false);
    t[0xE5] = op("SBC", ZeroPage, 2, 3, false);
    t[0xF5] = op("SBC", ZeroPageX, 2, 4, false);
    t[0xED] = op("SBC", Absolute, 3, 4, false);
    t[0xFD] = op("SBC", AbsoluteX, 3, 4, true);
    t[0xF9] = op("SBC", AbsoluteY, 3, 4, true);
    t[0xE1] = op("SBC", IndexedIndirect, 2, 6, false);
    t[0xF1] = op("SBC", IndirectIndexed, 2, 5, true);

    // Increments / decrements
    t[0xE6] = op("INC", ZeroPage, 2, 5, false);
    t[0xF6] = op("INC", ZeroPageX, 2, 6, false);
    t[0xEE] = op("INC", Absolute, 3, 6, false);
    t[0xFE] = op("INC", AbsoluteX, 3, 7, false);
    t[0xC6] = op("DEC", ZeroPage, 2, 5, false);
    t[0xD6] = op("DEC", ZeroPageX, 2, 6, false);
    t[0xCE] = op("DEC", Absolute, 3, 6, false);
    t[0xDE] = op("DEC", AbsoluteX, 3, 7, false);
    t[0xE8] = op("INX", Implied, 1, 2, false);
    t[0xC8] = op("INY", Implied, 1, 2, false);
    t[0xCA] = op("DEX", Implied, 1, 2, false);
    t[0x88] = op("DEY", Implied, 1, 2, false);

    // Logic
    t[0x29] = op("AND", Immediate, 2, 2, false);
    t[0x25] = op("AND", ZeroPage, 2, 3, false);
    t[0x35] = op("AND", ZeroPageX, 2, 4, false);
    t[0x2D] = op("AND", Absolute, 3, 4, false);
    t[0x3D] = op("AND", AbsoluteX, 3, 4, true);
    t[0x39] = op("AND", AbsoluteY, 3, 4, true);
    t[0x21] = op("AND", IndexedIndirect, 2, 6, false);
    t[0x31] = op("AND", IndirectIndexed, 2, 5, true);
    t[0x09] = op("ORA", Immediate, 2, 2, false);
    t[0x05] = op("ORA", ZeroPage, 2, 3, false);
    t[0x15] = op("ORA", ZeroPageX, 2, 4, false);
    t[0x0D] = op("ORA", Absolute, 3, 4, false);
    t[0x1D] = op("ORA", AbsoluteX, 3, 4, true);
    t[0x19] = op("ORA", AbsoluteY, 3, 4, true);
    t[0x01] = op("ORA", IndexedIndirect, 2, 6, false);
    t[0x11] = op("ORA", IndirectIndexed, 2, 5, true);
    t[0x49] = op("EOR", Immediate, 2, 2, false);
    t[0x45] = op("EOR", ZeroPage, 2, 3, false);
    t[0x55] = op("EOR", ZeroPageX, 2, 4, false);
    t[0x4D] = op("EOR", Absolute, 3, 4, false);
    t[0x5D] = op("EOR", AbsoluteX, 3, 4, true);
    t[0x59] = op("EOR", AbsoluteY, 3, 4, true);
    t[0x41] = op("EOR", IndexedIndirect, 2, 6, false);
    t[0x51] = op("EOR", IndirectIndexed, 2, 5, true);
    t[0x24] = op("BIT", ZeroPage, 2, 3, false);
    t[0x2C] = op("BIT", Absolute, 3, 4, false);

    // Shifts / rotates
    t[0x0A] = op("ASL", Accumulator, 1, 2, false);
    t[0x06] = op("ASL", ZeroPage, 2, 5, false);
    t[0x16] = op("ASL", ZeroPageX, 2, 6, false);
    t[0x0E] = op("ASL", Absolute, 3, 6, false);
    t[0x1E] = op("ASL", AbsoluteX, 3, 7, false);
    t[0x4A] = op("LSR", Accumulator, 1, 2, false);
    t[0x46] = op("LSR", ZeroPage, 2, 5, false);
    t[0x56] = op("LSR", ZeroPageX, 2, 6, false);
    t[0x4E] = op("LSR", Absolute, 3, 6, false);
    t[0x5E] = op("LSR", AbsoluteX, 3, 7, false);
    t[0x2A] = op("ROL", Accumulator, 1, 2, false);
    t[0x26] = op("ROL", ZeroPage, 2, 5, false);
    t[0x36] = op("ROL", ZeroPageX, 2, 6, false);
    t[0x2E] = op("ROL", Absolute, 3, 6, false);
    t[0x3E] = op("ROL", AbsoluteX, 3, 7, false);
    t[0x6A] = op("ROR", Accumulator, 1, 2, false);
    t[0x66] = op("ROR", ZeroPage, 2, 5, false);
    t[0x76] = op("ROR", ZeroPageX, 2, 6, false);
    t[0x6E] = op("ROR", Absolute, 3, 6, false);
    t[0x7E] = op("ROR", AbsoluteX, 3, 7, false);

    // Compares
    t[0xC9] = op("CMP", Immediate, 2, 2, false);
    t[0xC5] = op("CMP", ZeroPage, 2, 3, false);
    t[0xD5] = op("CMP", ZeroPageX, 2, 4, false);
    t[0xCD] = op("CMP", Absolute, 3, 4, false);
    t[0xDD] = op("CMP", AbsoluteX, 3, 4, true);
    t[0xD9] = op("CMP", AbsoluteY, 3, 4, true);
    t[0xC1] = op("CMP", IndexedIndirect, 2, 6, false);
    t[0xD1] = op("CMP", IndirectIndexed, 2, 5, true);
    t[0xE0] = op("CPX", Immediate, 2, 2, false);
    t[0xE4] = op("CPX", ZeroPage, 2, 3, false);
    t[0xEC] = op("CPX", Absolute, 3, 4, false);
    t[0xC0] = op("CPY", Immediate, 2, 2, false);
    t[0xC4] = op("CPY", ZeroPage, 2, 3, false);
    t[0xCC] = op("CPY", Absolute, 3, 4, false);

    // Branches (+1 when taken, +1 more on page cross; applied at execution)
    t[0x10] = op("BPL", Relative, 2, 2, false);
    t[0x30] = op("BMI", Relative, 2, 2, false);
    t[0x50] = op("BVC", Relative, 2, 2, false);
    t[0x70] = op("BVS", Relative, 2, 2, false);
    t[0x90] = op("BCC", Relative, 2, 2, false);
    t[0xB0] = op("BCS", Relative, 2, 2, false);
    t[0xD0] = op("BNE", Relative, 2, 2, false);
    t[0xF0] = op("BEQ", Relative, 2, 2, false);

    // Jumps / subroutines
    t[0x4C] = op("JMP", Absolute, 3, 3, false);
    t[0x6C] = op("JMP", Indirect, 3, 5, false);
    t[0x20] = op("JSR", Absolute, 3, 6, false);
    t[0x60] = op("RTS", Implied, 1, 6, false);

    // Stack
    t[0x48] = op("PHA", Implied, 1, 3, false);
    t[0x68] = op("PLA", Implied, 1, 4, false);
    t[0x08] = op("PHP", Implied, 1, 3, false);
    t[0x28] = op("PLP", Implied, 1, 4, false);

    // Transfers
    t[0xAA] = op("TAX", Implied, 1, 2, false);
    t[0xA8] = op("TAY", Implied, 1, 2, false);
    t[0x8A] = op("TXA", Implied, 1, 2, false);
    t[0x98] = op("TYA", Implied, 1, 2, false);
    t[0xBA] = op("TSX", Implied, 1, 2, false);
    t[0x9A] = op("TXS", Implied, 1, 2, false);

    // Flag operations
    t[0x18] = op("CLC", Implied, 1, 2, false);
    t[0x38] = op("SEC", Implied, 1, 2, false);
    t[0x58] = op("CLI", Implied, 1, 2, false);
    t[0x78] = op("SEI", Implied, 1, 2, false);
    t[0xB8] = op("CLV", Implied, 1, 2, false);
    t[0xD8] = op("CLD", Implied, 1, 2, false);
    t[0xF8] = op("SED", Implied, 1, 2, false);

    // Official NOP
    t[0xEA] = op("NOP", Implied, 1, 2, false);

    // Unofficial NOP variants: decoded with their true addressing mode so
    // PC advances correctly and cycles are consumed, but architecturally
    // inert. Commercial ROMs execute these.
    t[0x04] = op("NOP", ZeroPage, 2, 3, false);
    t[0x44] = op("NOP", ZeroPage, 2, 3, false);
    t[0x64] = op("NOP", ZeroPage, 2, 3, false);
    t[0x0C] = op("NOP", Absolute, 3, 4, false);
    t[0x14] = op("NOP", ZeroPageX, 2, 4, false);
    t[0x34] = op("NOP", ZeroPageX, 2, 4, false);
    t[0x54] = op("NOP", ZeroPageX, 2, 4, false);
    t[0x74] = op("NOP", ZeroPageX, 2, 4, false);
    t[0xD4] = op("NOP", ZeroPageX, 2, 4, false);
    t[0xF4] = op("NOP", ZeroPageX, 2, 4, false);
    t[0x1A] = op("NOP", Implied, 1, 2, false);
    t[0x3A] = op("NOP", Implied, 1, 2, false);
    t[0x5A] = op("NOP", Implied, 1, 2, false);
    t[0x7A] = op("NOP", Implied, 1, 2, false);
    t[0xDA] = op("NOP", Implied, 1, 2, false);
    t[0xFA] = op("NOP", Implied, 1, 2, false);
    t[0x1C] = op("NOP", AbsoluteX, 3, 4, true);
    t[0x3C] = op("NOP", AbsoluteX, 3, 4, true);
    t[0x5C] = op("NOP", AbsoluteX, 3, 4, true);
    t[0x7C] = op("NOP", AbsoluteX, 3, 4, true);
    t[0xDC] = op("NOP", AbsoluteX, 3, 4, true);
    t[0xFC] = op("NOP", AbsoluteX, 3, 4, true);
    t[0x80] = op("NOP", Immediate, 2, 2, false);

    t
}

/// The full 256-entry decode table
pub static OPCODE_TABLE: [OpcodeInfo; 256] = build_table();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_slot_is_populated() {
        for info in OPCODE_TABLE.iter() {
            assert!(info.bytes >= 1 && info.bytes <= 3);
            assert!(info.cycles >= 2, "every instruction costs at least 2 cycles");
        }
    }

    #[test]
    fn test_undefined_opcodes_decode_as_one_byte_nop() {
        // $02 is a KIL opcode on real silicon; here it must be inert
        let info = &OPCODE_TABLE[0x02];
        assert_eq!(info.mnemonic, "NOP");
        assert_eq!(info.bytes, 1);
        assert_eq!(info.cycles, 2);
    }

    #[test]
    fn test_unofficial_nop_group_modes() {
        assert_eq!(OPCODE_TABLE[0x04].mode, AddressingMode::ZeroPage);
        assert_eq!(OPCODE_TABLE[0x0C].mode, AddressingMode::Absolute);
        assert_eq!(OPCODE_TABLE[0x14].mode, AddressingMode::ZeroPageX);
        assert_eq!(OPCODE_TABLE[0x1C].mode, AddressingMode::AbsoluteX);
        assert!(OPCODE_TABLE[0x1C].page_cycle);
        assert_eq!(OPCODE_TABLE[0x80].mode, AddressingMode::Immediate);
        assert_eq!(OPCODE_TABLE[0xFA].mode, AddressingMode::Implied);
    }

    #[test]
    fn test_known_entries() {
        assert_eq!(OPCODE_TABLE[0xA9].mnemonic, "LDA");
        assert_eq!(OPCODE_TABLE[0xA9].bytes, 2);
        assert_eq!(OPCODE_TABLE[0x6C].mnemonic, "JMP");
        assert_eq!(OPCODE_TABLE[0x6C].cycles, 5);
        assert_eq!(OPCODE_TABLE[0x00].mnemonic, "BRK");
        assert_eq!(OPCODE_TABLE[0x00].cycles, 7);
        assert!(OPCODE_TABLE[0xBD].page_cycle, "LDA abs,X pays the penalty");
        assert!(!OPCODE_TABLE[0x9D].page_cycle, "STA abs,X does not");
    }
}
