// Disassembler - turns raw 6502 bytes into assembly listings
//
// Linear sweep: data bytes in PRG-ROM disassemble as whatever instruction
// their first byte happens to decode to, which is the honest behavior for a
// format with no code/data distinction.

use crate::bus::Bus;
use crate::cpu::addressing::AddressingMode;
use crate::cpu::opcodes::{OpcodeInfo, OPCODE_TABLE};

/// One decoded instruction
#[derive(Debug, Clone)]
pub struct DisassembledInstruction {
    /// Address of the opcode byte
    pub address: u16,
    /// Raw instruction bytes (1-3)
    pub bytes: Vec<u8>,
    /// Formatted assembly, e.g. `LDA #$42`
    pub text: String,
    /// Instruction length
    pub length: u8,
}

impl DisassembledInstruction {
    /// One listing line: address, raw bytes, assembly
    pub fn format_line(&self) -> String {
        let bytes = self
            .bytes
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ");
        format!("{:04X}  {:<8}  {}", self.address, bytes, self.text)
    }
}

/// Format the operand for one instruction
fn format_operand(info: &OpcodeInfo, operands: &[u8], address: u16) -> String {
    let byte = |i: usize| operands.get(i).copied().unwrap_or(0);
    let word = || u16::from_le_bytes([byte(0), byte(1)]);

    match info.mode {
        AddressingMode::Implied => String::new(),
        AddressingMode::Accumulator => " A".to_string(),
        AddressingMode::Immediate => format!(" #${:02X}", byte(0)),
        AddressingMode::ZeroPage => format!(" ${:02X}", byte(0)),
        AddressingMode::ZeroPageX => format!(" ${:02X},X", byte(0)),
        AddressingMode::ZeroPageY => format!(" ${:02X},Y", byte(0)),
        AddressingMode::Relative => {
            let offset = byte(0) as i8;
            let target = address
                .wrapping_add(2)
                .wrapping_add(offset as u16);
            format!(" ${:04X}", target)
        }
        AddressingMode::Absolute => format!(" ${:04X}", word()),
        AddressingMode::AbsoluteX => format!(" ${:04X},X", word()),
        AddressingMode::AbsoluteY => format!(" ${:04X},Y", word()),
        AddressingMode::Indirect => format!(" (${:04X})", word()),
        AddressingMode::IndexedIndirect => format!(" (${:02X},X)", byte(0)),
        AddressingMode::IndirectIndexed => format!(" (${:02X}),Y", byte(0)),
    }
}

fn decode(address: u16, fetch: impl Fn(u16) -> u8) -> DisassembledInstruction {
    let opcode = fetch(address);
    let info = &OPCODE_TABLE[opcode as usize];

    let mut bytes = vec![opcode];
    for i in 1..info.bytes as u16 {
        bytes.push(fetch(address.wrapping_add(i)));
    }

    let text = format!(
        "{}{}",
        info.mnemonic,
        format_operand(info, &bytes[1..], address)
    );

    DisassembledInstruction {
        address,
        bytes,
        text,
        length: info.bytes,
    }
}

/// Disassemble the instruction at `address` through the bus
pub fn disassemble_instruction(bus: &mut Bus, address: u16) -> DisassembledInstruction {
    // Collect the bytes first so the closure below needs no mutable state
    let raw = [
        bus.read(address),
        bus.read(address.wrapping_add(1)),
        bus.read(address.wrapping_add(2)),
    ];
    decode(address, |a| raw[(a.wrapping_sub(address)) as usize % 3])
}

/// Disassemble `count` consecutive instructions starting at `address`
pub fn disassemble_range(
    bus: &mut Bus,
    address: u16,
    count: usize,
) -> Vec<DisassembledInstruction> {
    let mut listing = Vec::with_capacity(count);
    let mut addr = address;
    for _ in 0..count {
        let instruction = disassemble_instruction(bus, addr);
        addr = addr.wrapping_add(instruction.length as u16);
        listing.push(instruction);
    }
    listing
}

/// Disassemble a whole PRG-ROM image as mapped at $8000
pub fn disassemble_prg(prg: &[u8]) -> Vec<DisassembledInstruction> {
    let mut listing = Vec::new();
    let mut offset = 0usize;
    while offset < prg.len() {
        let address = 0x8000u16.wrapping_add(offset as u16);
        let instruction = decode(address, |a| {
            let index = offset + (a.wrapping_sub(address)) as usize;
            prg.get(index).copied().unwrap_or(0)
        });
        offset += instruction.length as usize;
        listing.push(instruction);
    }
    listing
}
