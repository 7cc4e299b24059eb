// Fetch/decode/execute loop and cycle accounting

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::opcodes::OPCODE_TABLE;
use crate::cpu::Cpu;

impl Cpu {
    /// Execute one instruction; returns the cycles it consumed
    ///
    /// Cost is the decode-table base, plus one for a page-crossing operand
    /// on the flagged opcodes, plus whatever a taken branch reports.
    pub fn step(&mut self, bus: &mut Bus) -> u8 {
        let opcode = bus.read(self.pc);
        let info = &OPCODE_TABLE[opcode as usize];
        self.pc = self.pc.wrapping_add(1);

        let operand = self.resolve_operand(bus, info.mode);
        let extra = self.dispatch(opcode, bus, &operand);

        let mut cycles = info.cycles;
        if info.page_cycle && operand.page_crossed {
            cycles += 1;
        }
        cycles += extra;

        self.cycles = self.cycles.wrapping_add(cycles as u64);
        cycles
    }

    /// Run instructions until at least `budget` cycles have elapsed
    ///
    /// The frame driver hands the CPU a fixed budget per scanline; the last
    /// instruction is allowed to overshoot, matching the forgiving timing
    /// model of the rest of the core.
    pub fn run(&mut self, bus: &mut Bus, budget: u64) -> u64 {
        let target = self.cycles + budget;
        let start = self.cycles;
        while self.cycles < target {
            self.step(bus);
        }
        self.cycles - start
    }

    /// Route an opcode to its handler; returns extra cycles (branches)
    fn dispatch(&mut self, opcode: u8, bus: &mut Bus, op: &Operand) -> u8 {
        match opcode {
            // Loads / stores
            0xA9 | 0xA5 | 0xB5 | 0xAD | 0xBD | 0xB9 | 0xA1 | 0xB1 => self.lda(bus, op),
            0xA2 | 0xA6 | 0xB6 | 0xAE | 0xBE => self.ldx(bus, op),
            0xA0 | 0xA4 | 0xB4 | 0xAC | 0xBC => self.ldy(bus, op),
            0x85 | 0x95 | 0x8D | 0x9D | 0x99 | 0x81 | 0x91 => self.sta(bus, op),
            0x86 | 0x96 | 0x8E => self.stx(bus, op),
            0x84 | 0x94 | 0x8C => self.sty(bus, op),

            // Arithmetic
            0x69 | 0x65 | 0x75 | 0x6D | 0x7D | 0x79 | 0x61 | 0x71 => self.adc(bus, op),
            0xE9 | 0xE5 | 0xF5 | 0xED | 0xFD | 0xF9 | 0xE1 | 0xF1 => self.sbc(bus, op),
            0xE6 | 0xF6 | 0xEE | 0xFE => self.inc(bus, op),
            0xC6 | 0xD6 | 0xCE | 0xDE => self.dec(bus, op),
            0xE8 => self.inx(),
            0xC8 => self.iny(),
            0xCA => self.dex(),
            0x88 => self.dey(),

            // Logic
            0x29 | 0x25 | 0x35 | 0x2D | 0x3D | 0x39 | 0x21 | 0x31 => self.and(bus, op),
            0x09 | 0x05 | 0x15 | 0x0D | 0x1D | 0x19 | 0x01 | 0x11 => self.ora(bus, op),
            0x49 | 0x45 | 0x55 | 0x4D | 0x5D | 0x59 | 0x41 | 0x51 => self.eor(bus, op),
            0x24 | 0x2C => self.bit(bus, op),

            // Shifts / rotates (accumulator and memory forms)
            0x0A => self.asl(bus, op, true),
            0x06 | 0x16 | 0x0E | 0x1E => self.asl(bus, op, false),
            0x4A => self.lsr(bus, op, true),
            0x46 | 0x56 | 0x4E | 0x5E => self.lsr(bus, op, false),
            0x2A => self.rol(bus, op, true),
            0x26 | 0x36 | 0x2E | 0x3E => self.rol(bus, op, false),
            0x6A => self.ror(bus, op, true),
            0x66 | 0x76 | 0x6E | 0x7E => self.ror(bus, op, false),

            // Compares
            0xC9 | 0xC5 | 0xD5 | 0xCD | 0xDD | 0xD9 | 0xC1 | 0xD1 => self.cmp(bus, op),
            0xE0 | 0xE4 | 0xEC => self.cpx(bus, op),
            0xC0 | 0xC4 | 0xCC => self.cpy(bus, op),

            // Branches report their own extra cycles
            0x10 => return self.bpl(op),
            0x30 => return self.bmi(op),
            0x50 => return self.bvc(op),
            0x70 => return self.bvs(op),
            0x90 => return self.bcc(op),
            0xB0 => return self.bcs(op),
            0xD0 => return self.bne(op),
            0xF0 => return self.beq(op),

            // Control flow
            0x4C | 0x6C => self.jmp(op),
            0x20 => self.jsr(bus, op),
            0x60 => self.rts(bus),
            0x00 => self.brk(bus),
            0x40 => self.rti(bus),

            // Stack
            0x48 => self.pha(bus),
            0x68 => self.pla(bus),
            0x08 => self.php(bus),
            0x28 => self.plp(bus),

            // Transfers
            0xAA => self.tax(),
            0xA8 => self.tay(),
            0x8A => self.txa(),
            0x98 => self.tya(),
            0xBA => self.tsx(),
            0x9A => self.txs(),

            // Flag operations
            0x18 => self.clc(),
            0x38 => self.sec(),
            0x58 => self.cli(),
            0x78 => self.sei(),
            0xB8 => self.clv(),
            0xD8 => self.cld(),
            0xF8 => self.sed(),

            // Official NOP, the unofficial NOP group, and every undefined
            // opcode: the operand was already fetched (advancing PC and
            // reporting page crossings), nothing else happens.
            _ => {}
        }
        0
    }

    /// Format one trace line in the nestest style:
    /// `PC  bytes  disassembly  A:.. X:.. Y:.. P:.. SP:.. CYC:..`
    pub fn trace(&self, bus: &mut Bus) -> String {
        let pc = self.pc;
        let opcode = bus.read(pc);
        let info = &OPCODE_TABLE[opcode as usize];

        let mut bytes = format!("{:02X}", opcode);
        for i in 1..info.bytes as u16 {
            bytes.push_str(&format!(" {:02X}", bus.read(pc.wrapping_add(i))));
        }

        let listing = crate::debug::disassemble_instruction(bus, pc).text;

        format!(
            "{:04X}  {:<8}  {:<14}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc, bytes, listing, self.a, self.x, self.y, self.status, self.sp, self.cycles
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::{Cartridge, Mirroring};
    use crate::cpu::flags;

    /// Build a console-less test rig: the program at $8000, reset vector
    /// pointed at it, CPU powered up.
    fn rig(program: &[u8]) -> (Cpu, Bus) {
        let mut prg = vec![0u8; 0x4000];
        prg[..program.len()].copy_from_slice(program);
        prg[0x3FFC] = 0x00;
        prg[0x3FFD] = 0x80;

        let mut bus = Bus::new();
        bus.insert_cartridge(Cartridge {
            prg_rom: prg,
            chr_rom: vec![0; 0x2000],
            chr_is_ram: true,
            mirroring: Mirroring::Horizontal,
            prg_ram_size: 0x2000,
        });

        let mut cpu = Cpu::new();
        cpu.power_up(&mut bus);
        (cpu, bus)
    }

    // ========================================
    // Program scenarios
    // ========================================

    #[test]
    fn test_lda_immediate_and_beq_taken() {
        // LDA #$00 / BEQ +2 / LDA #$FF / BRK
        let (mut cpu, mut bus) = rig(&[0xA9, 0x00, 0xF0, 0x02, 0xA9, 0xFF, 0x00]);

        cpu.step(&mut bus); // LDA #$00
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.get_flag(flags::ZERO));

        cpu.step(&mut bus); // BEQ taken, skipping the second LDA
        assert_eq!(cpu.pc, 0x8006);

        let sp_before = cpu.sp;
        cpu.step(&mut bus); // BRK
        assert_eq!(cpu.a, 0x00, "skipped LDA must not execute");
        assert_eq!(cpu.sp, sp_before.wrapping_sub(3), "BRK pushed PC and P");
        assert!(cpu.get_flag(flags::INTERRUPT_DISABLE));
    }

    #[test]
    fn test_indirect_jmp_page_wrap() {
        // JMP ($02FF) with the pointer split across a page wrap
        let (mut cpu, mut bus) = rig(&[0x6C, 0xFF, 0x02]);
        bus.write(0x02FF, 0x34);
        bus.write(0x0300, 0xAB);
        bus.write(0x0200, 0x12);

        cpu.step(&mut bus);
        assert_eq!(cpu.pc, 0x1234, "must read the high byte from $0200");
    }

    #[test]
    fn test_adc_overflow_scenario() {
        let (mut cpu, mut bus) = rig(&[0x69, 0x50]); // ADC #$50
        cpu.a = 0x50;
        cpu.set_flag(flags::CARRY, false);

        cpu.step(&mut bus);
        assert_eq!(cpu.a, 0xA0);
        assert!(!cpu.get_flag(flags::CARRY));
        assert!(cpu.get_flag(flags::OVERFLOW));
        assert!(cpu.get_flag(flags::NEGATIVE));
        assert!(!cpu.get_flag(flags::ZERO));
    }

    // ========================================
    // Round-trip laws
    // ========================================

    #[test]
    fn test_pha_pla_identity() {
        let (mut cpu, mut bus) = rig(&[0x48, 0xA9, 0x00, 0x68]); // PHA / LDA #0 / PLA
        cpu.a = 0x5A;
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        assert_eq!(cpu.a, 0x5A);
        assert!(!cpu.get_flag(flags::ZERO), "PLA refreshed Z/N from A");
    }

    #[test]
    fn test_php_plp_restores_status() {
        let (mut cpu, mut bus) = rig(&[0x08, 0x28]); // PHP / PLP
        cpu.status = flags::CARRY | flags::NEGATIVE | flags::UNUSED;
        cpu.step(&mut bus);

        // The stacked copy has B and U forced on
        let stacked = bus.read(0x0100 + cpu.sp.wrapping_add(1) as u16);
        assert_eq!(stacked & flags::BREAK, flags::BREAK);
        assert_eq!(stacked & flags::UNUSED, flags::UNUSED);

        cpu.status = flags::UNUSED;
        cpu.step(&mut bus);
        assert!(cpu.get_flag(flags::CARRY));
        assert!(cpu.get_flag(flags::NEGATIVE));
        assert!(!cpu.get_flag(flags::BREAK), "PLP drops B");
        assert!(cpu.get_flag(flags::UNUSED), "PLP forces U");
    }

    #[test]
    fn test_txs_tsx_roundtrip() {
        let (mut cpu, mut bus) = rig(&[0x9A, 0xA2, 0x00, 0xBA]); // TXS / LDX #0 / TSX
        cpu.x = 0xC3;
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        assert_eq!(cpu.x, 0xC3);
    }

    // ========================================
    // Flag laws
    // ========================================

    #[test]
    fn test_adc_carry_out() {
        let (mut cpu, mut bus) = rig(&[0x69, 0xFF]); // ADC #$FF
        cpu.a = 0x01;
        cpu.set_flag(flags::CARRY, false);
        cpu.step(&mut bus);
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.get_flag(flags::CARRY));
        assert!(cpu.get_flag(flags::ZERO));
        assert!(!cpu.get_flag(flags::OVERFLOW));
    }

    #[test]
    fn test_sbc_borrow_semantics() {
        // SBC with carry set: A = A - op
        let (mut cpu, mut bus) = rig(&[0xE9, 0x10]);
        cpu.a = 0x50;
        cpu.set_flag(flags::CARRY, true);
        cpu.step(&mut bus);
        assert_eq!(cpu.a, 0x40);
        assert!(cpu.get_flag(flags::CARRY), "no borrow occurred");
    }

    #[test]
    fn test_cmp_flag_laws() {
        for (reg, operand) in [(0x40u8, 0x30u8), (0x30, 0x30), (0x20, 0x30)] {
            let (mut cpu, mut bus) = rig(&[0xC9, operand]);
            cpu.a = reg;
            cpu.step(&mut bus);
            assert_eq!(cpu.get_flag(flags::CARRY), reg >= operand);
            assert_eq!(cpu.get_flag(flags::ZERO), reg == operand);
            assert_eq!(
                cpu.get_flag(flags::NEGATIVE),
                reg.wrapping_sub(operand) & 0x80 != 0
            );
        }
    }

    // ========================================
    // Universal invariants
    // ========================================

    #[test]
    fn test_unused_flag_survives_every_opcode_class() {
        // A representative program: ALU, RMW, stack, branch, jump
        let (mut cpu, mut bus) = rig(&[
            0xA9, 0x10, // LDA #$10
            0x69, 0x22, // ADC #$22
            0x0A, // ASL A
            0x48, // PHA
            0x68, // PLA
            0xD0, 0x00, // BNE +0
            0xEA, // NOP
        ]);
        for _ in 0..7 {
            cpu.step(&mut bus);
            assert!(cpu.get_flag(flags::UNUSED), "U must read 1 after every op");
        }
    }

    #[test]
    fn test_pc_advances_by_instruction_length() {
        // Straight-line code only; PC delta must equal the table length
        let program = [
            0xA9u8, 0x01, // LDA #
            0xA5, 0x10, // LDA zp
            0xAD, 0x00, 0x02, // LDA abs
            0xEA, // NOP
            0x04, 0x00, // NOP zp (unofficial)
            0x0C, 0x00, 0x02, // NOP abs (unofficial)
        ];
        let (mut cpu, mut bus) = rig(&program);
        let lengths = [2u16, 2, 3, 1, 2, 3];
        for len in lengths {
            let before = cpu.pc;
            cpu.step(&mut bus);
            assert_eq!(cpu.pc, before + len);
        }
    }

    #[test]
    fn test_cycle_counter_monotone_and_minimum() {
        let (mut cpu, mut bus) = rig(&[0xEA, 0xA9, 0x00, 0x4C, 0x00, 0x80]);
        for _ in 0..50 {
            let before = cpu.cycles;
            let cost = cpu.step(&mut bus);
            assert!(cost >= 2);
            assert_eq!(cpu.cycles, before + cost as u64);
        }
    }

    #[test]
    fn test_page_cross_penalty_applied() {
        // LDA $80FF,X with X=1 crosses into $8100
        let (mut cpu, mut bus) = rig(&[0xBD, 0xFF, 0x80]);
        cpu.x = 0x01;
        let cost = cpu.step(&mut bus);
        assert_eq!(cost, 5, "4 base + 1 page-cross");

        // Same instruction without a crossing
        let (mut cpu, mut bus) = rig(&[0xBD, 0x00, 0x80]);
        cpu.x = 0x01;
        let cost = cpu.step(&mut bus);
        assert_eq!(cost, 4);
    }

    #[test]
    fn test_branch_cycle_costs() {
        // Not taken: 2
        let (mut cpu, mut bus) = rig(&[0xD0, 0x10]); // BNE with Z set
        cpu.set_flag(flags::ZERO, true);
        assert_eq!(cpu.step(&mut bus), 2);

        // Taken, same page: 3
        let (mut cpu, mut bus) = rig(&[0xD0, 0x10]);
        cpu.set_flag(flags::ZERO, false);
        assert_eq!(cpu.step(&mut bus), 3);

        // Taken, crossing a page: the branch sits at $80FD so its target
        // lands beyond $8100
        let mut program = vec![0xEA; 0xFD];
        program.extend_from_slice(&[0xD0, 0x7F]);
        let (mut cpu, mut bus) = rig(&program);
        cpu.set_flag(flags::ZERO, false);
        cpu.pc = 0x80FD;
        assert_eq!(cpu.step(&mut bus), 4);
    }

    #[test]
    fn test_jsr_rts_roundtrip() {
        // JSR $8010 ... at $8010: RTS
        let mut program = vec![0x20, 0x10, 0x80, 0xEA];
        program.resize(0x10, 0xEA);
        program.push(0x60); // $8010: RTS
        let (mut cpu, mut bus) = rig(&program);

        cpu.step(&mut bus); // JSR
        assert_eq!(cpu.pc, 0x8010);
        cpu.step(&mut bus); // RTS
        assert_eq!(cpu.pc, 0x8003, "RTS resumes after the JSR");
    }

    #[test]
    fn test_rti_restores_from_interrupt() {
        let (mut cpu, mut bus) = rig(&[0x40]); // RTI at $8000
        // Hand-craft an interrupt frame
        cpu.stack_push_u16(&mut bus, 0x1234);
        cpu.stack_push(&mut bus, flags::CARRY | flags::BREAK);

        cpu.step(&mut bus);
        assert_eq!(cpu.pc, 0x1234);
        assert!(cpu.get_flag(flags::CARRY));
        assert!(!cpu.get_flag(flags::BREAK), "B is not live state");
        assert!(cpu.get_flag(flags::UNUSED));
    }

    #[test]
    fn test_undefined_opcode_is_inert() {
        let (mut cpu, mut bus) = rig(&[0x02, 0xEA]); // KIL on real silicon
        let a = cpu.a;
        let status = cpu.status;
        cpu.step(&mut bus);
        assert_eq!(cpu.pc, 0x8001, "one byte consumed");
        assert_eq!(cpu.a, a);
        assert_eq!(cpu.status, status);
    }

    #[test]
    fn test_run_honors_cycle_budget() {
        let (mut cpu, mut bus) = rig(&[0x4C, 0x00, 0x80]); // JMP $8000 forever
        let used = cpu.run(&mut bus, 113);
        assert!(used >= 113, "budget is a lower bound");
        assert!(used < 113 + 7, "overshoot is at most one instruction");
    }

    #[test]
    fn test_rmw_memory_form() {
        // INC $10 twice then DEC $10
        let (mut cpu, mut bus) = rig(&[0xE6, 0x10, 0xE6, 0x10, 0xC6, 0x10]);
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        assert_eq!(bus.read(0x0010), 2);
        cpu.step(&mut bus);
        assert_eq!(bus.read(0x0010), 1);
    }

    #[test]
    fn test_rol_through_carry() {
        let (mut cpu, mut bus) = rig(&[0x2A]); // ROL A
        cpu.a = 0x80;
        cpu.set_flag(flags::CARRY, true);
        cpu.step(&mut bus);
        assert_eq!(cpu.a, 0x01, "old carry enters bit 0");
        assert!(cpu.get_flag(flags::CARRY), "bit 7 leaves into carry");
    }

    #[test]
    fn test_bit_copies_operand_bits() {
        let (mut cpu, mut bus) = rig(&[0x24, 0x10]); // BIT $10
        bus.write(0x0010, 0xC0);
        cpu.a = 0x00;
        cpu.step(&mut bus);
        assert!(cpu.get_flag(flags::NEGATIVE));
        assert!(cpu.get_flag(flags::OVERFLOW));
        assert!(cpu.get_flag(flags::ZERO));
    }
}
