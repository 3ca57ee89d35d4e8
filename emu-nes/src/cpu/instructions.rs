//! Instruction execution: addressing-mode resolution and per-mnemonic effects

use super::opcodes::{self, AddressingMode};
use super::{Cpu6502, CpuMemory, StatusFlags};
use emu_core::{EmulatorError, Result};

impl<M: CpuMemory> Cpu6502<M> {
    /// Resolve an addressing mode to an effective memory address.
    /// Returns (address, page_crossed). Not valid for Implied/Accumulator/Immediate.
    fn operand_address(&mut self, mode: AddressingMode) -> (u16, bool) {
        match mode {
            AddressingMode::ZeroPage => (self.addr_zero_page(), false),
            AddressingMode::ZeroPageX => (self.addr_zero_page_x(), false),
            AddressingMode::ZeroPageY => (self.addr_zero_page_y(), false),
            AddressingMode::Absolute => (self.addr_absolute(), false),
            AddressingMode::AbsoluteX => self.addr_absolute_x(),
            AddressingMode::AbsoluteY => self.addr_absolute_y(),
            AddressingMode::Indirect => (self.addr_indirect(), false),
            AddressingMode::IndexedIndirect => (self.addr_indexed_indirect(), false),
            AddressingMode::IndirectIndexed => self.addr_indirect_indexed(),
            other => unreachable!("{:?} has no effective memory address", other),
        }
    }

    /// Resolve an addressing mode to a value, for read-type instructions.
    /// Returns (value, page_crossed).
    fn read_operand(&mut self, mode: AddressingMode) -> (u8, bool) {
        match mode {
            AddressingMode::Immediate => (self.fetch_byte(), false),
            _ => {
                let (addr, crossed) = self.operand_address(mode);
                (self.memory.read(addr), crossed)
            }
        }
    }

    fn do_asl(&mut self, mode: AddressingMode) {
        if mode == AddressingMode::Accumulator {
            let carry = self.a & 0x80 != 0;
            self.a <<= 1;
            self.set_flag(StatusFlags::CARRY, carry);
            self.update_zn(self.a);
        } else {
            let (addr, _) = self.operand_address(mode);
            let value = self.memory.read(addr);
            let carry = value & 0x80 != 0;
            let result = value << 1;
            self.memory.write(addr, result);
            self.set_flag(StatusFlags::CARRY, carry);
            self.update_zn(result);
        }
    }

    fn do_lsr(&mut self, mode: AddressingMode) {
        if mode == AddressingMode::Accumulator {
            let carry = self.a & 0x01 != 0;
            self.a >>= 1;
            self.set_flag(StatusFlags::CARRY, carry);
            self.update_zn(self.a);
        } else {
            let (addr, _) = self.operand_address(mode);
            let value = self.memory.read(addr);
            let carry = value & 0x01 != 0;
            let result = value >> 1;
            self.memory.write(addr, result);
            self.set_flag(StatusFlags::CARRY, carry);
            self.update_zn(result);
        }
    }

    fn do_rol(&mut self, mode: AddressingMode) {
        let carry_in = self.get_flag(StatusFlags::CARRY) as u8;
        if mode == AddressingMode::Accumulator {
            let carry_out = self.a & 0x80 != 0;
            self.a = (self.a << 1) | carry_in;
            self.set_flag(StatusFlags::CARRY, carry_out);
            self.update_zn(self.a);
        } else {
            let (addr, _) = self.operand_address(mode);
            let value = self.memory.read(addr);
            let carry_out = value & 0x80 != 0;
            let result = (value << 1) | carry_in;
            self.memory.write(addr, result);
            self.set_flag(StatusFlags::CARRY, carry_out);
            self.update_zn(result);
        }
    }

    fn do_ror(&mut self, mode: AddressingMode) {
        let carry_in = (self.get_flag(StatusFlags::CARRY) as u8) << 7;
        if mode == AddressingMode::Accumulator {
            let carry_out = self.a & 0x01 != 0;
            self.a = (self.a >> 1) | carry_in;
            self.set_flag(StatusFlags::CARRY, carry_out);
            self.update_zn(self.a);
        } else {
            let (addr, _) = self.operand_address(mode);
            let value = self.memory.read(addr);
            let carry_out = value & 0x01 != 0;
            let result = (value >> 1) | carry_in;
            self.memory.write(addr, result);
            self.set_flag(StatusFlags::CARRY, carry_out);
            self.update_zn(result);
        }
    }

    /// ADC: unsigned carry on result > $FF; overflow when operand sign matches
    /// accumulator sign and differs from result sign.
    fn do_adc(&mut self, mode: AddressingMode, cycles: &mut u32, page_cross_cycle: bool) {
        let (operand, crossed) = self.read_operand(mode);
        let carry_in = self.get_flag(StatusFlags::CARRY) as u16;
        let sum = self.a as u16 + operand as u16 + carry_in;
        let result = sum as u8;
        let overflow = !(self.a ^ operand) & (self.a ^ result) & 0x80 != 0;
        self.set_flag(StatusFlags::CARRY, sum > 0xFF);
        self.set_flag(StatusFlags::OVERFLOW, overflow);
        self.a = result;
        self.update_zn(result);
        if crossed && page_cross_cycle {
            *cycles += 1;
        }
    }

    /// SBC: equivalent to ADC with the operand's bits complemented.
    fn do_sbc(&mut self, mode: AddressingMode, cycles: &mut u32, page_cross_cycle: bool) {
        let (operand, crossed) = self.read_operand(mode);
        let inverted = !operand;
        let carry_in = self.get_flag(StatusFlags::CARRY) as u16;
        let sum = self.a as u16 + inverted as u16 + carry_in;
        let result = sum as u8;
        let overflow = !(self.a ^ inverted) & (self.a ^ result) & 0x80 != 0;
        self.set_flag(StatusFlags::CARRY, sum > 0xFF);
        self.set_flag(StatusFlags::OVERFLOW, overflow);
        self.a = result;
        self.update_zn(result);
        if crossed && page_cross_cycle {
            *cycles += 1;
        }
    }

    /// CMP/CPX/CPY: C set when reg >= operand, Z when equal, N from low byte of (reg - operand)
    fn do_compare(&mut self, reg: u8, mode: AddressingMode, cycles: &mut u32, page_cross_cycle: bool) {
        let (operand, crossed) = self.read_operand(mode);
        let result = reg.wrapping_sub(operand);
        self.set_flag(StatusFlags::CARRY, reg >= operand);
        self.set_flag(StatusFlags::ZERO, reg == operand);
        self.set_flag(StatusFlags::NEGATIVE, result & 0x80 != 0);
        if crossed && page_cross_cycle {
            *cycles += 1;
        }
    }

    fn do_branch(&mut self, mnemonic: &str) -> u32 {
        let offset = self.fetch_byte() as i8;
        let taken = match mnemonic {
            "BCC" => !self.get_flag(StatusFlags::CARRY),
            "BCS" => self.get_flag(StatusFlags::CARRY),
            "BEQ" => self.get_flag(StatusFlags::ZERO),
            "BNE" => !self.get_flag(StatusFlags::ZERO),
            "BMI" => self.get_flag(StatusFlags::NEGATIVE),
            "BPL" => !self.get_flag(StatusFlags::NEGATIVE),
            "BVC" => !self.get_flag(StatusFlags::OVERFLOW),
            "BVS" => self.get_flag(StatusFlags::OVERFLOW),
            _ => unreachable!("{mnemonic} is not a branch"),
        };
        if !taken {
            return 0;
        }
        let old_pc = self.pc;
        let new_pc = (old_pc as i32 + offset as i32) as u16;
        self.pc = new_pc;
        if old_pc & 0xFF00 != new_pc & 0xFF00 {
            2
        } else {
            1
        }
    }

    /// BRK: software IRQ. Skips the padding byte after the opcode, pushes the
    /// resulting PC, pushes P with B4 and B5 set, sets I, vectors through $FFFE/$FFFF.
    fn do_brk(&mut self) {
        self.pc = self.pc.wrapping_add(1);
        let pc = self.pc;
        self.push_word(pc);
        let p = (self.status | StatusFlags::BREAK | StatusFlags::UNUSED).bits();
        self.push(p);
        self.set_flag(StatusFlags::INTERRUPT, true);
        self.pc = self.memory.read_word(0xFFFE);
    }

    pub(super) fn execute(&mut self, opcode: u8) -> Result<u8> {
        let info = opcodes::decode(opcode);
        if info.mnemonic == "???" {
            let pc = self.pc.wrapping_sub(1);
            return Err(EmulatorError::UnimplementedOpcode { pc, opcode });
        }

        let mode = info.mode;
        let mut cycles = info.cycles as u32;

        match info.mnemonic {
            "LDA" => {
                let (v, crossed) = self.read_operand(mode);
                self.a = v;
                self.update_zn(v);
                if crossed && info.page_cross_cycle {
                    cycles += 1;
                }
            }
            "LDX" => {
                let (v, crossed) = self.read_operand(mode);
                self.x = v;
                self.update_zn(v);
                if crossed && info.page_cross_cycle {
                    cycles += 1;
                }
            }
            "LDY" => {
                let (v, crossed) = self.read_operand(mode);
                self.y = v;
                self.update_zn(v);
                if crossed && info.page_cross_cycle {
                    cycles += 1;
                }
            }
            "STA" => {
                let (addr, _) = self.operand_address(mode);
                self.memory.write(addr, self.a);
            }
            "STX" => {
                let (addr, _) = self.operand_address(mode);
                self.memory.write(addr, self.x);
            }
            "STY" => {
                let (addr, _) = self.operand_address(mode);
                self.memory.write(addr, self.y);
            }
            "TAX" => {
                self.x = self.a;
                self.update_zn(self.x);
            }
            "TAY" => {
                self.y = self.a;
                self.update_zn(self.y);
            }
            "TXA" => {
                self.a = self.x;
                self.update_zn(self.a);
            }
            "TYA" => {
                self.a = self.y;
                self.update_zn(self.a);
            }
            "TSX" => {
                self.x = self.sp;
                self.update_zn(self.x);
            }
            "TXS" => {
                self.sp = self.x;
            }
            "PHA" => self.push(self.a),
            "PHP" => {
                let p = (self.status | StatusFlags::BREAK | StatusFlags::UNUSED).bits();
                self.push(p);
            }
            "PLA" => {
                self.a = self.pop();
                self.update_zn(self.a);
            }
            "PLP" => {
                let bits = self.pop();
                self.status = (StatusFlags::from_bits_truncate(bits) & !StatusFlags::BREAK)
                    | StatusFlags::UNUSED;
            }
            "ASL" => self.do_asl(mode),
            "LSR" => self.do_lsr(mode),
            "ROL" => self.do_rol(mode),
            "ROR" => self.do_ror(mode),
            "AND" => {
                let (v, crossed) = self.read_operand(mode);
                self.a &= v;
                self.update_zn(self.a);
                if crossed && info.page_cross_cycle {
                    cycles += 1;
                }
            }
            "ORA" => {
                let (v, crossed) = self.read_operand(mode);
                self.a |= v;
                self.update_zn(self.a);
                if crossed && info.page_cross_cycle {
                    cycles += 1;
                }
            }
            "EOR" => {
                let (v, crossed) = self.read_operand(mode);
                self.a ^= v;
                self.update_zn(self.a);
                if crossed && info.page_cross_cycle {
                    cycles += 1;
                }
            }
            "BIT" => {
                let (v, _) = self.read_operand(mode);
                self.set_flag(StatusFlags::ZERO, self.a & v == 0);
                self.set_flag(StatusFlags::OVERFLOW, v & 0x40 != 0);
                self.set_flag(StatusFlags::NEGATIVE, v & 0x80 != 0);
            }
            "ADC" => self.do_adc(mode, &mut cycles, info.page_cross_cycle),
            "SBC" => self.do_sbc(mode, &mut cycles, info.page_cross_cycle),
            "CMP" => {
                let a = self.a;
                self.do_compare(a, mode, &mut cycles, info.page_cross_cycle)
            }
            "CPX" => {
                let x = self.x;
                self.do_compare(x, mode, &mut cycles, false)
            }
            "CPY" => {
                let y = self.y;
                self.do_compare(y, mode, &mut cycles, false)
            }
            "INC" => {
                let (addr, _) = self.operand_address(mode);
                let v = self.memory.read(addr).wrapping_add(1);
                self.memory.write(addr, v);
                self.update_zn(v);
            }
            "INX" => {
                self.x = self.x.wrapping_add(1);
                self.update_zn(self.x);
            }
            "INY" => {
                self.y = self.y.wrapping_add(1);
                self.update_zn(self.y);
            }
            "DEC" => {
                let (addr, _) = self.operand_address(mode);
                let v = self.memory.read(addr).wrapping_sub(1);
                self.memory.write(addr, v);
                self.update_zn(v);
            }
            "DEX" => {
                self.x = self.x.wrapping_sub(1);
                self.update_zn(self.x);
            }
            "DEY" => {
                self.y = self.y.wrapping_sub(1);
                self.update_zn(self.y);
            }
            "JMP" => {
                let (addr, _) = self.operand_address(mode);
                self.pc = addr;
            }
            "JSR" => {
                let addr = self.addr_absolute();
                let return_addr = self.pc.wrapping_sub(1);
                self.push_word(return_addr);
                self.pc = addr;
            }
            "RTS" => {
                let addr = self.pop_word();
                self.pc = addr.wrapping_add(1);
            }
            "RTI" => {
                let bits = self.pop();
                self.status = (StatusFlags::from_bits_truncate(bits) & !StatusFlags::BREAK)
                    | StatusFlags::UNUSED;
                self.pc = self.pop_word();
            }
            "BRK" => self.do_brk(),
            "BCC" | "BCS" | "BEQ" | "BNE" | "BMI" | "BPL" | "BVC" | "BVS" => {
                cycles += self.do_branch(info.mnemonic);
            }
            "CLC" => self.set_flag(StatusFlags::CARRY, false),
            "CLD" => self.set_flag(StatusFlags::DECIMAL, false),
            "CLI" => self.set_flag(StatusFlags::INTERRUPT, false),
            "CLV" => self.set_flag(StatusFlags::OVERFLOW, false),
            "SEC" => self.set_flag(StatusFlags::CARRY, true),
            "SED" => self.set_flag(StatusFlags::DECIMAL, true),
            "SEI" => self.set_flag(StatusFlags::INTERRUPT, true),
            "NOP" => {}
            other => unreachable!("decoded mnemonic {other} has no execute arm"),
        }

        self.cycles = self.cycles.wrapping_add(cycles as u64);
        Ok(cycles as u8)
    }
}
