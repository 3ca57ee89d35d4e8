//! 6502 opcode definitions and addressing modes

use std::sync::OnceLock;

/// Addressing modes for 6502
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndexedIndirect, // (Indirect,X)
    IndirectIndexed, // (Indirect),Y
}

/// Opcode information
#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    pub mnemonic: &'static str,
    pub mode: AddressingMode,
    pub cycles: u8,
    /// Add 1 cycle if a read crosses a page boundary (stores always pay it regardless)
    pub page_cross_cycle: bool,
}

const UNDEFINED: OpcodeInfo = OpcodeInfo {
    mnemonic: "???",
    mode: AddressingMode::Implied,
    cycles: 0,
    page_cross_cycle: false,
};

fn build_table() -> [OpcodeInfo; 256] {
    use AddressingMode::*;

    let mut table = [UNDEFINED; 256];
    macro_rules! op {
        ($code:expr, $mnemonic:expr, $mode:expr, $cycles:expr, $page:expr) => {
            table[$code as usize] = OpcodeInfo {
                mnemonic: $mnemonic,
                mode: $mode,
                cycles: $cycles,
                page_cross_cycle: $page,
            };
        };
    }

    // Load/store
    op!(0xA9, "LDA", Immediate, 2, false);
    op!(0xA5, "LDA", ZeroPage, 3, false);
    op!(0xB5, "LDA", ZeroPageX, 4, false);
    op!(0xAD, "LDA", Absolute, 4, false);
    op!(0xBD, "LDA", AbsoluteX, 4, true);
    op!(0xB9, "LDA", AbsoluteY, 4, true);
    op!(0xA1, "LDA", IndexedIndirect, 6, false);
    op!(0xB1, "LDA", IndirectIndexed, 5, true);

    op!(0xA2, "LDX", Immediate, 2, false);
    op!(0xA6, "LDX", ZeroPage, 3, false);
    op!(0xB6, "LDX", ZeroPageY, 4, false);
    op!(0xAE, "LDX", Absolute, 4, false);
    op!(0xBE, "LDX", AbsoluteY, 4, true);

    op!(0xA0, "LDY", Immediate, 2, false);
    op!(0xA4, "LDY", ZeroPage, 3, false);
    op!(0xB4, "LDY", ZeroPageX, 4, false);
    op!(0xAC, "LDY", Absolute, 4, false);
    op!(0xBC, "LDY", AbsoluteX, 4, true);

    op!(0x85, "STA", ZeroPage, 3, false);
    op!(0x95, "STA", ZeroPageX, 4, false);
    op!(0x8D, "STA", Absolute, 4, false);
    op!(0x9D, "STA", AbsoluteX, 5, false);
    op!(0x99, "STA", AbsoluteY, 5, false);
    op!(0x81, "STA", IndexedIndirect, 6, false);
    op!(0x91, "STA", IndirectIndexed, 6, false);

    op!(0x86, "STX", ZeroPage, 3, false);
    op!(0x96, "STX", ZeroPageY, 4, false);
    op!(0x8E, "STX", Absolute, 4, false);

    op!(0x84, "STY", ZeroPage, 3, false);
    op!(0x94, "STY", ZeroPageX, 4, false);
    op!(0x8C, "STY", Absolute, 4, false);

    // Register transfers
    op!(0xAA, "TAX", Implied, 2, false);
    op!(0xA8, "TAY", Implied, 2, false);
    op!(0x8A, "TXA", Implied, 2, false);
    op!(0x98, "TYA", Implied, 2, false);
    op!(0xBA, "TSX", Implied, 2, false);
    op!(0x9A, "TXS", Implied, 2, false);

    // Stack
    op!(0x48, "PHA", Implied, 3, false);
    op!(0x08, "PHP", Implied, 3, false);
    op!(0x68, "PLA", Implied, 4, false);
    op!(0x28, "PLP", Implied, 4, false);

    // Shifts/rotates
    op!(0x0A, "ASL", Accumulator, 2, false);
    op!(0x06, "ASL", ZeroPage, 5, false);
    op!(0x16, "ASL", ZeroPageX, 6, false);
    op!(0x0E, "ASL", Absolute, 6, false);
    op!(0x1E, "ASL", AbsoluteX, 7, false);

    op!(0x4A, "LSR", Accumulator, 2, false);
    op!(0x46, "LSR", ZeroPage, 5, false);
    op!(0x56, "LSR", ZeroPageX, 6, false);
    op!(0x4E, "LSR", Absolute, 6, false);
    op!(0x5E, "LSR", AbsoluteX, 7, false);

    op!(0x2A, "ROL", Accumulator, 2, false);
    op!(0x26, "ROL", ZeroPage, 5, false);
    op!(0x36, "ROL", ZeroPageX, 6, false);
    op!(0x2E, "ROL", Absolute, 6, false);
    op!(0x3E, "ROL", AbsoluteX, 7, false);

    op!(0x6A, "ROR", Accumulator, 2, false);
    op!(0x66, "ROR", ZeroPage, 5, false);
    op!(0x76, "ROR", ZeroPageX, 6, false);
    op!(0x6E, "ROR", Absolute, 6, false);
    op!(0x7E, "ROR", AbsoluteX, 7, false);

    // Logic
    op!(0x29, "AND", Immediate, 2, false);
    op!(0x25, "AND", ZeroPage, 3, false);
    op!(0x35, "AND", ZeroPageX, 4, false);
    op!(0x2D, "AND", Absolute, 4, false);
    op!(0x3D, "AND", AbsoluteX, 4, true);
    op!(0x39, "AND", AbsoluteY, 4, true);
    op!(0x21, "AND", IndexedIndirect, 6, false);
    op!(0x31, "AND", IndirectIndexed, 5, true);

    op!(0x09, "ORA", Immediate, 2, false);
    op!(0x05, "ORA", ZeroPage, 3, false);
    op!(0x15, "ORA", ZeroPageX, 4, false);
    op!(0x0D, "ORA", Absolute, 4, false);
    op!(0x1D, "ORA", AbsoluteX, 4, true);
    op!(0x19, "ORA", AbsoluteY, 4, true);
    op!(0x01, "ORA", IndexedIndirect, 6, false);
    op!(0x11, "ORA", IndirectIndexed, 5, true);

    op!(0x49, "EOR", Immediate, 2, false);
    op!(0x45, "EOR", ZeroPage, 3, false);
    op!(0x55, "EOR", ZeroPageX, 4, false);
    op!(0x4D, "EOR", Absolute, 4, false);
    op!(0x5D, "EOR", AbsoluteX, 4, true);
    op!(0x59, "EOR", AbsoluteY, 4, true);
    op!(0x41, "EOR", IndexedIndirect, 6, false);
    op!(0x51, "EOR", IndirectIndexed, 5, true);

    op!(0x24, "BIT", ZeroPage, 3, false);
    op!(0x2C, "BIT", Absolute, 4, false);

    // Arithmetic
    op!(0x69, "ADC", Immediate, 2, false);
    op!(0x65, "ADC", ZeroPage, 3, false);
    op!(0x75, "ADC", ZeroPageX, 4, false);
    op!(0x6D, "ADC", Absolute, 4, false);
    op!(0x7D, "ADC", AbsoluteX, 4, true);
    op!(0x79, "ADC", AbsoluteY, 4, true);
    op!(0x61, "ADC", IndexedIndirect, 6, false);
    op!(0x71, "ADC", IndirectIndexed, 5, true);

    op!(0xE9, "SBC", Immediate, 2, false);
    op!(0xE5, "SBC", ZeroPage, 3, false);
    op!(0xF5, "SBC", ZeroPageX, 4, false);
    op!(0xED, "SBC", Absolute, 4, false);
    op!(0xFD, "SBC", AbsoluteX, 4, true);
    op!(0xF9, "SBC", AbsoluteY, 4, true);
    op!(0xE1, "SBC", IndexedIndirect, 6, false);
    op!(0xF1, "SBC", IndirectIndexed, 5, true);

    op!(0xC9, "CMP", Immediate, 2, false);
    op!(0xC5, "CMP", ZeroPage, 3, false);
    op!(0xD5, "CMP", ZeroPageX, 4, false);
    op!(0xCD, "CMP", Absolute, 4, false);
    op!(0xDD, "CMP", AbsoluteX, 4, true);
    op!(0xD9, "CMP", AbsoluteY, 4, true);
    op!(0xC1, "CMP", IndexedIndirect, 6, false);
    op!(0xD1, "CMP", IndirectIndexed, 5, true);

    op!(0xE0, "CPX", Immediate, 2, false);
    op!(0xE4, "CPX", ZeroPage, 3, false);
    op!(0xEC, "CPX", Absolute, 4, false);

    op!(0xC0, "CPY", Immediate, 2, false);
    op!(0xC4, "CPY", ZeroPage, 3, false);
    op!(0xCC, "CPY", Absolute, 4, false);

    // Increment/decrement
    op!(0xE6, "INC", ZeroPage, 5, false);
    op!(0xF6, "INC", ZeroPageX, 6, false);
    op!(0xEE, "INC", Absolute, 6, false);
    op!(0xFE, "INC", AbsoluteX, 7, false);
    op!(0xE8, "INX", Implied, 2, false);
    op!(0xC8, "INY", Implied, 2, false);

    op!(0xC6, "DEC", ZeroPage, 5, false);
    op!(0xD6, "DEC", ZeroPageX, 6, false);
    op!(0xCE, "DEC", Absolute, 6, false);
    op!(0xDE, "DEC", AbsoluteX, 7, false);
    op!(0xCA, "DEX", Implied, 2, false);
    op!(0x88, "DEY", Implied, 2, false);

    // Control flow
    op!(0x4C, "JMP", Absolute, 3, false);
    op!(0x6C, "JMP", Indirect, 5, false);
    op!(0x20, "JSR", Absolute, 6, false);
    op!(0x60, "RTS", Implied, 6, false);
    op!(0x40, "RTI", Implied, 6, false);
    op!(0x00, "BRK", Implied, 7, false);

    // Branches (base 2 cycles; +1 taken, +1 more on page cross, added by the handler)
    op!(0x90, "BCC", Relative, 2, false);
    op!(0xB0, "BCS", Relative, 2, false);
    op!(0xF0, "BEQ", Relative, 2, false);
    op!(0xD0, "BNE", Relative, 2, false);
    op!(0x30, "BMI", Relative, 2, false);
    op!(0x10, "BPL", Relative, 2, false);
    op!(0x50, "BVC", Relative, 2, false);
    op!(0x70, "BVS", Relative, 2, false);

    // Flags
    op!(0x18, "CLC", Implied, 2, false);
    op!(0xD8, "CLD", Implied, 2, false);
    op!(0x58, "CLI", Implied, 2, false);
    op!(0xB8, "CLV", Implied, 2, false);
    op!(0x38, "SEC", Implied, 2, false);
    op!(0xF8, "SED", Implied, 2, false);
    op!(0x78, "SEI", Implied, 2, false);

    op!(0xEA, "NOP", Implied, 2, false);

    table
}

static TABLE: OnceLock<[OpcodeInfo; 256]> = OnceLock::new();

/// Decode an opcode byte into its mnemonic, addressing mode, and base cycle cost.
/// Unofficial/undefined opcodes decode to mnemonic `"???"`.
pub fn decode(opcode: u8) -> OpcodeInfo {
    TABLE.get_or_init(build_table)[opcode as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_opcode() {
        let info = decode(0xA9);
        assert_eq!(info.mnemonic, "LDA");
        assert_eq!(info.mode, AddressingMode::Immediate);
        assert_eq!(info.cycles, 2);
    }

    #[test]
    fn test_decode_unofficial_opcode_is_undefined() {
        let info = decode(0x02); // not a documented opcode
        assert_eq!(info.mnemonic, "???");
    }

    #[test]
    fn test_table_has_151_official_opcodes() {
        let count = (0u16..=255).filter(|&op| decode(op as u8).mnemonic != "???").count();
        assert_eq!(count, 151);
    }
}
