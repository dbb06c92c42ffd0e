//! Instruction representation

use crate::alu::ALUOp;
use crate::alu::ALUSrc;
use crate::error::Fault;

pub mod decode_helper;

/// Decoded instruction, created fresh every cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Raw representation
    pub raw_inst: u32,
    /// Address the word was fetched from
    pub pc: u32,
    /// Format and its fields
    pub format: Format,
}

impl Instruction {
    /// Decodes a raw word fetched at `pc`. Never fails: unknown operations
    /// are only rejected once their semantics are needed.
    pub fn new(raw_inst: u32, pc: u32) -> Self {
        Self {
            raw_inst,
            pc,
            format: decode_helper::parse(raw_inst, pc),
        }
    }

    /// Looks up the operation in the function table
    pub fn function(&self) -> Result<Function, Fault> {
        Function::lookup(&self.format).ok_or(Fault::UnsupportedInstruction {
            word: self.raw_inst,
            pc: self.pc,
        })
    }
}

/// MIPS instruction format with the fields it carries
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    R {
        rs: u8,
        rt: u8,
        rd: u8,
        shamt: u8,
        funct: u8,
    },
    /// `imm` is already sign- or zero-extended according to the opcode
    I {
        opcode: u8,
        rs: u8,
        rt: u8,
        imm: i32,
    },
    /// `target` is the absolute byte address
    J { opcode: u8, target: u32 },
}

/// Where an operation lives in the encoding space
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selector {
    /// R-format, keyed by funct
    Funct(u8),
    /// I- or J-format, keyed by opcode
    Opcode(u8),
}

/// Supported operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    SLL,
    SRL,
    SRA,
    JR,
    ADD,
    ADDU,
    SUB,
    SUBU,
    AND,
    OR,
    XOR,
    NOR,
    SLT,
    SLTU,
    J,
    JAL,
    BEQ,
    BNE,
    BGTZ,
    ADDI,
    ADDIU,
    SLTI,
    SLTIU,
    ANDI,
    ORI,
    XORI,
    LUI,
    LW,
    SW,
}

/// The opcode/funct table shared by decode, execute, formatting,
/// writeback and the assembler. Indexed by `Function` discriminant
pub static FUNCTION_TABLE: [(Selector, Function, &str); 29] = {
    use Function::*;
    use Selector::*;
    [
        (Funct(0x00), SLL, "sll"),
        (Funct(0x02), SRL, "srl"),
        (Funct(0x03), SRA, "sra"),
        (Funct(0x08), JR, "jr"),
        (Funct(0x20), ADD, "add"),
        (Funct(0x21), ADDU, "addu"),
        (Funct(0x22), SUB, "sub"),
        (Funct(0x23), SUBU, "subu"),
        (Funct(0x24), AND, "and"),
        (Funct(0x25), OR, "or"),
        (Funct(0x26), XOR, "xor"),
        (Funct(0x27), NOR, "nor"),
        (Funct(0x2a), SLT, "slt"),
        (Funct(0x2b), SLTU, "sltu"),
        (Opcode(0x02), J, "j"),
        (Opcode(0x03), JAL, "jal"),
        (Opcode(0x04), BEQ, "beq"),
        (Opcode(0x05), BNE, "bne"),
        (Opcode(0x07), BGTZ, "bgtz"),
        (Opcode(0x08), ADDI, "addi"),
        (Opcode(0x09), ADDIU, "addiu"),
        (Opcode(0x0a), SLTI, "slti"),
        (Opcode(0x0b), SLTIU, "sltiu"),
        (Opcode(0x0c), ANDI, "andi"),
        (Opcode(0x0d), ORI, "ori"),
        (Opcode(0x0e), XORI, "xori"),
        (Opcode(0x0f), LUI, "lui"),
        (Opcode(0x23), LW, "lw"),
        (Opcode(0x2b), SW, "sw"),
    ]
};

impl Function {
    /// Finds the operation for a decoded format
    pub fn lookup(format: &Format) -> Option<Function> {
        let selector = match *format {
            Format::R { funct, .. } => Selector::Funct(funct),
            Format::I { opcode, .. } | Format::J { opcode, .. } => Selector::Opcode(opcode),
        };
        Self::from_selector(selector)
    }

    pub fn from_selector(selector: Selector) -> Option<Function> {
        FUNCTION_TABLE
            .iter()
            .find(|(s, _, _)| *s == selector)
            .map(|(_, function, _)| *function)
    }

    pub fn from_mnemonic(mnemonic: &str) -> Option<Function> {
        FUNCTION_TABLE
            .iter()
            .find(|(_, _, name)| name.eq_ignore_ascii_case(mnemonic))
            .map(|(_, function, _)| *function)
    }

    fn entry(self) -> &'static (Selector, Function, &'static str) {
        &FUNCTION_TABLE[self as usize]
    }

    pub fn selector(self) -> Selector {
        self.entry().0
    }

    pub fn mnemonic(self) -> &'static str {
        self.entry().2
    }

    /// Whether the 16-bit immediate is zero-extended
    pub fn zero_extends(self) -> bool {
        matches!(
            self,
            Function::ANDI | Function::ORI | Function::XORI | Function::LUI
        )
    }

    pub fn controls(self) -> Controls {
        decode_helper::get_controls(self)
    }
}

/// Register written back by an instruction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegDst {
    Rd,
    Rt,
    Link,
}

/// Control signals
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    /// Conditional, PC-relative
    pub branch: bool,
    /// Unconditional, absolute
    pub jump: bool,
    pub mem_read: bool,
    pub mem_write: bool,
    pub reg_dst: Option<RegDst>,
    pub alu_op: Option<ALUOp>,
    pub alu_src: ALUSrc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_consistent() {
        for (i, (selector, function, name)) in FUNCTION_TABLE.iter().enumerate() {
            assert_eq!(*function as usize, i);
            assert_eq!(Function::from_selector(*selector), Some(*function));
            assert_eq!(Function::from_mnemonic(name), Some(*function));
            assert_eq!(function.mnemonic(), *name);
            assert_eq!(function.selector(), *selector);
        }
    }

    #[test]
    fn test_unsupported_function() {
        // mult is outside the supported subset
        let inst = Instruction::new(0x0022_0018, 0x0040_0000);
        assert_eq!(
            inst.function(),
            Err(Fault::UnsupportedInstruction {
                word: 0x0022_0018,
                pc: 0x0040_0000,
            })
        );
    }

    #[test]
    fn test_bgtz_entry() {
        // bgtz $1, 1
        let inst = Instruction::new(0x1c20_0001, 0x0040_0000);
        assert_eq!(inst.function(), Ok(Function::BGTZ));
        assert_eq!(
            inst.format,
            Format::I {
                opcode: 0x07,
                rs: 1,
                rt: 0,
                imm: 1,
            }
        );
    }
}
