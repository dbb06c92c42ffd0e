//! Single-line R-format assembler

use crate::error::{AssembleError, SimulatorResult};
use crate::instruction::{Function, Selector};

/// Conventional register names, by index
pub const REGISTER_NAMES: [&str; 32] = [
    "zero", "at", "v0", "v1", "a0", "a1", "a2", "a3", "t0", "t1", "t2", "t3", "t4", "t5", "t6",
    "t7", "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", "t8", "t9", "k0", "k1", "gp", "sp", "fp",
    "ra",
];

/// Operand order of an R-format mnemonic
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operands {
    /// `rd, rs, rt`
    RdRsRt,
    /// `rd, rt, shamt`
    RdRtShamt,
    /// `rs, rt`
    RsRt,
    Rs,
    Rd,
}

impl Operands {
    fn count(self) -> usize {
        match self {
            Operands::RdRsRt | Operands::RdRtShamt => 3,
            Operands::RsRt => 2,
            Operands::Rs | Operands::Rd => 1,
        }
    }
}

/// R-format operations on HI/LO. The simulator does not execute them but
/// they still assemble.
const HI_LO_OPS: [(&str, u8, Operands); 8] = [
    ("mult", 0x18, Operands::RsRt),
    ("multu", 0x19, Operands::RsRt),
    ("div", 0x1a, Operands::RsRt),
    ("divu", 0x1b, Operands::RsRt),
    ("mfhi", 0x10, Operands::Rd),
    ("mthi", 0x11, Operands::Rs),
    ("mflo", 0x12, Operands::Rd),
    ("mtlo", 0x13, Operands::Rs),
];

/// Finds the funct code and operand order of an R-format mnemonic
fn lookup_r(mnemonic: &str) -> Option<(u8, Operands)> {
    if let Some(function) = Function::from_mnemonic(mnemonic) {
        let Selector::Funct(funct) = function.selector() else {
            return None;
        };
        let operands = match function {
            Function::JR => Operands::Rs,
            Function::SLL | Function::SRL | Function::SRA => Operands::RdRtShamt,
            _ => Operands::RdRsRt,
        };
        return Some((funct, operands));
    }

    HI_LO_OPS
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(mnemonic))
        .map(|&(_, funct, operands)| (funct, operands))
}

/// Assembles one R-format line such as `addu $3, $1, $2` into its encoding.
///
/// Operand order follows the assembly syntax: `rd, rs, rt` for register
/// operations, `rd, rt, shamt` for shifts, `rs, rt` for multiply and
/// divide, and a single register for `jr` and the HI/LO moves.
pub fn assemble_r(line: &str) -> SimulatorResult<u32> {
    let mut tokens = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());

    let mnemonic = tokens.next().ok_or(AssembleError::Empty)?;
    let operands: Vec<&str> = tokens.collect();

    let (funct, order) = lookup_r(mnemonic)
        .ok_or_else(|| AssembleError::UnknownMnemonic(mnemonic.to_string()))?;

    let expected = order.count();
    if operands.len() != expected {
        return Err(AssembleError::OperandCount {
            mnemonic: mnemonic.to_string(),
            expected,
            found: operands.len(),
        }
        .into());
    }

    let (rs, rt, rd, shamt) = match order {
        Operands::RdRsRt => (
            parse_register(operands[1])?,
            parse_register(operands[2])?,
            parse_register(operands[0])?,
            0,
        ),
        Operands::RdRtShamt => (
            0,
            parse_register(operands[1])?,
            parse_register(operands[0])?,
            parse_shamt(operands[2])?,
        ),
        Operands::RsRt => (
            parse_register(operands[0])?,
            parse_register(operands[1])?,
            0,
            0,
        ),
        Operands::Rs => (parse_register(operands[0])?, 0, 0, 0),
        Operands::Rd => (0, 0, parse_register(operands[0])?, 0),
    };

    Ok(encode_r(rs, rt, rd, shamt, funct))
}

/// Packs R-format fields into a word
pub fn encode_r(rs: u8, rt: u8, rd: u8, shamt: u8, funct: u8) -> u32 {
    (u32::from(rs & 0x1f) << 21)
        | (u32::from(rt & 0x1f) << 16)
        | (u32::from(rd & 0x1f) << 11)
        | (u32::from(shamt & 0x1f) << 6)
        | u32::from(funct & 0x3f)
}

/// Accepts `$3`, `$t0`, `$zero`
pub fn parse_register(token: &str) -> Result<u8, AssembleError> {
    let invalid = || AssembleError::InvalidRegister(token.to_string());
    let name = token.strip_prefix('$').ok_or_else(invalid)?;

    if let Ok(index) = name.parse::<u8>() {
        return if index < 32 { Ok(index) } else { Err(invalid()) };
    }
    REGISTER_NAMES
        .iter()
        .position(|r| r.eq_ignore_ascii_case(name))
        .map(|i| i as u8)
        .ok_or_else(invalid)
}

fn parse_shamt(token: &str) -> Result<u8, AssembleError> {
    let parsed = match token.strip_prefix("0x") {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => token.parse::<u8>(),
    };
    match parsed {
        Ok(shamt) if shamt < 32 => Ok(shamt),
        _ => Err(AssembleError::InvalidShiftAmount(token.to_string())),
    }
}
