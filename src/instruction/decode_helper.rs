//! Decoding helper functions.

use super::Controls;
use super::Format;
use super::Function;
use super::RegDst;
use super::Selector;
use crate::alu::ALUOp;
use crate::alu::ALUSrc;

/// Opcode of every R-format instruction
pub const OP_R_TYPE: u8 = 0x00;
pub const OP_J: u8 = 0x02;
pub const OP_JAL: u8 = 0x03;

/// Splits a raw word into its format and fields
pub fn parse(raw_inst: u32, pc: u32) -> Format {
    match get_opcode(raw_inst) {
        OP_R_TYPE => parse_format_r(raw_inst),
        OP_J | OP_JAL => parse_format_j(raw_inst, pc),
        _ => parse_format_i(raw_inst),
    }
}

/// Parses fields for an R-type instruction
fn parse_format_r(raw_inst: u32) -> Format {
    Format::R {
        rs: get_rs(raw_inst),
        rt: get_rt(raw_inst),
        rd: get_rd(raw_inst),
        shamt: get_shamt(raw_inst),
        funct: get_funct(raw_inst),
    }
}

/// Parses fields for an I-type instruction
fn parse_format_i(raw_inst: u32) -> Format {
    let opcode = get_opcode(raw_inst);
    let imm16 = get_imm16(raw_inst);
    let zero_extend = Function::from_selector(Selector::Opcode(opcode))
        .is_some_and(Function::zero_extends);
    let imm = if zero_extend {
        zero_extend_16(imm16)
    } else {
        sign_extend_16(imm16)
    };
    Format::I {
        opcode,
        rs: get_rs(raw_inst),
        rt: get_rt(raw_inst),
        imm,
    }
}

/// Parses fields for a J-type instruction
fn parse_format_j(raw_inst: u32, pc: u32) -> Format {
    Format::J {
        opcode: get_opcode(raw_inst),
        target: jump_target(pc, get_target26(raw_inst)),
    }
}

/// The upper 4 bits of the following instruction's address, followed by the
/// 26-bit field shifted left by 2
pub fn jump_target(pc: u32, target26: u32) -> u32 {
    (pc.wrapping_add(4) & 0xf000_0000) | ((target26 & 0x03ff_ffff) << 2)
}

pub fn sign_extend_16(imm16: u16) -> i32 {
    imm16 as i16 as i32
}

pub fn zero_extend_16(imm16: u16) -> i32 {
    imm16 as i32
}

pub fn get_controls(function: Function) -> Controls {
    use Function::*;

    Controls {
        branch: matches!(function, BEQ | BNE | BGTZ),
        jump: matches!(function, J | JAL | JR),
        mem_read: matches!(function, LW),
        mem_write: matches!(function, SW),
        reg_dst: match function {
            JR | J | BEQ | BNE | BGTZ | SW => None,
            JAL => Some(RegDst::Link),
            SLL | SRL | SRA | ADD | ADDU | SUB | SUBU | AND | OR | XOR | NOR | SLT | SLTU => {
                Some(RegDst::Rd)
            }
            ADDI | ADDIU | SLTI | SLTIU | ANDI | ORI | XORI | LUI | LW => Some(RegDst::Rt),
        },
        alu_op: match function {
            ADD | ADDU | ADDI | ADDIU | LW | SW => Some(ALUOp::ADD),
            SUB | SUBU => Some(ALUOp::SUB),
            AND | ANDI => Some(ALUOp::AND),
            OR | ORI => Some(ALUOp::OR),
            XOR | XORI => Some(ALUOp::XOR),
            NOR => Some(ALUOp::NOR),
            SLT | SLTI => Some(ALUOp::SLT),
            SLTU | SLTIU => Some(ALUOp::SLTU),
            SLL => Some(ALUOp::SLL),
            SRL => Some(ALUOp::SRL),
            SRA => Some(ALUOp::SRA),
            LUI => Some(ALUOp::LUI),
            BEQ => Some(ALUOp::BEQ),
            BNE => Some(ALUOp::BNE),
            BGTZ => Some(ALUOp::BGTZ),
            JR | J | JAL => None,
        },
        alu_src: match function {
            SLL | SRL | SRA => ALUSrc::SHAMT,
            ADDI | ADDIU | SLTI | SLTIU | ANDI | ORI | XORI | LUI | LW | SW => ALUSrc::IMM,
            _ => ALUSrc::REG,
        },
    }
}

/// Extracts opcode from a raw instruction
pub fn get_opcode(raw_inst: u32) -> u8 {
    (raw_inst >> 26) as u8
}

/// Extracts the rs field from a raw instruction
pub fn get_rs(raw_inst: u32) -> u8 {
    ((raw_inst >> 21) & 0x1f) as u8
}

/// Extracts the rt field from a raw instruction
pub fn get_rt(raw_inst: u32) -> u8 {
    ((raw_inst >> 16) & 0x1f) as u8
}

/// Extracts the rd field from a raw instruction
pub fn get_rd(raw_inst: u32) -> u8 {
    ((raw_inst >> 11) & 0x1f) as u8
}

/// Extracts the shift amount from a raw instruction
pub fn get_shamt(raw_inst: u32) -> u8 {
    ((raw_inst >> 6) & 0x1f) as u8
}

/// Extracts the funct field from a raw instruction
pub fn get_funct(raw_inst: u32) -> u8 {
    (raw_inst & 0x3f) as u8
}

/// Extracts the 16-bit immediate from a raw instruction
pub fn get_imm16(raw_inst: u32) -> u16 {
    (raw_inst & 0xffff) as u16
}

/// Extracts the 26-bit jump field from a raw instruction
pub fn get_target26(raw_inst: u32) -> u32 {
    raw_inst & 0x03ff_ffff
}
