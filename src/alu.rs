//! ALU implementation

/// Performs an atomic ALU operation
/// Do signed arithmetic for good
pub fn alu(alu_op: ALUOp, op1: i32, op2: i32) -> i32 {
    match alu_op {
        ALUOp::ADD => op1.wrapping_add(op2),
        ALUOp::SUB => op1.wrapping_sub(op2),
        ALUOp::AND => op1 & op2,
        ALUOp::OR => op1 | op2,
        ALUOp::XOR => op1 ^ op2,
        ALUOp::NOR => !(op1 | op2),
        ALUOp::SLT => (op1 < op2) as i32,
        ALUOp::SLTU => ((op1 as u32) < (op2 as u32)) as i32,
        // Shift amounts come from a 5-bit field
        ALUOp::SLL => ((op1 as u32) << (op2 as u32 & 0x1f)) as i32,
        ALUOp::SRL => ((op1 as u32) >> (op2 as u32 & 0x1f)) as i32,
        ALUOp::SRA => op1 >> (op2 as u32 & 0x1f),
        ALUOp::LUI => ((op2 as u32) << 16) as i32,
        ALUOp::BEQ => (op1 == op2) as i32,
        ALUOp::BNE => (op1 != op2) as i32,
        ALUOp::BGTZ => (op1 > 0) as i32,
    }
}

/// Selector for ALU inputs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ALUSrc {
    // rs, rt
    #[default]
    REG,
    // rs, immediate
    IMM,
    // rt, shamt
    SHAMT,
}

/// Set of ALU operations needed for the supported subset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ALUOp {
    // Arithmetic
    ADD,
    SUB,
    // Logical
    AND,
    OR,
    XOR,
    NOR,
    // Set
    SLT,
    SLTU,
    // Shift
    SLL,
    SRL,
    SRA,
    LUI,
    // Branch condition, 1 when it holds
    BEQ,
    BNE,
    BGTZ,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_wraps() {
        assert_eq!(alu(ALUOp::ADD, 5, 7), 12);
        assert_eq!(alu(ALUOp::ADD, i32::MAX, 1), i32::MIN);
        assert_eq!(alu(ALUOp::SUB, 5, 7), -2);
        assert_eq!(alu(ALUOp::SUB, i32::MIN, 1), i32::MAX);
    }

    #[test]
    fn test_logical() {
        assert_eq!(alu(ALUOp::AND, 0b1100, 0b1010), 0b1000);
        assert_eq!(alu(ALUOp::OR, 0b1100, 0b1010), 0b1110);
        assert_eq!(alu(ALUOp::XOR, 0b1100, 0b1010), 0b0110);
        assert_eq!(alu(ALUOp::NOR, 0, 0), -1);
        assert_eq!(alu(ALUOp::NOR, 0x0f0f, 0x00f0), !0x0fff);
    }

    #[test]
    fn test_set_less_than() {
        assert_eq!(alu(ALUOp::SLT, -1, 0), 1);
        assert_eq!(alu(ALUOp::SLT, 0, -1), 0);
        assert_eq!(alu(ALUOp::SLT, 3, 3), 0);
        assert_eq!(alu(ALUOp::SLTU, -1, 0), 0);
        assert_eq!(alu(ALUOp::SLTU, 0, -1), 1);
    }

    #[test]
    fn test_shifts() {
        assert_eq!(alu(ALUOp::SLL, 1, 4), 16);
        assert_eq!(alu(ALUOp::SLL, 1, 31), i32::MIN);
        assert_eq!(alu(ALUOp::SRL, -16, 4), 0x0fff_ffff);
        assert_eq!(alu(ALUOp::SRA, -16, 4), -1);
        assert_eq!(alu(ALUOp::SRA, 64, 3), 8);
    }

    #[test]
    fn test_lui() {
        assert_eq!(alu(ALUOp::LUI, 123, 0x1234), 0x1234_0000);
        assert_eq!(alu(ALUOp::LUI, 0, 0xffff), 0xffff_0000_u32 as i32);
    }

    #[test]
    fn test_branch_conditions() {
        assert_eq!(alu(ALUOp::BEQ, 4, 4), 1);
        assert_eq!(alu(ALUOp::BEQ, 4, 5), 0);
        assert_eq!(alu(ALUOp::BNE, 4, 5), 1);
        assert_eq!(alu(ALUOp::BNE, -4, -4), 0);
        assert_eq!(alu(ALUOp::BGTZ, 1, 0), 1);
        assert_eq!(alu(ALUOp::BGTZ, 0, 0), 0);
        assert_eq!(alu(ALUOp::BGTZ, -1, 0), 0);
        assert_eq!(alu(ALUOp::BGTZ, i32::MIN, 0), 0);
    }
}
