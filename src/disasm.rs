//! Renders decoded instructions as assembly text

use crate::error::Fault;
use crate::instruction::Format;
use crate::instruction::Function;
use crate::instruction::Instruction;

/// Mnemonic and operands, e.g. `addu\t$3, $1, $2`
pub fn format_instruction(inst: &Instruction) -> Result<String, Fault> {
    use Function::*;

    let function = inst.function()?;
    let name = function.mnemonic();

    Ok(match (inst.format, function) {
        (Format::R { rs, rd, shamt, .. }, SLL | SRL | SRA) => {
            format!("{}\t${}, ${}, {}", name, rd, rs, shamt)
        }
        (Format::R { rs, .. }, JR) => format!("{}\t${}", name, rs),
        (Format::R { rs, rt, rd, .. }, _) => format!("{}\t${}, ${}, ${}", name, rd, rs, rt),
        (Format::I { rs, imm, .. }, BGTZ) => {
            let target = branch_target(inst.pc, imm);
            format!("{}\t${}, {:#010x}", name, rs, target)
        }
        (Format::I { rs, rt, imm, .. }, BEQ | BNE) => {
            let target = branch_target(inst.pc, imm);
            format!("{}\t${}, ${}, {:#010x}", name, rs, rt, target)
        }
        (Format::I { rs, rt, imm, .. }, LW | SW) => format!("{}\t${}, {}(${})", name, rt, imm, rs),
        (Format::I { rt, imm, .. }, LUI) => format!("{}\t${}, {}", name, rt, imm),
        (Format::I { rs, rt, imm, .. }, _) => format!("{}\t${}, ${}, {}", name, rt, rs, imm),
        (Format::J { target, .. }, _) => format!("{}\t{:#010x}", name, target),
    })
}

/// Absolute address a taken branch at `pc` lands on
pub fn branch_target(pc: u32, imm: i32) -> u32 {
    pc.wrapping_add(4).wrapping_add((imm << 2) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PC: u32 = 0x0040_0000;

    fn text(raw: u32) -> String {
        format_instruction(&Instruction::new(raw, PC)).unwrap()
    }

    #[test]
    fn test_r_format() {
        // addu $3, $1, $2
        assert_eq!(text(0x0022_1821), "addu\t$3, $1, $2");
        // nor $4, $5, $6
        assert_eq!(text(0x00a6_2027), "nor\t$4, $5, $6");
        // sll $2, $1, 4 (rs is zero)
        assert_eq!(text(0x0001_1100), "sll\t$2, $0, 4");
        // jr $31
        assert_eq!(text(0x03e0_0008), "jr\t$31");
    }

    #[test]
    fn test_i_format() {
        // addiu $1, $0, 10
        assert_eq!(text(0x2401_000a), "addiu\t$1, $0, 10");
        // addiu $1, $0, -1
        assert_eq!(text(0x2401_ffff), "addiu\t$1, $0, -1");
        // ori $2, $2, 0xffff
        assert_eq!(text(0x3442_ffff), "ori\t$2, $2, 65535");
        // lui $1, 0x1001
        assert_eq!(text(0x3c01_1001), "lui\t$1, 4097");
        // lw $8, 4($29)
        assert_eq!(text(0x8fa8_0004), "lw\t$8, 4($29)");
        // sw $8, -8($29)
        assert_eq!(text(0xafa8_fff8), "sw\t$8, -8($29)");
    }

    #[test]
    fn test_branch_prints_absolute_target() {
        // beq $1, $2, 3
        assert_eq!(text(0x1022_0003), "beq\t$1, $2, 0x00400010");
        // bne $1, $2, -1
        assert_eq!(text(0x1422_ffff), "bne\t$1, $2, 0x00400000");
        // bgtz $1, 1
        assert_eq!(text(0x1c20_0001), "bgtz\t$1, 0x00400008");
    }

    #[test]
    fn test_j_format() {
        assert_eq!(text(0x0810_0004), "j\t0x00400010");
        assert_eq!(text(0x0c10_0000), "jal\t0x00400000");
    }

    #[test]
    fn test_unsupported() {
        // mult $1, $2
        let inst = Instruction::new(0x0022_0018, PC);
        assert_eq!(
            format_instruction(&inst),
            Err(Fault::UnsupportedInstruction {
                word: 0x0022_0018,
                pc: PC,
            })
        );
        // opcode 0x3f
        let inst = Instruction::new(0xfc00_0000, PC);
        assert!(format_instruction(&inst).is_err());
    }
}
