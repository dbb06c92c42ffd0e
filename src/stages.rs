//! The single-cycle stages. Each stage reads the machine state and returns
//! what it wants changed; only the driver commits.

use crate::alu::{alu, ALUSrc};
use crate::cpu::{CPUPolicy, CPUState, REG_RA};
use crate::error::Fault;
use crate::instruction::{Format, Function, Instruction, RegDst};
use crate::memory::StorageInterface;

/// Result of the execute stage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecResult {
    /// ALU result, effective address, branch byte offset, or jump target
    pub value: i32,
    /// Branch condition held
    pub taken: bool,
}

/// Result of the memory stage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemEffect {
    Nothing,
    Load { address: u32, value: i32 },
    /// Pending store, applied by the driver
    Store { address: u32, value: i32 },
}

/// Pending register write, applied by the driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegWrite {
    pub index: u8,
    pub value: i32,
}

/// IF: Fetch the instruction from memory
pub fn instruction_fetch(pc: u32, mem: &impl StorageInterface) -> Result<u32, Fault> {
    mem.fetch(pc).ok_or(Fault::MemoryAccess { pc, address: pc })
}

/// ID: Instruction decode
pub fn instruction_decode(raw_inst: u32, pc: u32) -> Instruction {
    Instruction::new(raw_inst, pc)
}

/// ID: Register read, returns the values of (rs, rt)
pub fn register_read(inst: &Instruction, cpu: &CPUState) -> (i32, i32) {
    match inst.format {
        Format::R { rs, rt, .. } | Format::I { rs, rt, .. } => (cpu.read(rs), cpu.read(rt)),
        Format::J { .. } => (0, 0),
    }
}

/// EX: Compute the value and branch decision
pub fn execute(inst: &Instruction, rs: i32, rt: i32) -> Result<ExecResult, Fault> {
    let function = inst.function()?;
    let controls = function.controls();

    let Some(alu_op) = controls.alu_op else {
        // Jumps carry their destination
        let value = match (inst.format, function) {
            (Format::J { target, .. }, _) => target as i32,
            (_, Function::JR) => rs,
            _ => unreachable!("{:?} has no ALU operation", function),
        };
        return Ok(ExecResult {
            value,
            taken: false,
        });
    };

    let (op1, op2) = match (controls.alu_src, inst.format) {
        (ALUSrc::REG, _) => (rs, rt),
        (ALUSrc::IMM, Format::I { imm, .. }) => (rs, imm),
        (ALUSrc::SHAMT, Format::R { shamt, .. }) => (rt, shamt as i32),
        (src, format) => unreachable!("{:?} operands from {:?}", src, format),
    };
    let result = alu(alu_op, op1, op2);

    if controls.branch {
        let Format::I { imm, .. } = inst.format else {
            unreachable!("branch outside I-format");
        };
        return Ok(ExecResult {
            value: imm << 2,
            taken: result != 0,
        });
    }

    Ok(ExecResult {
        value: result,
        taken: false,
    })
}

/// Computes the PC of the next instruction
pub fn update_pc(inst: &Instruction, exec: &ExecResult) -> Result<u32, Fault> {
    // Relative offsets apply to the address after the branch
    let next_pc = inst.pc.wrapping_add(4);

    let function = inst.function()?;
    let controls = function.controls();
    let new_pc = if controls.jump {
        exec.value as u32
    } else if controls.branch && exec.taken {
        next_pc.wrapping_add(exec.value as u32)
    } else {
        next_pc
    };
    // Only jr can leave the PC unaligned; the next fetch faults on it
    debug_assert!(new_pc % 4 == 0 || function == Function::JR);
    Ok(new_pc)
}

/// MEM: Check and perform the load, or prepare the store
pub fn memory_access(
    inst: &Instruction,
    exec: &ExecResult,
    rt: i32,
    mem: &impl StorageInterface,
) -> Result<MemEffect, Fault> {
    let controls = inst.function()?.controls();
    if !controls.mem_read && !controls.mem_write {
        return Ok(MemEffect::Nothing);
    }

    let address = exec.value as u32;
    let fault = Fault::MemoryAccess {
        pc: inst.pc,
        address,
    };
    if !mem.layout().in_data_window(address) {
        return Err(fault);
    }

    if controls.mem_read {
        let value = mem.get32(address).ok_or(fault)?;
        Ok(MemEffect::Load { address, value })
    } else {
        Ok(MemEffect::Store { address, value: rt })
    }
}

/// WB: Select the register to write and its value
pub fn write_back(
    inst: &Instruction,
    exec: &ExecResult,
    mem_effect: &MemEffect,
    policy: &CPUPolicy,
) -> Result<Option<RegWrite>, Fault> {
    let controls = inst.function()?.controls();

    let write = match (controls.reg_dst, inst.format) {
        (None, _) => None,
        (Some(RegDst::Link), _) => Some(RegWrite {
            index: REG_RA as u8,
            value: inst.pc.wrapping_add(4) as i32,
        }),
        (Some(RegDst::Rd), Format::R { rd, .. }) => Some(RegWrite {
            index: rd,
            value: exec.value,
        }),
        (Some(RegDst::Rt), Format::I { rt, .. }) => {
            let value = match *mem_effect {
                MemEffect::Load { value, .. } => value,
                _ => exec.value,
            };
            Some(RegWrite { index: rt, value })
        }
        (Some(dst), format) => unreachable!("{:?} in {:?}", dst, format),
    };

    // You don't write to $0 when it is hard-wired
    Ok(write.filter(|w| !(policy.hardwire_zero && w.index == 0)))
}
