//! Console reporter for the per-cycle output

use std::io::Write;

use crate::cpu::CPUState;
use crate::error::SimulatorResult;
use crate::memory::StorageInterface;
use crate::single_cycle::Cycle;

/// Writes the text for one cycle: the fetched word, its disassembly, the new
/// PC, then either the changed register/memory word or full dumps,
/// depending on the policy.
pub fn print_cycle(
    out: &mut impl Write,
    cycle: &Cycle,
    cpu: &CPUState,
    mem: &impl StorageInterface,
) -> SimulatorResult<()> {
    if let Some(raw_inst) = cycle.raw_inst {
        writeln!(
            out,
            "Executing instruction at {:08x}: {:08x}",
            cycle.pc, raw_inst
        )?;
    }
    if let Some(text) = &cycle.text {
        writeln!(out, "{}", text)?;
    }
    if let Some(fault) = &cycle.fault {
        writeln!(out, "{}", fault)?;
        return Ok(());
    }

    writeln!(out, "New pc = {:08x}", cycle.new_pc)?;
    print_registers(out, cycle.changed_reg, cpu)?;
    print_memory(out, cycle.changed_mem, cpu, mem)?;
    Ok(())
}

fn print_registers(
    out: &mut impl Write,
    changed_reg: Option<u8>,
    cpu: &CPUState,
) -> SimulatorResult<()> {
    if cpu.policy.print_registers {
        for (k, reg) in cpu.gpr.iter().enumerate() {
            write!(out, "r{:02}: {:08x}  ", k, reg.read())?;
            if (k + 1) % 4 == 0 {
                writeln!(out)?;
            }
        }
        return Ok(());
    }

    match changed_reg {
        Some(index) => writeln!(out, "Updated r{:02} to {:08x}", index, cpu.read(index))?,
        None => writeln!(out, "No register was updated.")?,
    }
    Ok(())
}

fn print_memory(
    out: &mut impl Write,
    changed_mem: Option<u32>,
    cpu: &CPUState,
    mem: &impl StorageInterface,
) -> SimulatorResult<()> {
    if cpu.policy.print_memory {
        writeln!(out, "Nonzero memory")?;
        writeln!(out, "ADDR\t  CONTENTS")?;
        for (address, value) in mem.nonzero_data() {
            writeln!(out, "{:08x}  {:08x}", address, value)?;
        }
        return Ok(());
    }

    match changed_mem.and_then(|a| mem.get32(a).map(|v| (a, v))) {
        Some((address, value)) => writeln!(
            out,
            "Updated memory at address {:08x} to {:08x}",
            address, value
        )?,
        None => writeln!(out, "No memory location was updated.")?,
    }
    Ok(())
}

/// Prints the instruction count collected during the run
pub fn print_history(out: &mut impl Write, cpu: &CPUState) -> SimulatorResult<()> {
    writeln!(out, "[HISTORY] # instructions = {}", cpu.history.inst_count)?;
    writeln!(out, "[HISTORY] # cycles = {}", cpu.history.cycle_count)?;
    Ok(())
}
