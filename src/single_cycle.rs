//! Single cycle implementation

use log::{debug, warn};

use crate::cpu::CPUState;
use crate::disasm::format_instruction;
use crate::error::{Fault, SimulatorResult};
use crate::memory::StorageInterface;
use crate::stages::*;

/// Why the simulation stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Halt {
    /// External stop request (interactive quit)
    Stopped,
    /// The configured cycle budget ran out
    CycleLimit,
    Fault(Fault),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Halted(Halt),
}

/// Observable output of one cycle
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cycle {
    /// Address the instruction was fetched from
    pub pc: u32,
    /// None when the fetch itself faulted
    pub raw_inst: Option<u32>,
    /// None when the instruction could not be fetched or formatted
    pub text: Option<String>,
    pub new_pc: u32,
    pub changed_reg: Option<u8>,
    pub changed_mem: Option<u32>,
    pub fault: Option<Fault>,
}

impl Cycle {
    fn at(pc: u32) -> Self {
        Self {
            pc,
            raw_inst: None,
            text: None,
            new_pc: pc,
            changed_reg: None,
            changed_mem: None,
            fault: None,
        }
    }
}

/// The fetch-decode-execute loop. Owns the machine state and is the only
/// place it gets mutated.
pub struct Simulator<M: StorageInterface> {
    pub cpu: CPUState,
    pub mem: M,
    state: RunState,
}

impl<M: StorageInterface> Simulator<M> {
    pub fn new(cpu: CPUState, mem: M) -> Self {
        Self {
            cpu,
            mem,
            state: RunState::Running,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Runs one instruction. A fault halts the simulator and leaves the
    /// machine state untouched for that instruction.
    pub fn step(&mut self) -> Cycle {
        debug_assert_eq!(self.state, RunState::Running);

        let mut cycle = Cycle::at(self.cpu.pc);
        self.cpu.history.cycle_count += 1;

        if let Err(fault) = self.try_step(&mut cycle) {
            warn!("{}", fault);
            cycle.fault = Some(fault);
            self.state = RunState::Halted(Halt::Fault(fault));
        }
        cycle
    }

    fn try_step(&mut self, cycle: &mut Cycle) -> Result<(), Fault> {
        let pc = cycle.pc;

        // IF
        let raw_inst = instruction_fetch(pc, &self.mem)?;
        cycle.raw_inst = Some(raw_inst);
        // ID
        let inst = instruction_decode(raw_inst, pc);
        cycle.text = Some(format_instruction(&inst)?);
        let (rs, rt) = register_read(&inst, &self.cpu);
        debug!(
            "{:#010x}: {:?}; rs = {:#010x}, rt = {:#010x}",
            pc, inst.format, rs, rt
        );
        // EX
        let exec_result = execute(&inst, rs, rt)?;
        let new_pc = update_pc(&inst, &exec_result)?;
        // MEM
        let mem_effect = memory_access(&inst, &exec_result, rt, &self.mem)?;
        // WB
        let reg_write = write_back(&inst, &exec_result, &mem_effect, &self.cpu.policy)?;

        // Nothing can fault past this point
        self.cpu.pc = new_pc;
        cycle.new_pc = new_pc;
        if let MemEffect::Store { address, value } = mem_effect {
            self.mem.set32(address, value);
            cycle.changed_mem = Some(address);
        }
        if let Some(RegWrite { index, value }) = reg_write {
            self.cpu.gpr[index as usize].write(value);
            cycle.changed_reg = Some(index);
        }
        self.cpu.update_inst_count(1);

        if new_pc != pc.wrapping_add(4) {
            debug!("Branching from {:#010x} to {:#010x}", pc, new_pc);
        }
        Ok(())
    }

    /// Steps until a fault or an external stop. `should_stop` is polled
    /// before every cycle; `observer` sees every completed cycle.
    pub fn run<S, O>(&mut self, mut should_stop: S, mut observer: O) -> SimulatorResult<Halt>
    where
        S: FnMut(&CPUState) -> bool,
        O: FnMut(&Self, &Cycle) -> SimulatorResult<()>,
    {
        loop {
            if let RunState::Halted(halt) = self.state {
                return Ok(halt);
            }

            let limit_reached = self
                .cpu
                .policy
                .max_cycles
                .is_some_and(|limit| self.cpu.history.cycle_count >= limit);
            if limit_reached {
                self.state = RunState::Halted(Halt::CycleLimit);
                continue;
            }
            if should_stop(&self.cpu) {
                self.state = RunState::Halted(Halt::Stopped);
                continue;
            }

            let cycle = self.step();
            observer(self, &cycle)?;
        }
    }
}
