//! MIPS register file and runtime policy

use crate::memory::MemoryLayout;

/// Stack pointer register ($sp)
pub const REG_SP: usize = 29;
/// Link register ($ra)
pub const REG_RA: usize = 31;

/// CPU state
#[derive(Clone, Copy, Debug)]
pub struct CPUState {
    /// Program counter, always a byte address of a word
    pub pc: u32,
    /// General purpose registers
    pub gpr: [Register; 32],

    /// CPU policy
    pub policy: CPUPolicy,

    /// History of execution
    pub history: CPUHistory,
}

impl CPUState {
    /// Zeroed registers, except for $sp which points just past the data
    /// segment. The PC starts at the base of the code segment.
    pub fn make(policy: CPUPolicy, layout: &MemoryLayout) -> Self {
        let mut gpr = [Register::new(0); 32];
        gpr[REG_SP].write(layout.stack_top() as i32);
        Self {
            pc: layout.base,
            gpr,
            policy,
            history: CPUHistory::default(),
        }
    }

    /// Reads a register by index
    pub fn read(&self, index: u8) -> i32 {
        self.gpr[index as usize].read()
    }

    /// Increments history instruction count
    pub fn update_inst_count(&mut self, value: u64) {
        self.history.inst_count += value;
    }
}

/// Register file simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Register {
    /// Current data in the register
    data: i32,
}

impl Register {
    pub fn new(data: i32) -> Self {
        Self { data }
    }

    /// Reads the register
    pub fn read(&self) -> i32 {
        self.data
    }

    /// Writes to register
    pub fn write(&mut self, value: i32) {
        self.data = value;
    }
}

/// CPU policy
#[derive(Clone, Copy, Debug, Default)]
pub struct CPUPolicy {
    pub verbose: bool,
    /// Dump every register after each cycle instead of the changed one
    pub print_registers: bool,
    /// Dump all nonzero data memory after each cycle instead of the changed word
    pub print_memory: bool,
    /// Prompt before every cycle
    pub interactive: bool,
    pub history: bool,
    /// Discard writes to $0
    pub hardwire_zero: bool,
    /// Stop after this many cycles
    pub max_cycles: Option<u64>,
}

/// History module
#[derive(Clone, Copy, Debug, Default)]
pub struct CPUHistory {
    pub cycle_count: u64,
    pub inst_count: u64,
}
