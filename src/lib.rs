pub mod alu;
pub mod assembler;
pub mod cpu;
pub mod disasm;
pub mod flags;
pub mod instruction;
pub mod loader;
pub mod memory;
pub mod report;
pub mod run_wrapper;
pub mod trace;

pub mod single_cycle;
pub mod stages;

pub mod error;
