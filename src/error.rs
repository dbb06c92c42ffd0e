use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the simulator
#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("Failed to load program image: {0}")]
    LoadError(#[from] LoadError),

    #[error(transparent)]
    Fault(#[from] Fault),

    #[error("Failed to assemble instruction: {0}")]
    AssembleError(#[from] AssembleError),

    #[error("Failed to write trace: {0}")]
    TraceError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// Faults raised while simulating an instruction. Both kinds halt the run.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("Unsupported instruction found. Terminating program")]
    UnsupportedInstruction { word: u32, pc: u32 },

    #[error("Memory Access Exception at {pc:#010x}: address {address:#010x}")]
    MemoryAccess { pc: u32, address: u32 },
}

impl Fault {
    /// PC of the instruction that faulted
    pub fn pc(&self) -> u32 {
        match *self {
            Fault::UnsupportedInstruction { pc, .. } => pc,
            Fault::MemoryAccess { pc, .. } => pc,
        }
    }
}

/// Errors related to reading the program image
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read image '{0}': {1}")]
    FileReadError(PathBuf, #[source] std::io::Error),

    #[error("Program too big: more than {capacity} instruction words")]
    ImageTooLarge { capacity: usize },

    #[error("Image ends with a partial word ({0} trailing bytes)")]
    TrailingBytes(usize),
}

/// Errors related to assembling a single R-format line
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AssembleError {
    #[error("Empty instruction")]
    Empty,

    #[error("Unknown R-format mnemonic: {0}")]
    UnknownMnemonic(String),

    #[error("Invalid register: {0}")]
    InvalidRegister(String),

    #[error("Invalid shift amount: {0}")]
    InvalidShiftAmount(String),

    #[error("'{mnemonic}' expects {expected} operands, got {found}")]
    OperandCount {
        mnemonic: String,
        expected: usize,
        found: usize,
    },
}

/// Type alias for Result with SimulatorError
pub type SimulatorResult<T> = Result<T, SimulatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_pc() {
        let unsupported = Fault::UnsupportedInstruction {
            word: 0x0022_0018,
            pc: 0x0040_0004,
        };
        assert_eq!(unsupported.pc(), 0x0040_0004);

        let access = Fault::MemoryAccess {
            pc: 0x0040_0008,
            address: 0x0040_4000,
        };
        assert_eq!(access.pc(), 0x0040_0008);
    }

    #[test]
    fn test_fault_messages() {
        let unsupported = Fault::UnsupportedInstruction {
            word: 0x0022_0018,
            pc: 0x0040_0004,
        };
        assert_eq!(
            unsupported.to_string(),
            "Unsupported instruction found. Terminating program"
        );

        let access = Fault::MemoryAccess {
            pc: 0x0040_0008,
            address: 0x0040_4000,
        };
        assert_eq!(
            access.to_string(),
            "Memory Access Exception at 0x00400008: address 0x00404000"
        );
    }
}
