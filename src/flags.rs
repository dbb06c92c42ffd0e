use std::path::PathBuf;

use crate::cpu::CPUPolicy;
use crate::error::{SimulatorError, SimulatorResult};

xflags::xflags! {
    /// MIPS single-cycle instruction set simulator.
    cmd sim-args {
        /// Path to the program image: big-endian 32-bit words.
        required image: PathBuf

        /// Prompts before every instruction; a line starting with 'q' quits.
        optional -i, --interactive

        /// Prints all registers after every instruction instead of the changed one.
        optional -r, --registers

        /// Prints all nonzero data memory after every instruction instead of the changed word.
        optional -m, --memory

        /// Enables verbose mode, logging decode and branch details.
        optional -v, --verbose

        /// Prints the instruction and cycle counts after simulation.
        optional --history

        /// Discards writes to $0 so it always reads as zero.
        optional --hardwire-zero

        /// Stops after this many cycles.
        optional --max-cycles cycles: u64

        /// Writes a CSV row per cycle to this file.
        optional --trace path: PathBuf
    }
}

impl SimArgs {
    /// Rejects combinations that xflags cannot express
    pub fn validate(&self) -> SimulatorResult<()> {
        if self.max_cycles == Some(0) {
            return Err(SimulatorError::ConfigError(
                "--max-cycles must be at least 1".to_string(),
            ));
        }
        if self.trace.as_ref() == Some(&self.image) {
            return Err(SimulatorError::ConfigError(
                "--trace would overwrite the program image".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&SimArgs> for CPUPolicy {
    fn from(args: &SimArgs) -> Self {
        CPUPolicy {
            verbose: args.verbose,
            print_registers: args.registers,
            print_memory: args.memory,
            interactive: args.interactive,
            history: args.history,
            hardwire_zero: args.hardwire_zero,
            max_cycles: args.max_cycles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn parse(args: &[&str]) -> SimArgs {
        let args: Vec<OsString> = args.iter().map(OsString::from).collect();
        SimArgs::from_vec(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["prog.bin"]);
        assert_eq!(args.image, PathBuf::from("prog.bin"));
        let policy = CPUPolicy::from(&args);
        assert!(!policy.interactive);
        assert!(!policy.print_registers && !policy.print_memory);
        assert!(!policy.hardwire_zero);
        assert_eq!(policy.max_cycles, None);
        assert_eq!(args.trace, None);
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&[
            "-i",
            "-r",
            "-m",
            "-v",
            "--history",
            "--hardwire-zero",
            "--max-cycles",
            "100",
            "--trace",
            "out.csv",
            "prog.bin",
        ]);
        let policy = CPUPolicy::from(&args);
        assert!(policy.interactive);
        assert!(policy.print_registers && policy.print_memory);
        assert!(policy.verbose && policy.history && policy.hardwire_zero);
        assert_eq!(policy.max_cycles, Some(100));
        assert_eq!(args.trace, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_validate() {
        assert!(parse(&["prog.bin", "--max-cycles", "5"]).validate().is_ok());
        assert!(matches!(
            parse(&["prog.bin", "--max-cycles", "0"]).validate(),
            Err(SimulatorError::ConfigError(_))
        ));
        assert!(matches!(
            parse(&["prog.bin", "--trace", "prog.bin"]).validate(),
            Err(SimulatorError::ConfigError(_))
        ));
    }

    #[test]
    fn test_missing_image() {
        assert!(SimArgs::from_vec(Vec::new()).is_err());
    }
}
