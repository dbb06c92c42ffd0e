//! A simulator wrapper

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use crate::cpu::CPUPolicy;
use crate::cpu::CPUState;
use crate::error::SimulatorResult;
use crate::loader;
use crate::memory::MemoryLayout;
use crate::memory::StorageInterface;
use crate::report;
use crate::single_cycle::{Halt, Simulator};
use crate::trace::TraceWriter;

/// Run simulation on the given image file
/// and return the reason it stopped
pub fn run(image: &Path, policy: CPUPolicy, trace_path: Option<&Path>) -> SimulatorResult<Halt> {
    let layout = MemoryLayout::default();
    let mem = loader::load_file(image, layout)?;
    let cpu = CPUState::make(policy, &layout);

    let trace = match trace_path {
        Some(path) => Some(TraceWriter::new(BufWriter::new(File::create(path)?))?),
        None => None,
    };

    let stdin = io::stdin();
    let should_stop = |_: &CPUState| {
        if !policy.interactive {
            return false;
        }
        print!("> ");
        if io::stdout().flush().is_err() {
            return true;
        }
        quit_requested(&mut stdin.lock())
    };

    let sim = Simulator::new(cpu, mem);
    simulate(sim, should_stop, &mut io::stdout(), trace)
}

/// Drives the simulator to a halt, reporting every cycle to `out` and
/// optionally to a CSV trace
pub fn simulate<M, S, W, T>(
    mut sim: Simulator<M>,
    should_stop: S,
    out: &mut W,
    mut trace: Option<TraceWriter<T>>,
) -> SimulatorResult<Halt>
where
    M: StorageInterface,
    S: FnMut(&CPUState) -> bool,
    W: Write,
    T: Write,
{
    let halt = sim.run(should_stop, |sim, cycle| {
        report::print_cycle(out, cycle, &sim.cpu, &sim.mem)?;
        if let Some(trace) = trace.as_mut() {
            trace.record(cycle)?;
        }
        Ok(())
    })?;

    if sim.cpu.policy.history {
        report::print_history(out, &sim.cpu)?;
    }
    if let Some(trace) = trace {
        trace.finish()?.flush()?;
    }
    out.flush()?;
    Ok(halt)
}

/// Reads one line of interactive input. End of input or a line starting
/// with 'q' stops the simulation.
pub fn quit_requested(input: &mut impl BufRead) -> bool {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => true,
        Ok(_) => line.trim_start().starts_with('q'),
    }
}
