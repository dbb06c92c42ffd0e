//! CSV export of the per-cycle output

use std::io::Write;

use crate::error::{SimulatorError, SimulatorResult};
use crate::single_cycle::Cycle;

const HEADER: [&str; 8] = [
    "cycle",
    "pc",
    "word",
    "instruction",
    "new_pc",
    "changed_reg",
    "changed_mem",
    "fault",
];

/// Writes one CSV row per simulated cycle
pub struct TraceWriter<W: Write> {
    writer: csv::Writer<W>,
    cycle: u64,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(inner: W) -> SimulatorResult<Self> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(HEADER)?;
        Ok(Self { writer, cycle: 0 })
    }

    pub fn record(&mut self, cycle: &Cycle) -> SimulatorResult<()> {
        self.cycle += 1;
        let hex = |v: u32| format!("{:#010x}", v);

        self.writer.write_record([
            self.cycle.to_string(),
            hex(cycle.pc),
            cycle.raw_inst.map(hex).unwrap_or_default(),
            cycle.text.clone().unwrap_or_default(),
            hex(cycle.new_pc),
            cycle.changed_reg.map(|r| r.to_string()).unwrap_or_default(),
            cycle.changed_mem.map(hex).unwrap_or_default(),
            cycle.fault.map(|f| f.to_string()).unwrap_or_default(),
        ])?;
        Ok(())
    }

    /// Flushes and hands back the underlying writer
    pub fn finish(self) -> SimulatorResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| SimulatorError::IoError(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fault;

    #[test]
    fn test_trace_rows() {
        let mut trace = TraceWriter::new(Vec::new()).unwrap();
        trace
            .record(&Cycle {
                pc: 0x0040_0000,
                raw_inst: Some(0x2401_000a),
                text: Some("addiu\t$1, $0, 10".to_string()),
                new_pc: 0x0040_0004,
                changed_reg: Some(1),
                changed_mem: None,
                fault: None,
            })
            .unwrap();
        trace
            .record(&Cycle {
                pc: 0,
                raw_inst: None,
                text: None,
                new_pc: 0,
                changed_reg: None,
                changed_mem: None,
                fault: Some(Fault::MemoryAccess { pc: 0, address: 0 }),
            })
            .unwrap();

        let text = String::from_utf8(trace.finish().unwrap()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "cycle,pc,word,instruction,new_pc,changed_reg,changed_mem,fault"
        );
        assert_eq!(
            lines[1],
            "1,0x00400000,0x2401000a,\"addiu\t$1, $0, 10\",0x00400004,1,,"
        );
        assert_eq!(
            lines[2],
            "2,0x00000000,,,0x00000000,,,\
             Memory Access Exception at 0x00000000: address 0x00000000"
        );
    }
}
