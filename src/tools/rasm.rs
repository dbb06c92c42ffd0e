use std::error::Error;
use std::io::{self, Write};

use sim_lib::assembler::assemble_r;
use text_io::try_read;

/// Reads one R-format instruction (from the arguments, or stdin when there
/// are none) and prints its 32-bit encoding in binary.
fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let line: String = if args.is_empty() {
        print!("Enter an R-Format instruction: ");
        io::stdout().flush()?;
        try_read!("{}\n")?
    } else {
        args.join(" ")
    };

    let word = assemble_r(&line)?;
    println!("{:032b}", word);
    Ok(())
}
