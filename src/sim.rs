use env_logger::Env;
use log::info;
use sim_lib::cpu::CPUPolicy;
use sim_lib::flags::SimArgs;
use sim_lib::run_wrapper;
use sim_lib::single_cycle::Halt;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let args = SimArgs::from_env_or_exit();
    args.validate()?;
    let policy = CPUPolicy::from(&args);

    let default_filter = if policy.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .init();

    let halt = run_wrapper::run(&args.image, policy, args.trace.as_deref())?;
    match halt {
        Halt::Fault(fault) => info!("Halted by a fault at {:#010x}", fault.pc()),
        other => info!("Stopped: {:?}", other),
    }

    Ok(())
}
