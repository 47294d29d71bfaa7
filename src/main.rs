use preyfield::{app, SimConfig};

/// Ticks to run when no count is given (one minute of simulated time).
const DEFAULT_TICKS: u64 = 3600;

fn main() {
    env_logger::init();
    log::info!("Preyfield starting up");

    if let Err(e) = run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

/// Usage: `preyfield [ticks] [seed]`
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let ticks = match args.next() {
        Some(arg) => arg.parse::<u64>()?,
        None => DEFAULT_TICKS,
    };
    let seed = args.next().map(|arg| arg.parse::<u64>()).transpose()?;

    let config = SimConfig {
        seed,
        ..SimConfig::default()
    };
    app::run(config, ticks)?;
    Ok(())
}
