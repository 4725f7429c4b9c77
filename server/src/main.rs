use std::path::PathBuf;

use clap::Parser;
use ripple_shared::constants::{CONFIG_READ_ERROR, DEFAULT_CONFIG_PATH};
use ripple_shared::{load_water_config, save_water_config};

mod init;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[arg(short, long, default_value_t = 8, help = "Number of bodies dropped at start")]
    bodies: usize,

    #[arg(short, long, default_value_t = 10.0, help = "Simulated seconds before exiting")]
    duration: f32,

    #[arg(short, long, help = "Seed for body placement, random when omitted")]
    seed: Option<u64>,

    #[arg(long, help = "Write the effective config back to --config and exit")]
    write_config: bool,
}

fn main() {
    let args = Args::parse();

    if !args.duration.is_finite() || args.duration <= 0.0 {
        eprintln!("Error: duration must be a positive number of seconds.");
        eprintln!("Got: {}", args.duration);
        std::process::exit(1);
    }

    let config = match load_water_config(&args.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {}: {err}", CONFIG_READ_ERROR, args.config.display());
            std::process::exit(1);
        }
    };

    if args.write_config {
        if let Err(err) = save_water_config(&config, &args.config) {
            eprintln!("Failed to write {}: {err}", args.config.display());
            std::process::exit(1);
        }
        return;
    }

    init::init(
        config,
        init::SimulationRun {
            bodies: args.bodies,
            duration: args.duration,
            seed: args.seed.unwrap_or_else(rand::random),
        },
    );
}
