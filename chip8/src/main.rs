use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::error;

mod run;

/// Runs a Chip-8 program
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Path to the program binary
    rom: PathBuf,
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            println!("{}", e.render());
            process::exit(e.exit_code());
        }
    };

    if let Err(e) = run::run(cli.rom) {
        error!("{}", e);
        process::exit(1);
    }
}
