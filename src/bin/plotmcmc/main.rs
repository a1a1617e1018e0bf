//! Generates an R script that runs `mcmcsummary` over a set of MCMC chains,
//! writes it to `<output-path>/<identity>.R` and runs R on it.

mod dispatch;
mod options;
mod script;

use std::process::ExitCode;

use clap::Parser;

use dispatch::run_r_script;
use options::{Cli, McmcOptions};
use script::write_script;

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    if cli.version {
        println!("{} {}", env!("CARGO_BIN_NAME"), env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let opts = match McmcOptions::try_from(cli) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let script = match write_script(&opts) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    match run_r_script(&opts.executable, &script) {
        Ok(output) => {
            if !output.is_empty() {
                log::info!("R output:\n{output}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("mcmcsummary run failed for {}", opts.identity);
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
