//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use cargoroute_cli::CliError;
use env_logger::{Builder, Env, Target};

fn main() {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .init();

    match cargoroute_cli::run() {
        Ok(()) => {}
        // Help and version requests exit through clap with status 0.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("cargoroute: {err}");
            std::process::exit(1);
        }
    }
}
