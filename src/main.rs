mod app;
mod cli;
mod config;
mod form;
mod geolocation;
mod logging;
mod map;
mod model;
mod session;
mod storage;
#[cfg(test)]
mod testing;
mod view;

use std::process;

use clap::Parser;

use cli::Cli;
use config::Config;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(cli, &config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
