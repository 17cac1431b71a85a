mod board;
mod classify;
mod cli;
mod config;
mod extract;
mod fields;
mod geo;
mod itinerary;
mod model;
mod reckoning;
mod summary;
mod trips;
mod voyage;

use std::process;

use board::trello::TrelloGateway;
use config::Config;

fn main() {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let gateway = match TrelloGateway::new(&config) {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(&config, &gateway) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
