//! cgw-scraper - build an Anki deck from Chinese Grammar Wiki examples.

use cgw_scraper::Cli;
use clap::Parser;

#[tokio::main]
async fn main() {
    cgw_scraper::init_tracing();

    match cgw_scraper::run(Cli::parse()).await {
        Ok(outcome) => println!("{}", outcome),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
