mod app;
mod audio;
mod config;
mod filter;
mod ingest;
mod library;
mod logging;
mod mpris;
mod player;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
