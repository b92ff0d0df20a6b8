//! Gridsketch CLI - draw box-and-line diagrams in the terminal

mod cli;
mod tui;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    let mut app = cli::GridsketchApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
