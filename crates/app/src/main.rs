//! Catalogue command line front end.

use std::process;

use clap::Parser;

use crate::cli::Cli;

mod cli;
mod config;
mod logging;
mod output;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = cli.run().await {
        #[expect(
            clippy::print_stderr,
            reason = "command failures are reported to the terminal"
        )]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}
