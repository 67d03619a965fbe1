mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::Cli;

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    commands::new::run(cli)
}
