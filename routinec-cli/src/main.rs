use clap::Parser;
use routinec_cli::{Cli, init_logging};

fn main() -> miette::Result<()> {
    init_logging();
    Cli::parse().run()
}
