use clap::Parser;
use fanout_cli::Cli;

fn main() -> anyhow::Result<()> {
    Cli::parse().run()
}
