use amaze_term::Cli;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    amaze_term::run(&cli)
}
