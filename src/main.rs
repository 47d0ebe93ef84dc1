use clap::Parser;

use anyhow::Result;

use structconv::cli::{self, CliArgs};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let code = cli::run(&args)?;
    std::process::exit(code);
}
