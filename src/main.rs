//! CLI entry point for tile grid extraction and grid queries

use clap::Parser;
use tilegrid::io::cli::{Cli, init_logging};

fn main() -> tilegrid::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    cli.execute()
}
