pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use baler_core::error::Result;
use clap::Parser;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Compress {
            source,
            dest,
            max_size,
            format,
        } => handlers::handle_compress(source, dest, max_size, format),
        Commands::Decompress {
            source,
            dest,
            format,
        } => handlers::handle_decompress(source, dest, format),
    }
}
