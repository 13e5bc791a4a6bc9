use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "baler CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compress a source directory into size-capped archives
    Compress {
        /// Directory whose contents get archived
        source: PathBuf,
        /// Directory receiving the archive artifacts
        dest: PathBuf,
        /// Maximum size per artifact, in MiB (0 = one unbounded archive)
        max_size: u64,

        /// Archive format
        #[arg(long, default_value = "zip")]
        format: String,
    },

    /// Reconstruct a directory tree from archives
    Decompress {
        /// Directory holding the archive artifacts
        source: PathBuf,
        /// Directory receiving the reconstructed tree
        dest: PathBuf,

        /// Archive format
        #[arg(long, default_value = "zip")]
        format: String,
    },
}
