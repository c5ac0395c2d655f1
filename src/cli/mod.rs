use clap::Parser;
use std::path::PathBuf;

/// Create a timestamped SQL dump of the configured database and notify
/// listeners once it is on disk.
#[derive(Debug, Parser)]
#[command(name = "dump-database", version)]
pub struct Args {
    /// Directory for the dump, relative to the storage root [default: dumps]
    #[arg(long, value_name = "DIR")]
    pub path: Option<String>,

    /// Config file to read instead of the per-user default
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Overrides the configured dump program
    #[arg(long, value_name = "PROGRAM")]
    pub dump_program: Option<String>,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    pub init_config: bool,
}
