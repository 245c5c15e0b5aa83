pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "freshet")]
#[command(about = "A terminal feed reader", long_about = None)]
pub struct Cli {
    /// Path to an alternate config file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive reader (the default)
    Tui,
    /// Print the current entries and exit
    List,
    /// Fetch all feeds once and print per-feed counts
    Update,
}
