//! Root CLI structure for rigging-rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rigging-rs")]
#[command(about = "Command-line tools for skeletal bone attachment mappings", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Mapping file to operate on
    #[arg(
        short,
        long,
        global = true,
        env = "RIG_MAPPINGS",
        default_value = "bone_attachments.bin"
    )]
    pub mappings: PathBuf,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bone attachment mapping operations
    Mappings {
        #[command(subcommand)]
        command: crate::commands::mappings::MappingCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
