// CLI-specific types and structures
// This module contains the command-line interface definitions

use crate::config::{ColorMode, DEFAULT_BUFFER_SIZE};
use clap::Parser;

pub const ABOUT: &str = "Filebeat registry log analyser.\nThe tool will scan the Filebeat registry logs and report suspicious facts. You can specify multiple registry log files and the tool will concatenate them.";

pub const USAGE_EXAMPLE: &str = "Usage:\t\tregan [file ...]\nExample:\tregan log1.json log2.json log3.json";

// CLI structure - contains all command-line arguments and options
#[derive(Parser, Debug)]
#[command(name = "regan")]
#[command(about = "Filebeat registry log analyser")]
#[command(long_about = ABOUT)]
#[command(after_help = USAGE_EXAMPLE)]
#[command(version)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Registry log files to analyse (gzip and zstd files are decompressed)
    pub files: Vec<String>,

    /// Maximum number of reader threads (0 = one per CPU)
    #[arg(
        short = 'j',
        long = "threads",
        default_value_t = 0,
        help_heading = "Performance Options"
    )]
    pub threads: usize,

    /// Capacity of the queue between file readers and the aggregator
    #[arg(
        long = "buffer-size",
        default_value_t = DEFAULT_BUFFER_SIZE,
        help_heading = "Performance Options"
    )]
    pub buffer_size: usize,

    /// Abort the whole run on the first unreadable or malformed file
    #[arg(long = "fail-fast", help_heading = "Processing Options")]
    pub fail_fast: bool,

    /// Print processing statistics after the report
    #[arg(short = 's', long = "stats", help_heading = "Display Options")]
    pub stats: bool,

    /// Reduce output: -q hides progress, -qq also hides record warnings
    #[arg(short = 'q', long = "quiet", action = clap::ArgAction::Count, help_heading = "Display Options")]
    pub quiet: u8,

    /// When to colorize the report
    #[arg(
        long = "color",
        value_enum,
        default_value = "auto",
        help_heading = "Display Options"
    )]
    pub color: ColorMode,

    /// Disable colors (same as --color never)
    #[arg(long = "no-color", help_heading = "Display Options")]
    pub no_color: bool,

    /// Use plain `regan:` prefixes instead of emoji
    #[arg(long = "no-emoji", help_heading = "Display Options")]
    pub no_emoji: bool,

    /// Use alias from configuration file
    #[arg(short = 'a', long = "alias", help_heading = "Configuration Options")]
    pub alias: Vec<String>,

    /// Use a specific configuration file
    #[arg(long = "config-file", help_heading = "Configuration Options")]
    pub config_file: Option<String>,

    /// Show configuration file locations and active defaults
    #[arg(long = "show-config", help_heading = "Configuration Options")]
    pub show_config: bool,

    /// Ignore configuration files
    #[arg(long = "ignore-config", help_heading = "Configuration Options")]
    pub ignore_config: bool,
}
