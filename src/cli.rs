//! CLI definitions for swimtally
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be accessed by xtask for documentation generation (man pages, markdown).

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use std::path::PathBuf;

use crate::report::OutputFormat;

/// Build clap styles.
///
/// - Green: headers, usage, command names
/// - White: descriptions, placeholders
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "swimtally")]
#[command(about = "Tally swim session text into distance per stroke and activity")]
#[command(
    long_about = "swimtally - turn a coach's freehand swim session into distance totals.

Each line of the session is read on its own (\"4 x 100m FC Swim\",
\"4 x 100m FC as 25m Kick / 25m Drill / 25m Pull / 25m Swim\") and the
distances are added up per stroke (Front Crawl, Backstroke, Breaststroke,
Butterfly, IM, No.1) and per activity (Swim, Drill, Kick, Pull).

Lines that cannot be read are reported, never guessed.

QUICK START:
    swimtally parse monday.txt            Totals for one session
    swimtally parse --lines monday.txt    Totals plus a line-by-line audit
    cat monday.txt | swimtally parse      Read the session from stdin
    swimtally parse --format json *.txt   Several sessions as JSON"
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse session text and print distance totals
    #[command(long_about = "Parse one or more session files and print distance totals.

With no FILES, or with '-', the session is read from stdin. Several files
are parsed in parallel and reported one after another.

Totals are checked against the pool length: a total that is not a whole
number of lengths usually means a line was misread. The check is
informative only.

EXAMPLES:
    swimtally parse monday.txt
    swimtally parse --lines --pool 50 monday.txt
    swimtally parse --format json monday.txt tuesday.txt
    swimtally parse --strict monday.txt     Exit with code 2 if any line is unparsed")]
    Parse {
        /// Session files ('-' for stdin)
        #[arg(help = "Session text files ('-' or none reads stdin)")]
        files: Vec<PathBuf>,
        /// Output format
        #[arg(long, short, value_enum, help = "Output format [default: from config, else text]")]
        format: Option<OutputFormat>,
        /// Show the per-line audit
        #[arg(long, short, help = "Include a line-by-line audit")]
        lines: bool,
        /// Pool length in metres
        #[arg(long, help = "Pool length in metres for the total check")]
        pool: Option<u32>,
        /// Decimal places for distances
        #[arg(long, help = "Decimal places shown for distances")]
        decimals: Option<usize>,
        /// Fail when any line is unparsed
        #[arg(long, help = "Exit with code 2 if any content line is unparsed")]
        strict: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(long_about = "Generate shell completion scripts.

EXAMPLES:
    swimtally completions bash > ~/.local/share/bash-completion/completions/swimtally
    swimtally completions zsh > ~/.zfunc/_swimtally")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
