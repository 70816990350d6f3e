//! swimtally - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use swimtally::cli::{Cli, Commands, ConfigCommands};
use swimtally::Config;

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();

    // Bad config: log with defaults, the command reports the load error
    let log_level = Config::load()
        .map(|config| config.log.level)
        .unwrap_or_else(|_| Config::default().log.level);
    swimtally::logging::init(cli.verbose, &log_level);

    match cli.command {
        Commands::Parse {
            files,
            format,
            lines,
            pool,
            decimals,
            strict,
        } => {
            let overrides = commands::parse::Overrides {
                format,
                lines,
                pool,
                decimals,
            };
            let outcome = commands::parse::handle(&files, &overrides)?;
            if strict && outcome.unparsed_lines > 0 {
                eprintln!(
                    "{} unparsed line(s), failing because of --strict",
                    outcome.unparsed_lines
                );
                std::process::exit(2);
            }
            Ok(())
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Init { force } => commands::config::handle_init(force),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}
