//! xtask - Build tasks for swimtally
//!
//! Run with: cargo xtask <command>
//!
//! Commands:
//! - gen-docs: Generate documentation (man pages, COMMANDS.md)

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, Command, CommandFactory, Parser, Subcommand};

use swimtally::cli::Cli;

const BIN: &str = "swimtally";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build tasks for swimtally")]
struct Xtask {
    #[command(subcommand)]
    command: XtaskCommand,
}

#[derive(Subcommand)]
enum XtaskCommand {
    /// Generate documentation from CLI definitions
    #[command(name = "gen-docs")]
    GenDocs {
        /// Output directory (default: docs/)
        #[arg(long, short, default_value = "docs")]
        output: PathBuf,

        /// Generate man pages
        #[arg(long)]
        man: bool,

        /// Generate COMMANDS.md
        #[arg(long)]
        markdown: bool,
    },
}

fn main() -> Result<()> {
    let args = Xtask::parse();

    match args.command {
        XtaskCommand::GenDocs {
            output,
            man,
            markdown,
        } => {
            // Neither flag means both
            let both = !man && !markdown;
            if both || man {
                generate_man_pages(&output)?;
            }
            if both || markdown {
                generate_markdown(&output)?;
            }
        }
    }

    Ok(())
}

fn visible_subcommands(cmd: &Command) -> impl Iterator<Item = &Command> {
    cmd.get_subcommands().filter(|c| !c.is_hide_set())
}

fn render_man(cmd: &Command, path: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;
    fs::write(path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Generated: {}", path.display());
    Ok(())
}

/// Generate man pages using clap_mangen, one per (sub)command
fn generate_man_pages(output: &Path) -> Result<()> {
    let man_dir = output.join("man");
    fs::create_dir_all(&man_dir).context("Failed to create man directory")?;

    let cmd = Cli::command();
    render_man(&cmd, &man_dir.join(format!("{BIN}.1")))?;

    for sub in visible_subcommands(&cmd) {
        let name = sub.get_name();
        render_man(sub, &man_dir.join(format!("{BIN}-{name}.1")))?;
        for nested in visible_subcommands(sub) {
            let nested_name = nested.get_name();
            render_man(nested, &man_dir.join(format!("{BIN}-{name}-{nested_name}.1")))?;
        }
    }

    Ok(())
}

fn is_builtin(arg: &Arg) -> bool {
    matches!(arg.get_id().as_str(), "help" | "version")
}

fn flag_label(arg: &Arg) -> Option<String> {
    match (arg.get_short(), arg.get_long()) {
        (Some(s), Some(l)) => Some(format!("-{s}, --{l}")),
        (None, Some(l)) => Some(format!("--{l}")),
        (Some(s), None) => Some(format!("-{s}")),
        (None, None) => None,
    }
}

fn write_arguments(md: &mut String, cmd: &Command, heading: &str) {
    let args: Vec<&Arg> = cmd.get_arguments().filter(|a| !is_builtin(a)).collect();
    if args.is_empty() {
        return;
    }
    let _ = writeln!(md, "{heading}\n");
    for arg in args {
        let label = if arg.is_positional() {
            format!("<{}>", arg.get_id().as_str().to_uppercase())
        } else {
            match flag_label(arg) {
                Some(label) => label,
                None => continue,
            }
        };
        let help = arg.get_help().map(|h| h.to_string()).unwrap_or_default();
        let _ = writeln!(md, "- `{label}`: {help}");
    }
    md.push('\n');
}

fn write_long_about(md: &mut String, cmd: &Command) {
    if let Some(long_about) = cmd.get_long_about() {
        let _ = writeln!(md, "```\n{long_about}\n```\n");
    }
}

/// Generate COMMANDS.md markdown documentation
fn generate_markdown(output: &Path) -> Result<()> {
    fs::create_dir_all(output).context("Failed to create output directory")?;

    let cmd = Cli::command();
    let mut md = String::new();

    md.push_str("# swimtally Command Reference\n\n");
    md.push_str("This document is auto-generated from the CLI definitions.\n\n");
    md.push_str("## Table of Contents\n\n");
    for sub in visible_subcommands(&cmd) {
        let name = sub.get_name();
        let _ = writeln!(md, "- [{name}](#{BIN}-{name})");
    }
    md.push_str("\n---\n\n");

    let _ = writeln!(md, "## {BIN}\n");
    if let Some(about) = cmd.get_about() {
        let _ = writeln!(md, "{about}\n");
    }
    write_long_about(&mut md, &cmd);
    write_arguments(&mut md, &cmd, "### Global options");

    for sub in visible_subcommands(&cmd) {
        let name = sub.get_name();
        let _ = writeln!(md, "## {BIN} {name}\n");
        if let Some(about) = sub.get_about() {
            let _ = writeln!(md, "{about}\n");
        }
        write_arguments(&mut md, sub, "### Arguments");
        write_long_about(&mut md, sub);

        for nested in visible_subcommands(sub) {
            let _ = writeln!(md, "#### {BIN} {name} {}\n", nested.get_name());
            if let Some(about) = nested.get_about() {
                let _ = writeln!(md, "{about}\n");
            }
            write_arguments(&mut md, nested, "Arguments:");
        }

        md.push_str("---\n\n");
    }

    md.push_str("\n*Generated by `cargo xtask gen-docs`*\n");

    let output_path = output.join("COMMANDS.md");
    fs::write(&output_path, md)?;
    println!("Generated: {}", output_path.display());

    Ok(())
}
