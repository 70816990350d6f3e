//! Parse command handler

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::info;

use swimtally::config::MAX_DECIMALS;
use swimtally::report::{render_json, render_json_batch, render_text};
use swimtally::{parse_bytes, Config, OutputFormat, ParseResult, ReportOptions};

use super::{read_inputs, Input};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub format: Option<OutputFormat>,
    pub lines: bool,
    pub pool: Option<u32>,
    pub decimals: Option<usize>,
}

/// What the caller needs after the report has been printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub unparsed_lines: usize,
}

/// Handle the parse command.
#[cfg(not(tarpaulin_include))]
pub fn handle(files: &[PathBuf], overrides: &Overrides) -> Result<Outcome> {
    let config = Config::load()?;
    let (format, options) = resolve_options(&config, overrides)?;

    let inputs = read_inputs(files)?;
    let sessions = parse_inputs(inputs)?;

    let output = render(&sessions, format, &options)?;
    print!("{}", output);

    Ok(Outcome {
        unparsed_lines: sessions.iter().map(|(_, r)| r.unparsed_count).sum(),
    })
}

/// Merge config and command-line values into report settings.
pub fn resolve_options(
    config: &Config,
    overrides: &Overrides,
) -> Result<(OutputFormat, ReportOptions)> {
    let mut options = ReportOptions::from(&config.report);
    if let Some(pool) = overrides.pool {
        if pool == 0 {
            bail!("--pool must be greater than 0");
        }
        options.pool_length = pool;
    }
    if let Some(decimals) = overrides.decimals {
        if decimals > MAX_DECIMALS {
            bail!("--decimals must be at most {}, got {}", MAX_DECIMALS, decimals);
        }
        options.decimals = decimals;
    }
    options.show_lines |= overrides.lines;

    let format = overrides.format.unwrap_or(config.report.format);
    Ok((format, options))
}

/// Parse every input, in parallel, keeping the input order.
pub fn parse_inputs(inputs: Vec<Input>) -> Result<Vec<(String, ParseResult)>> {
    inputs
        .into_par_iter()
        .map(|input| {
            let result = parse_bytes(&input.bytes)
                .with_context(|| format!("Cannot parse {}", input.label))?;
            info!(
                source = %input.label,
                total = result.total_distance(),
                unparsed = result.unparsed_count,
                "parsed session"
            );
            Ok::<_, anyhow::Error>((input.label, result))
        })
        .collect()
}

/// Render all sessions in one output string.
pub fn render(
    sessions: &[(String, ParseResult)],
    format: OutputFormat,
    options: &ReportOptions,
) -> Result<String> {
    match (format, sessions) {
        (OutputFormat::Json, [(label, result)]) => {
            Ok(format!("{}\n", render_json(result, options, Some(label.as_str()))?))
        }
        (OutputFormat::Json, _) => Ok(format!("{}\n", render_json_batch(sessions, options)?)),
        (OutputFormat::Text, [(_, result)]) => Ok(render_text(result, options)),
        (OutputFormat::Text, _) => Ok(sessions
            .iter()
            .map(|(label, result)| format!("== {} ==\n{}", label, render_text(result, options)))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
