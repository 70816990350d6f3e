//! Command handlers for the swimtally CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod completions;
pub mod config;
pub mod parse;

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Label used for sessions read from stdin.
pub const STDIN_LABEL: &str = "<stdin>";

/// One session's raw bytes and the name it is reported under.
#[derive(Debug)]
pub struct Input {
    pub label: String,
    pub bytes: Vec<u8>,
}

/// Whether a path argument means stdin.
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read every input up front. No files means stdin.
pub fn read_inputs(files: &[PathBuf]) -> Result<Vec<Input>> {
    if files.is_empty() {
        return Ok(vec![read_stdin()?]);
    }
    if files.iter().filter(|f| is_stdin(f)).count() > 1 {
        anyhow::bail!("stdin ('-') can only be given once");
    }
    files
        .iter()
        .map(|file| {
            if is_stdin(file) {
                read_stdin()
            } else {
                read_file(file)
            }
        })
        .collect()
}

fn read_file(path: &Path) -> Result<Input> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read session file: {:?}", path))?;
    Ok(Input {
        label: path.display().to_string(),
        bytes,
    })
}

#[cfg(not(tarpaulin_include))]
fn read_stdin() -> Result<Input> {
    let mut bytes = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut bytes)
        .context("Failed to read session from stdin")?;
    Ok(Input {
        label: STDIN_LABEL.to_string(),
        bytes,
    })
}
