// SPDX-License-Identifier: MIT
//
// Command-line arguments and what they turn into: a prompt configuration,
// a validator and a theme.
//
// A `--config` file supplies the whole question as JSON,
//
//   {"message": "Hours", "rows": [{"name": "mon"}, "tue"],
//    "columns": ["am", "pm"], "pageSize": 5}
//
// and any flag given on the command line overrides the matching field.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use n_table::{AllOf, CellPattern, Label, PromptConfig, Required, Theme};
use regex::Regex;

/// Fill in a grid of text on the terminal and print it as JSON.
#[derive(Parser, Debug)]
#[command(name = "n-grid", version, about)]
pub struct Cli {
    /// Read the question from a JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Row labels, comma separated
    #[arg(long, value_delimiter = ',', value_name = "LABELS")]
    pub rows: Vec<String>,

    /// Column labels, comma separated
    #[arg(long, value_delimiter = ',', value_name = "LABELS")]
    pub columns: Vec<String>,

    /// Rows visible at once
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Question shown above the table
    #[arg(short, long)]
    pub message: Option<String>,

    /// Print the answer as {NAME: answer}
    #[arg(long)]
    pub name: Option<String>,

    /// Refuse to submit while any cell is empty
    #[arg(long)]
    pub required: bool,

    /// Refuse to submit while a filled cell does not match REGEX
    #[arg(long, value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Disable colors (also honored: NO_COLOR)
    #[arg(long)]
    pub no_color: bool,

    /// Write debug logs to FILE (filter with RUST_LOG)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The question to ask: the config file, if any, with flags on top.
    pub fn prompt_config(&self) -> Result<PromptConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => PromptConfig::new(Vec::new(), Vec::new()),
        };

        if !self.rows.is_empty() {
            config.rows = self.rows.iter().map(Label::new).collect();
        }
        if !self.columns.is_empty() {
            config.columns = self.columns.iter().map(Label::new).collect();
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(message) = &self.message {
            config.message.clone_from(message);
        }
        if let Some(name) = &self.name {
            config.name.clone_from(name);
        }
        Ok(config)
    }

    /// Submit-time checks requested on the command line.
    pub fn validator(&self) -> Result<AllOf> {
        let mut all = AllOf::new();
        if self.required {
            all = all.with(Required);
        }
        if let Some(pattern) = &self.pattern {
            let regex = Regex::new(pattern).with_context(|| format!("bad --pattern {pattern:?}"))?;
            all = all.with(CellPattern::new(regex));
        }
        Ok(all)
    }

    pub fn theme(&self) -> Theme {
        if self.no_color {
            Theme::plain()
        } else {
            Theme::for_terminal()
        }
    }
}
