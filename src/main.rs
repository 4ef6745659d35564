// SPDX-License-Identifier: MIT
//
// n-grid: fill in a rows × columns grid of text from the terminal.
//
// This is the binary that wires the crates together:
//
//   n-term  → raw mode, key parsing, inline redraw, box tables
//   n-table → grid controller, rendering, session loop
//
// One run asks one question. Each keypress flows through:
//
//   stdin → parser → GridEvent → controller → renderer → screen
//
// The prompt is drawn on stderr. When the user submits, the answer is
// printed to stdout as a flat JSON object keyed "<row>_<column>", so the
// tool composes with shell pipelines:
//
//   $ n-grid --rows mon,tue --columns am,pm --required | jq .mon_am
//
// Exit status: 0 with an answer, 1 on error, 130 when interrupted.

mod cli;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use n_table::backend::{self, TerminalSink, TerminalSource};
use n_table::session::{EventSource, RenderSink};
use n_table::{Answer, PromptError};
use serde_json::{Map, Value};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

const EXIT_INTERRUPTED: i32 = 130;

fn main() {
    let cli = Cli::parse();

    let log_guard = match cli.log_file.as_deref().map(init_logging).transpose() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("n-grid: {e:#}");
            process::exit(1);
        }
    };

    let code = match run(&cli) {
        Ok(()) => 0,
        Err(e) if is_interrupt(&e) => EXIT_INTERRUPTED,
        Err(e) => {
            eprintln!("n-grid: {e:#}");
            1
        }
    };

    // process::exit skips destructors; flush the log writer first.
    drop(log_guard);
    process::exit(code);
}

fn run(cli: &Cli) -> Result<()> {
    let mut source = TerminalSource::spawn();
    let result = ask(
        cli,
        &mut source,
        &mut TerminalSink::stderr(),
        &mut io::stdout().lock(),
    );
    source.stop();
    result
}

/// One question from `source`, drawn on `sink`, with the JSON answer
/// written to `out`.
fn ask(
    cli: &Cli,
    source: &mut impl EventSource,
    sink: &mut impl RenderSink,
    out: &mut impl Write,
) -> Result<()> {
    let config = cli.prompt_config()?;
    let validator = cli.validator()?;
    info!(
        rows = config.rows.len(),
        columns = config.columns.len(),
        checks = validator.len(),
        "asking"
    );

    let answer = backend::prompt(&config, validator, cli.theme(), source, sink)?;
    writeln!(out, "{}", output(&config.name, &answer)?).context("writing the answer")?;
    out.flush().context("writing the answer")
}

fn is_interrupt(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<PromptError>(),
        Some(PromptError::Interrupted)
    )
}

/// The answer as pretty JSON, wrapped as `{name: answer}` when named.
fn output(name: &str, answer: &Answer) -> Result<String> {
    let json = if name.is_empty() {
        serde_json::to_string_pretty(answer)
    } else {
        let mut wrapped = Map::new();
        wrapped.insert(name.to_owned(), serde_json::to_value(answer)?);
        serde_json::to_string_pretty(&Value::Object(wrapped))
    };
    json.context("encoding the answer")
}

// ─── Logging ────────────────────────────────────────────────────────────────

/// Send `tracing` output to `path`. The terminal belongs to the prompt, so
/// nothing is ever logged there.
///
/// Filter with `RUST_LOG`; everything at debug and above by default.
fn init_logging(path: &Path) -> Result<WorkerGuard> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let file = path
        .file_name()
        .with_context(|| format!("log file {} has no file name", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(filter),
        )
        .try_init()
        .context("installing the log subscriber")?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use n_table::axis::Axis;
    use n_table::error::AxisKind;
    use n_table::grid::{Cursor, ValueGrid};
    use n_term::reader::KeyReader;
    use n_term::screen::Screen;
    use pretty_assertions::assert_eq;
    use std::sync::mpsc;

    fn answer() -> Answer {
        let rows = Axis::from_names(AxisKind::Rows, &["A", "B"]).unwrap();
        let cols = Axis::from_names(AxisKind::Columns, &["X", "Y"]).unwrap();
        let mut grid = ValueGrid::new(2, 2);
        grid.push(Cursor::new(0, 1), '7');
        Answer::collect(&rows, &cols, &grid)
    }

    #[test]
    fn unnamed_output_is_the_flat_map() {
        let json = output("", &answer()).unwrap();
        assert_eq!(
            json,
            "{\n  \"A_X\": \"\",\n  \"A_Y\": \"7\",\n  \"B_X\": \"\",\n  \"B_Y\": \"\"\n}"
        );
    }

    #[test]
    fn named_output_is_wrapped() {
        let value: Value = serde_json::from_str(&output("grid", &answer()).unwrap()).unwrap();
        assert_eq!(value["grid"]["A_Y"], "7");
        assert_eq!(value["grid"]["B_X"], "");
    }

    #[test]
    fn interrupt_is_recognised_through_anyhow() {
        assert!(is_interrupt(&PromptError::Interrupted.into()));
        assert!(!is_interrupt(&anyhow::anyhow!("other")));
    }

    #[test]
    fn stdout_carries_only_the_json_answer() {
        let cli = Cli::try_parse_from([
            "n-grid", "--rows", "A,B", "--columns", "X,Y", "--no-color",
        ])
        .unwrap();
        let (tx, rx) = mpsc::channel();
        tx.send(b"\x1b[C7\r".to_vec()).unwrap();
        drop(tx);
        let mut source = TerminalSource::new(KeyReader::from_channel(rx));
        let mut sink = TerminalSink::new(Screen::new(Vec::new(), Some(120)));
        let mut stdout = Vec::new();

        ask(&cli, &mut source, &mut sink, &mut stdout).unwrap();

        let stdout = String::from_utf8(stdout).unwrap();
        assert!(!stdout.contains('\x1b'), "escape codes on stdout: {stdout:?}");
        let value: Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"A_X": "", "A_Y": "7", "B_X": "", "B_Y": ""})
        );
        let drawn = String::from_utf8_lossy(sink.screen().writer());
        assert!(drawn.contains("(Press"), "prompt not drawn: {drawn:?}");
    }
}
