// SPDX-License-Identifier: MIT
//! Running a session on the real terminal.
//!
//! [`TerminalSource`] reads keys through n-term's background stdin reader,
//! [`TerminalSink`] draws frames into an inline [`Screen`], and [`prompt`]
//! puts both together inside a raw-mode guard.

use std::collections::VecDeque;
use std::io::{self, Write};

use n_term::reader::KeyReader;
use n_term::screen::Screen;
use n_term::terminal::RawMode;
use tracing::{debug, warn};

use crate::answer::Answer;
use crate::config::PromptConfig;
use crate::error::PromptError;
use crate::event::GridEvent;
use crate::render::{Frame, Renderer, Theme};
use crate::session::{EventSource, RenderSink, Session};
use crate::validate::Validator;

// -- Source -----------------------------------------------------------------

/// Grid events decoded from keyboard input.
pub struct TerminalSource {
    keys: KeyReader,
    pending: VecDeque<GridEvent>,
}

impl TerminalSource {
    /// Start reading stdin on a background thread.
    #[must_use]
    pub fn spawn() -> Self {
        Self::new(KeyReader::spawn())
    }

    /// Decode events from an existing reader.
    #[must_use]
    pub const fn new(keys: KeyReader) -> Self {
        Self {
            keys,
            pending: VecDeque::new(),
        }
    }

    /// Stop the reader thread. Idempotent.
    pub fn stop(&mut self) {
        self.keys.stop();
    }
}

impl EventSource for TerminalSource {
    fn next_event(&mut self) -> io::Result<Option<GridEvent>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(Some(event));
            }
            let Some(raw) = self.keys.next_event() else {
                return Ok(None);
            };
            let events = GridEvent::from_terminal(&raw);
            if events.is_empty() {
                debug!(?raw, "ignored input");
            }
            self.pending.extend(events);
        }
    }
}

// -- Sink -------------------------------------------------------------------

/// Frames drawn as an inline block.
pub struct TerminalSink<W: Write> {
    screen: Screen<W>,
}

impl TerminalSink<io::Stderr> {
    /// Draw on stderr, so stdout carries nothing but the caller's output.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Screen::stderr())
    }
}

impl<W: Write> TerminalSink<W> {
    pub const fn new(screen: Screen<W>) -> Self {
        Self { screen }
    }

    pub const fn screen(&self) -> &Screen<W> {
        &self.screen
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn render(&mut self, frame: &Frame) -> io::Result<()> {
        self.screen.render(&frame.main, &frame.bottom)
    }

    fn finish(&mut self, frame: &Frame) -> io::Result<()> {
        self.screen.render(&frame.main, &frame.bottom)?;
        self.screen.done()
    }

    fn abort(&mut self) -> io::Result<()> {
        self.screen.done()
    }
}

// -- Entry point ------------------------------------------------------------

/// Ask one grid question and wait for the answer.
///
/// Stdin is put in raw mode for the duration and restored afterwards, on
/// every exit path. Events come from `source` and frames go to `sink`;
/// on a real terminal those are [`TerminalSource::spawn`] and
/// [`TerminalSink::stderr`].
///
/// # Errors
///
/// See [`Session::run`]; configuration errors are reported before the
/// terminal is touched.
pub fn prompt<V: Validator>(
    config: &PromptConfig,
    validator: V,
    theme: Theme,
    source: &mut impl EventSource,
    sink: &mut impl RenderSink,
) -> Result<Answer, PromptError> {
    let session = Session::new(config, validator)?.with_renderer(Renderer::new(theme));

    let mut raw = RawMode::new();
    raw.enter()?;
    let result = session.run(source, sink);
    settle(result, raw.leave())
}

/// The session's outcome wins over a failed terminal restore, which is
/// only logged. `RawMode` retries the restore when it is dropped.
fn settle(
    result: Result<Answer, PromptError>,
    restored: io::Result<()>,
) -> Result<Answer, PromptError> {
    if let Err(error) = restored {
        warn!(%error, "could not restore the terminal");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Label;
    use crate::validate::AcceptAll;
    use pretty_assertions::assert_eq;
    use std::sync::mpsc;

    fn source_from(bytes: &[u8]) -> TerminalSource {
        let (tx, rx) = mpsc::channel();
        tx.send(bytes.to_vec()).unwrap();
        drop(tx);
        TerminalSource::new(KeyReader::from_channel(rx))
    }

    fn drain(source: &mut TerminalSource) -> Vec<GridEvent> {
        std::iter::from_fn(|| source.next_event().unwrap()).collect()
    }

    #[test]
    fn keys_become_grid_events() {
        let mut source = source_from(b"\x1b[C7\x1b[Bx\x7f\x1b[A\x1b[D\r");
        assert_eq!(
            drain(&mut source),
            vec![
                GridEvent::MoveRight,
                GridEvent::Input('7'),
                GridEvent::MoveDown,
                GridEvent::Input('x'),
                GridEvent::Backspace,
                GridEvent::MoveUp,
                GridEvent::MoveLeft,
                GridEvent::Submit,
            ]
        );
    }

    #[test]
    fn unmapped_keys_are_skipped() {
        let mut source = source_from(b"\t\x1b[5~a");
        assert_eq!(drain(&mut source), vec![GridEvent::Input('a')]);
    }

    #[test]
    fn paste_expands_to_characters() {
        let mut source = source_from(b"\x1b[200~ab\x1b[201~");
        assert_eq!(
            drain(&mut source),
            vec![GridEvent::Input('a'), GridEvent::Input('b')]
        );
    }

    #[test]
    fn pasted_line_break_does_not_submit() {
        let mut source = source_from(b"\x1b[200~1\r2\x1b[201~");
        assert_eq!(
            drain(&mut source),
            vec![GridEvent::Input('1'), GridEvent::Input('2')]
        );
    }

    #[test]
    fn ctrl_c_interrupts() {
        let mut source = source_from(b"\x03");
        assert_eq!(drain(&mut source), vec![GridEvent::Interrupt]);
    }

    #[test]
    fn sink_draws_and_finishes_inline() {
        let mut sink = TerminalSink::new(Screen::new(Vec::new(), Some(80)));
        let frame = Frame {
            main: "q".into(),
            bottom: String::new(),
        };
        sink.render(&frame).unwrap();
        sink.finish(&frame).unwrap();
        let out = String::from_utf8(sink.screen().writer().clone()).unwrap();
        assert_eq!(out, "\x1b[?25lq\x1b[1G\x1b[Jq\n\x1b[?25h");
    }

    #[test]
    fn whole_prompt_over_bytes() {
        let config = PromptConfig::new(
            vec![Label::new("A"), Label::new("B")],
            vec![Label::new("X"), Label::new("Y")],
        );
        let mut source = source_from(b"\x1b[C7\r");
        let mut sink = TerminalSink::new(Screen::new(Vec::new(), Some(120)));

        let answer = prompt(&config, AcceptAll, Theme::plain(), &mut source, &mut sink).unwrap();
        assert_eq!(
            serde_json::to_string(&answer).unwrap(),
            r#"{"A_X":"","A_Y":"7","B_X":"","B_Y":""}"#
        );
    }

    fn one_cell_answer() -> Answer {
        let rows = crate::axis::Axis::from_names(crate::error::AxisKind::Rows, &["A"]).unwrap();
        let cols = crate::axis::Axis::from_names(crate::error::AxisKind::Columns, &["X"]).unwrap();
        Answer::collect(&rows, &cols, &crate::grid::ValueGrid::new(1, 1))
    }

    #[test]
    fn failed_restore_keeps_the_answer() {
        let broken = || Err(io::Error::other("tcsetattr"));
        assert_eq!(settle(Ok(one_cell_answer()), broken()).unwrap(), one_cell_answer());
        assert!(matches!(
            settle(Err(PromptError::Interrupted), broken()),
            Err(PromptError::Interrupted)
        ));
    }
}
