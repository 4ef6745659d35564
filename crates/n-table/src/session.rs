// SPDX-License-Identifier: MIT
//! The receive loop.
//!
//! A [`Session`] wires the controller to its two collaborators: an
//! [`EventSource`] it pulls events from and a [`RenderSink`] it pushes
//! frames to. Events are handled strictly one at a time: transition, then
//! render, then the next event.

use std::io;

use n_term::table::{BoxTable, TableFormatter};
use tracing::info;

use crate::answer::Answer;
use crate::config::PromptConfig;
use crate::controller::{GridController, Step};
use crate::error::{ConfigError, PromptError};
use crate::event::GridEvent;
use crate::render::{Frame, Renderer};
use crate::validate::Validator;

/// Where events come from.
pub trait EventSource {
    /// Block until the next event. `Ok(None)` means input has ended.
    ///
    /// # Errors
    ///
    /// Any I/O error from the underlying input.
    fn next_event(&mut self) -> io::Result<Option<GridEvent>>;
}

/// Where frames go.
pub trait RenderSink {
    /// Replace whatever is on screen with `frame`.
    ///
    /// # Errors
    ///
    /// Any I/O error from the output.
    fn render(&mut self, frame: &Frame) -> io::Result<()>;

    /// Draw the final frame and hand the terminal back.
    ///
    /// # Errors
    ///
    /// Any I/O error from the output.
    fn finish(&mut self, frame: &Frame) -> io::Result<()>;

    /// Hand the terminal back without a final frame.
    ///
    /// # Errors
    ///
    /// Any I/O error from the output.
    fn abort(&mut self) -> io::Result<()>;
}

/// One prompt, from first frame to answer.
pub struct Session<V, T: TableFormatter = BoxTable> {
    controller: GridController,
    renderer: Renderer<T>,
    validator: V,
}

impl<V: Validator> Session<V> {
    /// A session with the default renderer.
    ///
    /// # Errors
    ///
    /// The configuration is rejected before anything is drawn.
    pub fn new(config: &PromptConfig, validator: V) -> Result<Self, ConfigError> {
        Ok(Self {
            controller: GridController::new(config)?,
            renderer: Renderer::default(),
            validator,
        })
    }
}

impl<V: Validator, T: TableFormatter> Session<V, T> {
    /// Swap the renderer.
    #[must_use]
    pub fn with_renderer<U: TableFormatter>(self, renderer: Renderer<U>) -> Session<V, U> {
        Session {
            controller: self.controller,
            renderer,
            validator: self.validator,
        }
    }

    #[must_use]
    pub const fn controller(&self) -> &GridController {
        &self.controller
    }

    /// Run until the user submits an accepted answer or gives up.
    ///
    /// # Errors
    ///
    /// [`PromptError::Interrupted`] on interrupt or end of input, and
    /// [`PromptError::Io`] if either collaborator fails.
    pub fn run(
        mut self,
        source: &mut impl EventSource,
        sink: &mut impl RenderSink,
    ) -> Result<Answer, PromptError> {
        info!(
            rows = self.controller.rows().len(),
            columns = self.controller.columns().len(),
            page_size = self.controller.page_size(),
            "prompt started"
        );
        sink.render(&self.renderer.render(&self.controller))?;

        loop {
            let Some(event) = source.next_event()? else {
                info!("input closed before submit");
                sink.abort()?;
                return Err(PromptError::Interrupted);
            };

            match self.controller.apply(event, &self.validator) {
                Step::Continue => sink.render(&self.renderer.render(&self.controller))?,
                Step::Submitted(answer) => {
                    sink.finish(&self.renderer.render(&self.controller))?;
                    info!(cells = answer.records().len(), "prompt answered");
                    return Ok(answer);
                }
                Step::Interrupted => {
                    info!("prompt interrupted");
                    sink.abort()?;
                    return Err(PromptError::Interrupted);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Label;
    use crate::render::Theme;
    use crate::validate::{AcceptAll, Required};
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;

    struct Script(VecDeque<GridEvent>);

    impl Script {
        fn new(events: &[GridEvent]) -> Self {
            Self(events.iter().copied().collect())
        }
    }

    impl EventSource for Script {
        fn next_event(&mut self) -> io::Result<Option<GridEvent>> {
            Ok(self.0.pop_front())
        }
    }

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Frame>,
        finished: Option<Frame>,
        aborted: bool,
    }

    impl RenderSink for Recorder {
        fn render(&mut self, frame: &Frame) -> io::Result<()> {
            self.frames.push(frame.clone());
            Ok(())
        }

        fn finish(&mut self, frame: &Frame) -> io::Result<()> {
            self.finished = Some(frame.clone());
            Ok(())
        }

        fn abort(&mut self) -> io::Result<()> {
            self.aborted = true;
            Ok(())
        }
    }

    struct Broken;

    impl RenderSink for Broken {
        fn render(&mut self, _: &Frame) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }

        fn finish(&mut self, _: &Frame) -> io::Result<()> {
            Ok(())
        }

        fn abort(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn config() -> PromptConfig {
        PromptConfig::new(
            vec![Label::new("R1"), Label::new("R2"), Label::new("R3")],
            vec![Label::new("C1"), Label::new("C2")],
        )
    }

    fn session<V: Validator>(validator: V) -> Session<V> {
        Session::new(&config(), validator)
            .unwrap()
            .with_renderer(Renderer::new(Theme::plain()))
    }

    #[test]
    fn renders_once_per_event_and_finishes() {
        use GridEvent::*;
        let mut source = Script::new(&[MoveRight, Input('9'), MoveDown, Input('x'), Submit]);
        let mut sink = Recorder::default();

        let answer = session(AcceptAll).run(&mut source, &mut sink).unwrap();

        assert_eq!(answer.get("R1", "C2"), Some("9"));
        assert_eq!(answer.get("R2", "C2"), Some("x"));
        assert_eq!(answer.get("R3", "C1"), Some(""));
        // Initial frame plus one per non-final event.
        assert_eq!(sink.frames.len(), 5);
        let last = sink.finished.unwrap();
        assert!(last.main.contains("[ x ]"));
        assert!(!sink.aborted);
    }

    #[test]
    fn rejection_shows_error_then_clears() {
        use GridEvent::*;
        let mut source = Script::new(&[Submit, MoveDown, Interrupt]);
        let mut sink = Recorder::default();

        let err = session(Required).run(&mut source, &mut sink).unwrap_err();

        assert!(matches!(err, PromptError::Interrupted));
        assert_eq!(sink.frames[1].bottom, ">> R1 / C1 is empty; every cell is required");
        assert_eq!(sink.frames[2].bottom, "");
        assert!(sink.aborted);
        assert!(sink.finished.is_none());
    }

    #[test]
    fn end_of_input_is_an_interrupt() {
        let mut source = Script::new(&[GridEvent::Input('a')]);
        let mut sink = Recorder::default();
        let err = session(AcceptAll).run(&mut source, &mut sink).unwrap_err();
        assert!(matches!(err, PromptError::Interrupted));
        assert!(sink.aborted);
    }

    #[test]
    fn sink_errors_propagate() {
        let mut source = Script::new(&[]);
        let err = session(AcceptAll).run(&mut source, &mut Broken).unwrap_err();
        assert!(matches!(err, PromptError::Io(e) if e.kind() == io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn bad_config_fails_before_drawing() {
        let config = config().page_size(0);
        assert!(matches!(
            Session::new(&config, AcceptAll),
            Err(ConfigError::ZeroPageSize)
        ));
    }

    #[test]
    fn closures_validate() {
        use GridEvent::*;
        let only_digits = |a: &Answer| {
            if a.records().iter().all(|c| c.value.chars().all(|ch| ch.is_ascii_digit())) {
                Ok(())
            } else {
                Err("digits only".to_string())
            }
        };
        let mut source = Script::new(&[Input('z'), Submit, Backspace, Input('4'), Submit]);
        let mut sink = Recorder::default();
        let answer = session(only_digits).run(&mut source, &mut sink).unwrap();
        assert_eq!(answer.get("R1", "C1"), Some("4"));
        assert_eq!(sink.frames[2].bottom, ">> digits only");
    }
}
