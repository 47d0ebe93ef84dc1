//! Chunked, resumable CSV parsing
//!
//! A single-threaded host with an event loop cannot afford one blocking
//! call over a huge document. [`CsvSession`] is the explicit state machine
//! the blocking entry point folds into one call: parser position, the
//! partially built tree and pending diagnostics survive between `step`
//! calls, so the host can interleave other work and cancel between records.

use crate::conversion::cancel::CancellationToken;
use crate::conversion::config::CsvStyle;
use crate::error::{Diagnostic, ParseOutcome};
use crate::parser::csv::{read_record, CsvDocumentBuilder};
use crate::parser::Cursor;

/// Progress report from [`CsvSession::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// More input remains; call `step` again.
    Running,
    /// All input consumed; call [`CsvSession::finish`].
    Done,
    /// The token was cancelled; `finish` returns a cancelled outcome.
    Cancelled,
}

/// Saved cursor position between suspensions.
#[derive(Debug, Clone, Copy)]
struct SavedPosition {
    offset: usize,
    line: usize,
    column: usize,
}

/// A suspended CSV parse. Owns the input text and everything built so far.
#[derive(Debug)]
pub struct CsvSession {
    text: String,
    style: CsvStyle,
    position: SavedPosition,
    builder: CsvDocumentBuilder,
    token: Option<CancellationToken>,
    done: bool,
    cancelled: bool,
}

impl CsvSession {
    pub fn new(text: impl Into<String>, style: CsvStyle) -> Self {
        Self {
            text: text.into(),
            builder: CsvDocumentBuilder::new(style.clone()),
            style,
            position: SavedPosition {
                offset: 0,
                line: 1,
                column: 1,
            },
            token: None,
            done: false,
            cancelled: false,
        }
    }

    /// Attach a cancellation token checked before each record.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Process up to `max_records` records, then yield control back.
    pub fn step(&mut self, max_records: usize) -> StepStatus {
        if self.cancelled {
            return StepStatus::Cancelled;
        }
        if self.done {
            return StepStatus::Done;
        }

        let mut cur = Cursor::at(
            &self.text,
            self.position.offset,
            self.position.line,
            self.position.column,
        );
        for _ in 0..max_records {
            if let Some(token) = &self.token {
                if token.is_cancelled() {
                    self.cancelled = true;
                    self.position = SavedPosition {
                        offset: cur.offset(),
                        line: cur.line(),
                        column: cur.column(),
                    };
                    return StepStatus::Cancelled;
                }
            }

            match read_record(&mut cur, self.style.delimiter, self.style.quote_char) {
                Some(record) => self.builder.push_record(record),
                None => {
                    self.done = true;
                    break;
                }
            }
        }

        self.position = SavedPosition {
            offset: cur.offset(),
            line: cur.line(),
            column: cur.column(),
        };
        if self.done {
            StepStatus::Done
        } else {
            StepStatus::Running
        }
    }

    /// Records parsed so far (diagnostic count, for progress reporting).
    pub fn pending_diagnostics(&self) -> &[Diagnostic] {
        self.builder.diagnostics()
    }

    /// Consume the session and produce the outcome. A cancelled session
    /// yields no value, only the diagnostics accumulated before the
    /// cancellation point.
    pub fn finish(self) -> ParseOutcome {
        let builder = self.builder;

        if self.cancelled {
            let mut diagnostics = builder.into_diagnostics();
            diagnostics.push(Diagnostic::cancelled(
                self.position.line,
                self.position.column,
                self.position.offset,
            ));
            return ParseOutcome::cancelled(diagnostics);
        }

        // Drain whatever remains if the caller skipped straight to finish.
        if !self.done {
            let mut cur = Cursor::at(
                &self.text,
                self.position.offset,
                self.position.line,
                self.position.column,
            );
            let mut builder = builder;
            while let Some(record) =
                read_record(&mut cur, self.style.delimiter, self.style.quote_char)
            {
                builder.push_record(record);
            }
            let (value, diagnostics) = builder.finish();
            return ParseOutcome::success(value, diagnostics);
        }

        let (value, diagnostics) = builder.finish();
        ParseOutcome::success(value, diagnostics)
    }
}
