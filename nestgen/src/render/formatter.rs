//! Best-effort pretty-printing through an external formatter.
//!
//! The formatter is a collaborator, not part of the pipeline's correctness:
//! any failure here is recovered by the caller, which falls back to the
//! unformatted text. See [`crate::render::finish`].

use std::io::Write;
use std::process::{Command, Stdio};

use thiserror::Error;

/// Why a formatting attempt failed. Never fatal to the run.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to run formatter '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("formatter '{command}' rejected the input ({status}): {stderr}")]
    Rejected {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("formatter '{command}' produced non-UTF-8 output")]
    InvalidOutput { command: String },
}

/// A source pretty-printer.
pub trait Formatter {
    /// Format `source`, returning the formatted text.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] when the formatter cannot produce output;
    /// callers recover by keeping the unformatted text.
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Identity formatter used when no external pretty-printer is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        Ok(source.to_owned())
    }
}

/// Formatter that pipes the source through an external command
/// (stdin → stdout), e.g. `prettier --parser typescript`.
#[derive(Debug, Clone)]
pub struct ExternalFormatter {
    program: String,
    args: Vec<String>,
}

impl ExternalFormatter {
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a whitespace-separated command line.
    #[must_use]
    pub fn from_command_line(command: &str) -> Self {
        let mut parts = command.split_whitespace().map(str::to_owned);
        let program = parts.next().unwrap_or_default();
        Self {
            program,
            args: parts.collect(),
        }
    }

    fn spawn_error(&self, source: std::io::Error) -> FormatError {
        FormatError::Spawn {
            command: self.program.clone(),
            source,
        }
    }
}

impl Formatter for ExternalFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // stdin is fed from its own thread so the parent stays free to
        // drain stdout; writing the whole source inline deadlocks once a
        // streaming formatter fills its output pipe. A formatter that
        // exits without reading all input closes the pipe, which is its
        // exit status's business, not a write failure.
        let writer = child.stdin.take().map(|mut stdin| {
            let payload = source.as_bytes().to_vec();
            std::thread::spawn(move || match stdin.write_all(&payload) {
                Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => Err(e),
                _ => Ok(()),
            })
        });

        let output = child.wait_with_output().map_err(|e| self.spawn_error(e))?;
        if !output.status.success() {
            return Err(FormatError::Rejected {
                command: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        if let Some(handle) = writer {
            handle
                .join()
                .unwrap_or(Ok(()))
                .map_err(|e| self.spawn_error(e))?;
        }

        String::from_utf8(output.stdout).map_err(|_| FormatError::InvalidOutput {
            command: self.program.clone(),
        })
    }
}
