use std::io::{self, Stdout, Write};

use crate::pipeline::{ReportError, Sink};

/// Prints a report preceded by a blank line.
pub struct ConsoleSink<W = Stdout> {
    out: W,
}

impl ConsoleSink<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sink for ConsoleSink<W> {
    fn write(&mut self, lines: &[String]) -> Result<(), ReportError> {
        let mut write_all = || -> io::Result<()> {
            writeln!(self.out)?;
            for line in lines {
                writeln!(self.out, "{line}")?;
            }
            self.out.flush()
        };
        write_all().map_err(|e| ReportError::Sink(format!("failed to print report: {e}")))
    }
}
