use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use crate::pipeline::{ReportError, Sink};

/// Writes a report as newline-terminated lines, replacing any existing file.
pub struct TextFileSink {
    path: PathBuf,
}

impl TextFileSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Sink for TextFileSink {
    fn write(&mut self, lines: &[String]) -> Result<(), ReportError> {
        let fail = |e: std::io::Error| ReportError::Sink(format!("failed to write '{}': {e}", self.path.display()));

        let file = File::create(&self.path).map_err(fail)?;
        let mut out = BufWriter::new(file);
        for line in lines {
            writeln!(out, "{line}").map_err(fail)?;
        }
        out.flush().map_err(fail)?;

        tracing::info!(path = %self.path.display(), lines = lines.len(), "report written");
        Ok(())
    }
}
