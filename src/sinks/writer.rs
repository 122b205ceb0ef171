//! Writer sink
//!
//! Emits one rendered line per record to any `std::io::Write` target
//! (a file, a pipe, an in-memory buffer in tests).

use crate::core::{Emitter, LoggerCore, LogRecord, Result, SourceId};
use std::io::Write;

pub struct WriterLogger<W: Write + Send> {
    core: LoggerCore,
    writer: W,
}

impl<W: Write + Send> WriterLogger<W> {
    pub fn new(source: impl Into<SourceId>, writer: W) -> Self {
        Self {
            core: LoggerCore::new(source),
            writer,
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Consume the sink and hand back its writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W: Write + Send> Emitter for WriterLogger<W> {
    fn core(&self) -> &LoggerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut LoggerCore {
        &mut self.core
    }

    fn emit(&mut self, record: LogRecord) -> Result<()> {
        let writer = &mut self.writer;
        self.core.emit_with(record, |line| {
            writeln!(writer, "{}", line)?;
            Ok(())
        })
    }
}
