//! One-shot terminal result emission
//!
//! Every terminal path funnels through `ResultEmitter::emit`, which
//! consumes the emitter — a second emission per run does not typecheck.

use capture_gdi::CaptureReport;
use std::io::{self, Write};

pub struct ResultEmitter {
    _private: (),
}

impl ResultEmitter {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Write the record to stdout as a single newline-terminated JSON line
    /// and flush before returning.
    pub fn emit(self, report: &CaptureReport) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_report(&mut out, report)?;
        out.flush()
    }
}

fn write_report<W: Write>(mut w: W, report: &CaptureReport) -> io::Result<()> {
    let line = serde_json::to_string(report)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    writeln!(w, "{line}")
}
