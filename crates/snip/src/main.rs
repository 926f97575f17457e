//! snip - screenshot helper process
//!
//! Single-shot helper driven by the MCP server (or by hand): captures the
//! full screen or an interactively selected region, then prints exactly one
//! JSON result line on stdout. Logging goes to stderr; stdout belongs to
//! the result record.

mod emit;
#[cfg(windows)]
mod full;
#[cfg(windows)]
mod region;

use capture_gdi::CaptureReport;
use clap::{Parser, ValueEnum};
use emit::ResultEmitter;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "snip", about = "Full-screen and region screenshot helper")]
struct Args {
    /// Capture mode
    #[arg(long, value_enum, default_value = "region")]
    mode: Mode,

    /// Output PNG path
    #[arg(long)]
    out: Option<PathBuf>,

    /// Instructional text shown on the selection overlay
    #[arg(long, default_value = "Drag to select an area. Press Esc to cancel.")]
    prompt: String,

    /// 0-based display index for full capture
    #[arg(long, default_value_t = 0)]
    monitor: u32,

    /// Capture all displays (full mode only); ignores --monitor
    #[arg(long)]
    all: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Region,
    Full,
}

// Exit codes: 0 = handled terminal result (including cancellation and
// capture failure), 1 = failure after the capture path started, 2 = bad
// usage or unsupported environment.
fn main() -> ExitCode {
    init_logging();

    let args = Args::parse();
    let emitter = ResultEmitter::new();

    let Some(out) = args.out else {
        return finish(emitter, CaptureReport::failure("Missing --out <path>"), 2);
    };

    #[cfg(windows)]
    {
        unsafe {
            use windows::Win32::UI::HiDpi::{
                SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
            };
            let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
        }

        match args.mode {
            Mode::Full => match full::capture(&out, args.all, args.monitor) {
                Ok(report) => finish(emitter, report, 0),
                Err(e) => finish(emitter, CaptureReport::failure(e.to_string()), 1),
            },
            Mode::Region => match region::capture(&args.prompt, &out) {
                Ok(report) => finish(emitter, report, 0),
                Err(e) => finish(emitter, CaptureReport::failure(e.to_string()), 1),
            },
        }
    }

    #[cfg(not(windows))]
    {
        let _ = (args.mode, args.prompt, args.monitor, args.all, out);
        finish(emitter, CaptureReport::failure("This helper runs on Windows only."), 2)
    }
}

fn finish(emitter: ResultEmitter, report: CaptureReport, code: u8) -> ExitCode {
    if emitter.emit(&report).is_err() {
        return ExitCode::from(1);
    }
    ExitCode::from(code)
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("snip=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
