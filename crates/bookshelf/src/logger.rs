//! Terminal logging using simplelog.
//!
//! Level comes from `RUST_LOG` (error/warn/info/debug/trace), defaulting to
//! info. Log lines go to stderr so they interleave cleanly with the demo's
//! stdout output.

use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// Initialize stderr logging.
pub fn init() {
    let level = std::env::var("RUST_LOG")
        .map(|v| match v.to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        })
        .unwrap_or(LevelFilter::Info);

    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}
