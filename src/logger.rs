//! Logging through an injected sink.
//!
//! The build pipeline never prints directly; it reports through a
//! [`LogSink`] handed in by the caller. `main` passes a [`TerminalSink`],
//! tests pass a silent or recording sink.
//!
//! # Example
//!
//! ```ignore
//! let sink = TerminalSink::new();
//! log!(&sink, "build"; "found {} posts and {} links", posts, links);
//! ```

use owo_colors::{OwoColorize, Stream, Style};
use std::io::{Write, stderr, stdout};

use crate::utils::date::now_utc;

/// Receiver for progress and diagnostic lines.
pub trait LogSink: Send + Sync {
    fn log(&self, module: &str, message: &str);
}

/// Log a message with a module prefix through a sink
///
/// # Usage
/// ```ignore
/// log!(sink, "module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($sink:expr, $module:expr; $($arg:tt)*) => {{
        $crate::logger::LogSink::log($sink, $module, &format!($($arg)*))
    }};
}

// ============================================================================
// Terminal
// ============================================================================

/// Writes `[timestamp] [module] message` lines; `error` lines go to stderr.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl TerminalSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TerminalSink {
    fn log(&self, module: &str, message: &str) {
        let module_lower = module.to_ascii_lowercase();
        let to_stderr = module_lower == "error";
        let stream = if to_stderr {
            Stream::Stderr
        } else {
            Stream::Stdout
        };
        let line = format_line(
            &now_utc(),
            &colorize_prefix(module, &module_lower, stream),
            message,
            stream,
        );

        if to_stderr {
            let mut err = stderr().lock();
            writeln!(err, "{line}").ok();
            err.flush().ok();
        } else {
            let mut out = stdout().lock();
            writeln!(out, "{line}").ok();
            out.flush().ok();
        }
    }
}

fn format_line(timestamp: &str, prefix: &str, message: &str, stream: Stream) -> String {
    let stamp = format!("[{timestamp}]");
    format!(
        "{} {prefix} {message}",
        stamp.if_supports_color(stream, |t| t.dimmed())
    )
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str, stream: Stream) -> String {
    let style = prefix_style(module_lower);
    format!("[{module}]")
        .if_supports_color(stream, |p| p.style(style))
        .to_string()
}

fn prefix_style(module_lower: &str) -> Style {
    match module_lower {
        "build" => Style::new().bright_blue().bold(),
        "error" => Style::new().bright_red().bold(),
        _ => Style::new().bright_yellow().bold(),
    }
}

// ============================================================================
// Test sinks
// ============================================================================

#[cfg(test)]
pub use testing::{MemorySink, SilentSink};

#[cfg(test)]
mod testing {
    use super::LogSink;
    use parking_lot::Mutex;

    /// Discards everything.
    pub struct SilentSink;

    impl LogSink for SilentSink {
        fn log(&self, _module: &str, _message: &str) {}
    }

    /// Records every `(module, message)` pair.
    #[derive(Default)]
    pub struct MemorySink {
        entries: Mutex<Vec<(String, String)>>,
    }

    impl MemorySink {
        pub fn new() -> Self {
            Self::default()
        }

        /// Messages logged under `module`, in arrival order.
        pub fn messages(&self, module: &str) -> Vec<String> {
            self.entries
                .lock()
                .iter()
                .filter(|(m, _)| m == module)
                .map(|(_, msg)| msg.clone())
                .collect()
        }
    }

    impl LogSink for MemorySink {
        fn log(&self, module: &str, message: &str) {
            self.entries
                .lock()
                .push((module.to_string(), message.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_macro_formats_through_sink() {
        let sink = MemorySink::new();
        log!(&sink, "build"; "found {} posts and {} links", 3, 1);
        log!(&sink, "assets"; "copied {}", "out/style.css");

        assert_eq!(sink.messages("build"), vec!["found 3 posts and 1 links"]);
        assert_eq!(sink.messages("assets"), vec!["copied out/style.css"]);
        assert!(sink.messages("error").is_empty());
    }

    #[test]
    fn test_format_line_has_timestamp_prefix() {
        owo_colors::set_override(false);
        let line = format_line("2024-01-01T00:00:00Z", "[build]", "done", Stream::Stdout);
        assert_eq!(line, "[2024-01-01T00:00:00Z] [build] done");

        let prefix = colorize_prefix("Error", "error", Stream::Stderr);
        assert_eq!(prefix, "[Error]");
    }

    #[test]
    fn test_prefix_style_per_module() {
        let styled = |module: &str| "[x]".style(prefix_style(module)).to_string();

        // Bright foreground codes: 94 blue, 91 red, 93 yellow
        assert!(styled("build").contains("94m"));
        assert!(styled("error").contains("91m"));
        assert!(styled("assets").contains("93m"));
        assert!(styled("build").contains("[x]"));
    }
}
