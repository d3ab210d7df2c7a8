//! External command execution.
//!
//! Builder-based API for running a program to completion with captured
//! output, optional stdin piping, and an optional deadline after which the
//! child is killed.
//!
//! # Examples
//!
//! ```ignore
//! use crate::utils::exec::Cmd;
//!
//! // Capture stdout of a file conversion
//! let output = Cmd::new("./bin/pandoc")
//!     .args(["--template", "metadata.tmpl", "posts/hello/index.md"])
//!     .run()?;
//!
//! // Pipe a generated document through stdin, give up after 30s
//! let output = Cmd::new("pandoc")
//!     .args(["--from", "markdown", "--to", "html5"])
//!     .stdin(document)
//!     .timeout(Some(Duration::from_secs(30)))
//!     .run()?;
//! ```

use regex::Regex;
use std::{
    ffi::{OsStr, OsString},
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process::{Child, Command, ExitStatus, Output, Stdio},
    sync::OnceLock,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};
use thiserror::Error;

/// How often a child with a deadline is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("`{0}` not found")]
    NotFound(String),

    #[error("failed to execute `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error while running `{program}`")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` failed with {status}{}", diagnostics_suffix(.diagnostics))]
    Failed {
        program: String,
        status: ExitStatus,
        diagnostics: String,
    },

    #[error("`{program}` timed out after {}s and was killed", .limit.as_secs())]
    TimedOut { program: String, limit: Duration },
}

fn diagnostics_suffix(diagnostics: &str) -> String {
    if diagnostics.is_empty() {
        String::new()
    } else {
        format!("\n{diagnostics}")
    }
}

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
#[derive(Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    stdin_data: Option<Vec<u8>>,
    timeout: Option<Duration>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Add a single argument.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_owned()));
        self
    }

    /// Set stdin data to pipe to the process.
    pub fn stdin<D: AsRef<[u8]>>(mut self, data: D) -> Self {
        self.stdin_data = Some(data.as_ref().to_vec());
        self
    }

    /// Kill the process and fail once `limit` has elapsed. `None` waits forever.
    pub fn timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }

    /// Get the program name for error messages.
    fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    /// Execute the command to completion.
    ///
    /// A non-zero exit status is an error carrying the captured diagnostics.
    pub fn run(self) -> Result<Output, ExecError> {
        let name = self.program_name();
        let program = resolve_program(&self.program)?;

        let mut cmd = Command::new(&program);
        cmd.args(&self.args)
            .stdin(if self.stdin_data.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| ExecError::Spawn {
            program: name.clone(),
            source,
        })?;

        // Feed stdin from its own thread so a chatty child can't deadlock us
        let writer = child
            .stdin
            .take()
            .zip(self.stdin_data)
            .map(|(mut stdin, data)| thread::spawn(move || stdin.write_all(&data)));
        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        let status = match self.timeout {
            Some(limit) => wait_with_deadline(&mut child, limit, &name)?,
            None => child.wait().map_err(|source| ExecError::Io {
                program: name.clone(),
                source,
            })?,
        };

        let io_err = |source| ExecError::Io {
            program: name.clone(),
            source,
        };
        let stdout = join_reader(stdout_reader).map_err(io_err)?;
        let stderr = join_reader(stderr_reader).map_err(io_err)?;
        let output = Output {
            status,
            stdout,
            stderr,
        };

        if !output.status.success() {
            return Err(ExecError::Failed {
                program: name,
                status: output.status,
                diagnostics: format_diagnostics(&output),
            });
        }

        // A child may legitimately exit before reading all of stdin
        if let Some(handle) = writer {
            match handle.join() {
                Ok(Err(e)) if e.kind() != io::ErrorKind::BrokenPipe => return Err(io_err(e)),
                _ => {}
            }
        }

        Ok(output)
    }
}

/// Resolve bare program names on `PATH`; explicit paths must exist.
fn resolve_program(program: &OsStr) -> Result<PathBuf, ExecError> {
    let path = Path::new(program);
    let not_found = || ExecError::NotFound(program.to_string_lossy().to_string());

    if path.components().count() > 1 {
        return if path.exists() {
            Ok(path.to_path_buf())
        } else {
            Err(not_found())
        };
    }
    which::which(program).map_err(|_| not_found())
}

fn wait_with_deadline(
    child: &mut Child,
    limit: Duration,
    name: &str,
) -> Result<ExitStatus, ExecError> {
    let started = Instant::now();
    loop {
        let polled = child.try_wait().map_err(|source| ExecError::Io {
            program: name.to_string(),
            source,
        })?;
        if let Some(status) = polled {
            return Ok(status);
        }
        if started.elapsed() >= limit {
            child.kill().ok();
            child.wait().ok();
            return Err(ExecError::TimedOut {
                program: name.to_string(),
                limit,
            });
        }
        thread::sleep(POLL_INTERVAL);
    }
}

type Reader = Option<JoinHandle<io::Result<Vec<u8>>>>;

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Reader {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf)?;
            Ok(buf)
        })
    })
}

fn join_reader(reader: Reader) -> io::Result<Vec<u8>> {
    match reader {
        Some(handle) => handle
            .join()
            .map_err(|_| io::Error::other("output reader thread panicked"))?,
        None => Ok(Vec::new()),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Strip ANSI escape codes from string.
fn strip_ansi(s: &str) -> std::borrow::Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid ansi regex"));
    re.replace_all(s, "")
}

/// Diagnostics for a failed command: stderr, then stdout unless it is
/// rendered output rather than a message.
fn format_diagnostics(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    let mut msg = strip_ansi(stderr.trim()).into_owned();

    let stdout_trimmed = stdout.trim();
    if !stdout_trimmed.is_empty()
        && !stdout_trimmed.starts_with("<!DOCTYPE")
        && !stdout_trimmed.starts_with('{')
    {
        if !msg.is_empty() {
            msg.push('\n');
        }
        msg.push_str("Stdout:\n");
        msg.push_str(&strip_ansi(stdout_trimmed));
    }
    msg
}

// ============================================================================
// Tests
// ============================================================================
