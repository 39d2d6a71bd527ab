use std::cell::RefCell;
use std::env;
use std::fmt::Display;
use std::io::{self, Write};
use std::os::fd::{AsRawFd, RawFd};
use std::path::Path;
use std::process::Command;

use nix::unistd;

use crate::builtins::Registry;
use crate::command::{build_context, split_segments, CommandContext, Redirect};
use crate::history::History;
use crate::pipeline::Pipeline;
use crate::tokenizer::tokenize;
use crate::types::ShellError;
use crate::utils::locate_executable;

/// The execution engine: the builtin registry plus the history store. One
/// instance lives for the whole session and is shared with builtin handlers.
pub struct Executor {
    registry: Registry,
    history: RefCell<History>,
}

impl Executor {
    pub fn new() -> Self {
        Self {
            registry: Registry::with_defaults(),
            history: RefCell::new(History::new()),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn history(&self) -> &RefCell<History> {
        &self.history
    }

    pub fn remember(&self, line: &str) {
        self.history.borrow_mut().push(line);
    }

    pub fn load_history(&self) {
        if let Ok(path) = env::var("HISTFILE") {
            let _ = self.history.borrow_mut().load(Path::new(&path));
        }
    }

    pub fn save_history(&self) {
        if let Ok(path) = env::var("HISTFILE") {
            if let Err(err) = self.history.borrow().save(Path::new(&path)) {
                report(format!("history: {err}"));
            }
        }
    }

    /// Runs one raw input line: split on pipes, then either dispatch the
    /// single command or hand the stages to the pipeline orchestrator.
    pub fn run_line(&self, line: &str) -> i32 {
        let segments = split_segments(line);
        match segments.as_slice() {
            [] => 0,
            [segment] => {
                let ctx = build_context(tokenize(segment));
                if ctx.argv.is_empty() {
                    0
                } else {
                    self.dispatch(&ctx)
                }
            }
            _ => {
                let stages: Vec<CommandContext> = segments
                    .iter()
                    .map(|segment| build_context(tokenize(segment)))
                    .collect();
                Pipeline::new(&stages).run(self);
                0
            }
        }
    }

    /// Runs one command with its redirections applied: builtins in-process,
    /// anything else resolved against PATH and launched as a child. Never
    /// panics and never lets an error escape; every failure becomes a
    /// one-line report and a non-zero status.
    pub fn dispatch(&self, ctx: &CommandContext) -> i32 {
        if ctx.argv.is_empty() {
            return 0;
        }

        let _stdout_guard = match redirect(libc::STDOUT_FILENO, ctx.stdout_to.as_ref()) {
            Ok(guard) => guard,
            Err(err) => {
                report(&err);
                return 1;
            }
        };
        let _stderr_guard = match redirect(libc::STDERR_FILENO, ctx.stderr_to.as_ref()) {
            Ok(guard) => guard,
            Err(err) => {
                report(&err);
                return 1;
            }
        };

        let name = ctx.argv[0].as_str();
        if let Some(builtin) = self.registry.lookup(name) {
            return match builtin.execute(ctx, self) {
                Ok(()) => 0,
                Err(err) => {
                    report(&err);
                    1
                }
            };
        }
        match locate_executable(name) {
            Some(path) => run_external(&path, ctx),
            None => {
                report(format!("{name}: command not found"));
                127
            }
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

fn run_external(path: &Path, ctx: &CommandContext) -> i32 {
    // The child inherits the current descriptors, redirections included.
    match Command::new(path).args(&ctx.argv[1..]).status() {
        Ok(status) => status.code().unwrap_or(1),
        Err(err) => {
            report(format!("{}: {err}", ctx.argv[0]));
            1
        }
    }
}

/// Writes a report line to whatever descriptor 2 currently points at. The
/// print macros would miss rebound descriptors under test harnesses and
/// panic on a closed stream, so reports go through the handle directly.
pub(crate) fn report(message: impl Display) {
    let _ = writeln!(io::stderr(), "{message}");
}

fn redirect(fd: RawFd, target: Option<&Redirect>) -> Result<Option<RedirectGuard>, ShellError> {
    target
        .map(|redirect| RedirectGuard::install(fd, redirect))
        .transpose()
}

/// Rebinds a standard descriptor to a file for the guard's lifetime. Drop
/// restores the saved descriptor, so every dispatch exit path unwinds the
/// redirection.
struct RedirectGuard {
    fd: RawFd,
    saved: RawFd,
}

impl RedirectGuard {
    fn install(fd: RawFd, target: &Redirect) -> Result<Self, ShellError> {
        let saved = unistd::dup(fd).map_err(|errno| ShellError::Sys {
            context: "dup",
            errno,
        })?;
        let file = match target.open() {
            Ok(file) => file,
            Err(source) => {
                let _ = unistd::close(saved);
                return Err(ShellError::Redirect {
                    path: target.path.clone(),
                    source,
                });
            }
        };
        if let Err(errno) = unistd::dup2(file.as_raw_fd(), fd) {
            let _ = unistd::close(saved);
            return Err(ShellError::Sys {
                context: "dup2",
                errno,
            });
        }
        // `file` drops here; the duplicated binding keeps the target open.
        Ok(Self { fd, saved })
    }
}

impl Drop for RedirectGuard {
    fn drop(&mut self) {
        // Drain buffered writes into the redirected target before unbinding.
        if self.fd == libc::STDOUT_FILENO {
            let _ = io::stdout().flush();
        } else if self.fd == libc::STDERR_FILENO {
            let _ = io::stderr().flush();
        }
        let _ = unistd::dup2(self.saved, self.fd);
        let _ = unistd::close(self.saved);
    }
}
