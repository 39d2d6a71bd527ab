use thiserror::Error;

/// Failures surfaced while dispatching one command. Each variant's Display is
/// the one-line report the user sees; nothing here escapes the dispatcher.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Opening a redirection target failed; the command never ran.
    #[error("{path}: {source}")]
    Redirect {
        path: String,
        source: std::io::Error,
    },

    // A descriptor-level syscall failed, with a short context word.
    #[error("{context}: {errno}")]
    Sys {
        context: &'static str,
        errno: nix::errno::Errno,
    },

    // Builtin-local failure; the message is already complete.
    #[error("{0}")]
    Builtin(String),
}
