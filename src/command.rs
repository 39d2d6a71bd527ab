use std::fs::{File, OpenOptions};
use std::io;

/// Everything the dispatcher needs to run one command: the argument vector
/// and where its standard output/error should go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandContext {
    pub argv: Vec<String>,
    pub stdout_to: Option<Redirect>,
    pub stderr_to: Option<Redirect>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub path: String,
    pub append: bool,
}

impl Redirect {
    fn new(path: String, append: bool) -> Self {
        Self { path, append }
    }

    pub fn open(&self) -> io::Result<File> {
        OpenOptions::new()
            .write(true)
            .create(true)
            .append(self.append)
            .truncate(!self.append)
            .open(&self.path)
    }
}

enum Stream {
    Out,
    Err,
}

/// Extracts redirection operators from the token stream and collects the
/// rest into argv. An operator consumes the next token as its target path;
/// an operator with nothing after it is demoted to a plain argument. When a
/// stream is redirected twice, the last target wins.
pub fn build_context(tokens: Vec<String>) -> CommandContext {
    let mut ctx = CommandContext::default();
    let mut iter = tokens.into_iter();

    while let Some(token) = iter.next() {
        let operator = match token.as_str() {
            ">" | "1>" => Some((Stream::Out, false)),
            ">>" | "1>>" => Some((Stream::Out, true)),
            "2>" => Some((Stream::Err, false)),
            "2>>" => Some((Stream::Err, true)),
            _ => None,
        };
        match operator {
            Some((stream, append)) => match iter.next() {
                Some(path) => {
                    let redirect = Some(Redirect::new(path, append));
                    match stream {
                        Stream::Out => ctx.stdout_to = redirect,
                        Stream::Err => ctx.stderr_to = redirect,
                    }
                }
                None => ctx.argv.push(token),
            },
            None => ctx.argv.push(token),
        }
    }
    ctx
}

/// Splits a raw line on the pipe character into trimmed, non-empty segments.
/// This runs before tokenization, so quoting does not protect a `|`.
pub fn split_segments(line: &str) -> Vec<&str> {
    line.split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}
