use std::fs;

use rustyline::completion::{Completer as RustylineCompleter, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper, Result};

use crate::builtins::Registry;
use crate::utils::is_executable;

/// Completes the command word from builtin names and PATH executables.
/// Later words get no candidates.
pub struct Completer {
    commands: Vec<String>,
}

impl Completer {
    pub fn new(registry: &Registry) -> Self {
        Self {
            commands: find_commands(registry),
        }
    }

    fn complete_command(&self, prefix: &str) -> Vec<String> {
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .cloned()
            .collect()
    }
}

fn find_commands(registry: &Registry) -> Vec<String> {
    let mut commands: Vec<String> = registry.names().map(str::to_owned).collect();

    if let Ok(path) = std::env::var("PATH") {
        for dir in path.split(':') {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.flatten() {
                // Same check the resolver applies, so symlinked binaries
                // complete too.
                if !is_executable(&entry.path()) {
                    continue;
                }
                if let Some(name) = entry.file_name().to_str() {
                    commands.push(name.to_string());
                }
            }
        }
    }

    commands.sort();
    commands.dedup();
    commands
}

impl Helper for Completer {}

impl RustylineCompleter for Completer {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Result<(usize, Vec<Pair>)> {
        let start = line[..pos].rfind(char::is_whitespace).map_or(0, |i| i + 1);
        if start != 0 {
            // Only the command word completes.
            return Ok((start, Vec::new()));
        }
        let pairs = self
            .complete_command(&line[..pos])
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((0, pairs))
    }
}

impl Highlighter for Completer {}
impl Hinter for Completer {
    type Hint = String;
}
impl Validator for Completer {}
