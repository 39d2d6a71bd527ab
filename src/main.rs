mod builtins;
mod command;
mod completion;
mod executor;
mod history;
mod pipeline;
mod tokenizer;
mod types;
mod utils;
#[cfg(test)]
mod tests;

use anyhow::Context as _;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use crate::completion::Completer;
use crate::executor::Executor;

fn main() -> anyhow::Result<()> {
    let executor = Executor::new();
    executor.load_history();

    let mut rl: Editor<Completer, DefaultHistory> =
        Editor::new().context("failed to initialize the line editor")?;
    rl.set_helper(Some(Completer::new(executor.registry())));
    if let Ok(histfile) = std::env::var("HISTFILE") {
        let _ = rl.load_history(&histfile);
    }

    loop {
        match rl.readline("$ ") {
            Ok(line) => {
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                executor.remember(&line);
                executor.run_line(&line);
            }
            // Ctrl-C abandons the current line and prompts again.
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(err) => {
                eprintln!("minish: {err}");
                break;
            }
        }
    }

    executor.save_history();
    Ok(())
}
