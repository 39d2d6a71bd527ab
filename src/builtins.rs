use std::collections::HashMap;
use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use crate::command::CommandContext;
use crate::executor::Executor;
use crate::types::ShellError;
use crate::utils::locate_executable;

/// A shell builtin. Handlers read and write whatever standard streams are
/// currently bound, so redirection installed by the dispatcher is invisible
/// to them. A returned error aborts the command; the dispatcher reports it.
pub trait Builtin {
    fn execute(&self, ctx: &CommandContext, executor: &Executor) -> Result<(), ShellError>;
}

/// Name -> handler table, populated once at startup and read-only after.
pub struct Registry {
    table: HashMap<&'static str, Box<dyn Builtin>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("echo", Box::new(Echo));
        registry.register("exit", Box::new(Exit));
        registry.register("type", Box::new(Type));
        registry.register("pwd", Box::new(Pwd));
        registry.register("cd", Box::new(Cd));
        registry.register("history", Box::new(History));
        registry
    }

    pub fn register(&mut self, name: &'static str, handler: Box<dyn Builtin>) {
        let previous = self.table.insert(name, handler);
        assert!(previous.is_none(), "duplicate builtin: {name}");
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn Builtin> {
        self.table.get(name).map(|handler| handler.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.keys().copied()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

struct Echo;

impl Builtin for Echo {
    fn execute(&self, ctx: &CommandContext, _executor: &Executor) -> Result<(), ShellError> {
        writeln!(io::stdout(), "{}", ctx.argv[1..].join(" "))?;
        Ok(())
    }
}

struct Exit;

impl Builtin for Exit {
    fn execute(&self, ctx: &CommandContext, executor: &Executor) -> Result<(), ShellError> {
        let code = match ctx.argv.get(1) {
            Some(arg) => arg
                .parse::<i32>()
                .map_err(|_| ShellError::Builtin("exit: invalid code".into()))?,
            None => 0,
        };
        executor.save_history();
        process::exit(code);
    }
}

struct Type;

impl Builtin for Type {
    fn execute(&self, ctx: &CommandContext, executor: &Executor) -> Result<(), ShellError> {
        let mut out = io::stdout().lock();
        let Some(name) = ctx.argv.get(1) else {
            writeln!(out, "type: missing operand")?;
            return Ok(());
        };
        if executor.registry().contains(name) {
            writeln!(out, "{name} is a shell builtin")?;
        } else if let Some(path) = locate_executable(name) {
            writeln!(out, "{name} is {}", path.display())?;
        } else {
            writeln!(out, "{name}: not found")?;
        }
        Ok(())
    }
}

struct Pwd;

impl Builtin for Pwd {
    fn execute(&self, _ctx: &CommandContext, _executor: &Executor) -> Result<(), ShellError> {
        let dir = env::current_dir()
            .map_err(|err| ShellError::Builtin(format!("pwd: {err}")))?;
        writeln!(io::stdout(), "{}", dir.display())?;
        Ok(())
    }
}

struct Cd;

impl Builtin for Cd {
    fn execute(&self, ctx: &CommandContext, _executor: &Executor) -> Result<(), ShellError> {
        let mut target = match ctx.argv.get(1) {
            Some(arg) => arg.clone(),
            None => home_dir()?,
        };
        if target == "~" || target.starts_with("~/") {
            let home = home_dir()?;
            target = format!("{home}{}", &target[1..]);
        }
        env::set_current_dir(&target)
            .map_err(|err| ShellError::Builtin(format!("cd: {target}: {err}")))
    }
}

fn home_dir() -> Result<String, ShellError> {
    env::var("HOME")
        .ok()
        .filter(|home| !home.is_empty())
        .ok_or_else(|| ShellError::Builtin("cd: HOME not set".into()))
}

struct History;

impl Builtin for History {
    fn execute(&self, ctx: &CommandContext, executor: &Executor) -> Result<(), ShellError> {
        match ctx.argv.get(1).map(String::as_str) {
            Some("-r") if ctx.argv.len() == 3 => executor
                .history()
                .borrow_mut()
                .load(Path::new(&ctx.argv[2]))
                .map_err(|_| {
                    ShellError::Builtin(format!("history: cannot open {}", ctx.argv[2]))
                }),
            Some("-w") if ctx.argv.len() == 3 => executor
                .history()
                .borrow()
                .save(Path::new(&ctx.argv[2]))
                .map_err(|_| {
                    ShellError::Builtin(format!(
                        "history: cannot open {} for writing",
                        ctx.argv[2]
                    ))
                }),
            Some("-a") if ctx.argv.len() == 3 => executor
                .history()
                .borrow_mut()
                .append_new(Path::new(&ctx.argv[2]))
                .map_err(|_| {
                    ShellError::Builtin(format!(
                        "history: cannot open {} for appending",
                        ctx.argv[2]
                    ))
                }),
            limit => {
                let history = executor.history().borrow();
                let entries = history.entries();
                let mut count = entries.len();
                // Anything unparsable or out of range means the full list.
                if let Some(Ok(n)) = limit.map(str::parse::<usize>) {
                    if n > 0 && n < count {
                        count = n;
                    }
                }
                let mut out = io::stdout().lock();
                for (index, line) in entries.iter().enumerate().skip(entries.len() - count) {
                    writeln!(out, "{:>5}  {}", index + 1, line)?;
                }
                Ok(())
            }
        }
    }
}
