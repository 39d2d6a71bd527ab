use std::io::{self, Write};
use std::os::fd::{AsRawFd, OwnedFd};
use std::process;

use nix::errno::Errno;
use nix::sys::wait::waitpid;
use nix::unistd::{self, ForkResult, Pid};

use crate::command::CommandContext;
use crate::executor::{report, Executor};

/// A pipeline of two or more stages, each run in its own forked process with
/// adjacent stages wired stdout -> stdin through OS pipes. The dispatcher
/// runs inside each child, so builtins work as stages too.
pub struct Pipeline<'a> {
    stages: &'a [CommandContext],
}

impl<'a> Pipeline<'a> {
    pub fn new(stages: &'a [CommandContext]) -> Self {
        debug_assert!(stages.len() >= 2);
        Self { stages }
    }

    pub fn run(&self, executor: &Executor) {
        let pipes = match create_pipes(self.stages.len() - 1) {
            Ok(pipes) => pipes,
            Err(errno) => {
                report(format!("pipe: {errno}"));
                return;
            }
        };

        // Anything still sitting in the parent's stdout buffer would be
        // duplicated into every child.
        let _ = io::stdout().flush();

        let mut children: Vec<Pid> = Vec::with_capacity(self.stages.len());
        for (index, stage) in self.stages.iter().enumerate() {
            match unsafe { unistd::fork() } {
                Ok(ForkResult::Parent { child }) => children.push(child),
                Ok(ForkResult::Child) => {
                    let status = run_stage(executor, stage, index, self.stages.len(), &pipes);
                    let _ = io::stdout().flush();
                    process::exit(status);
                }
                Err(errno) => {
                    report(format!("fork: {errno}"));
                    break;
                }
            }
        }

        // The parent is plumbing only. Closing its pipe ends lets each
        // consumer see EOF once its producer exits.
        drop(pipes);
        wait_all(children);
    }
}

fn create_pipes(count: usize) -> nix::Result<Vec<(OwnedFd, OwnedFd)>> {
    let mut pipes = Vec::with_capacity(count);
    for _ in 0..count {
        // On failure the pipes created so far close on drop.
        pipes.push(unistd::pipe()?);
    }
    Ok(pipes)
}

/// Child-side setup for stage `index`: bind this stage's ends of the pipe
/// chain to stdin/stdout, close every pipe descriptor, then dispatch. The
/// returned status becomes the child's exit status.
fn run_stage(
    executor: &Executor,
    stage: &CommandContext,
    index: usize,
    count: usize,
    pipes: &[(OwnedFd, OwnedFd)],
) -> i32 {
    if index > 0 {
        if let Err(errno) = unistd::dup2(pipes[index - 1].0.as_raw_fd(), libc::STDIN_FILENO) {
            report(format!("dup2: {errno}"));
            return 1;
        }
    }
    if index + 1 < count {
        if let Err(errno) = unistd::dup2(pipes[index].1.as_raw_fd(), libc::STDOUT_FILENO) {
            report(format!("dup2: {errno}"));
            return 1;
        }
    }
    // The dup'd bindings keep this stage's streams alive; every original
    // descriptor must go, or producers would never see EOF.
    for (read_end, write_end) in pipes {
        let _ = unistd::close(read_end.as_raw_fd());
        let _ = unistd::close(write_end.as_raw_fd());
    }
    executor.dispatch(stage)
}

fn wait_all(children: Vec<Pid>) {
    for child in children {
        loop {
            match waitpid(child, None) {
                Err(Errno::EINTR) => continue,
                _ => break,
            }
        }
    }
}
