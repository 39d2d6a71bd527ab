use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// The shell's own command history. This store, not the line editor's recall
/// list, is what the `history` builtin prints and what gets persisted.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<String>,
    // How many entries `append_new` has already written out.
    appended: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Appends every non-empty line of `path` to the history.
    pub fn load(&mut self, path: &Path) -> io::Result<()> {
        let text = fs::read_to_string(path)?;
        self.entries
            .extend(text.lines().filter(|line| !line.is_empty()).map(str::to_owned));
        Ok(())
    }

    /// Writes the whole history to `path`, replacing its contents.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut body = self.entries.join("\n");
        if !body.is_empty() {
            body.push('\n');
        }
        fs::write(path, body)
    }

    /// Appends entries recorded since the previous call, then advances the
    /// watermark.
    pub fn append_new(&mut self, path: &Path) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).create(true).open(path)?;
        for line in &self.entries[self.appended..] {
            writeln!(file, "{line}")?;
        }
        self.appended = self.entries.len();
        Ok(())
    }
}
