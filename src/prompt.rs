use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::Path;

/// Asked before an existing output file is replaced.
pub trait Confirm {
    fn confirm_overwrite(&mut self, path: &Path) -> bool;
}

/// `--force`: overwrite without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm_overwrite(&mut self, _path: &Path) -> bool {
        true
    }
}

/// Interactive `Overwrite? [y/N]` prompt. Only an exact `y` (after trimming)
/// confirms, anything else including EOF declines.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsolePrompt { input, output }
    }
}

impl ConsolePrompt<std::io::StdinLock<'static>, std::io::Stderr> {
    pub fn stdio() -> Self {
        ConsolePrompt::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirm for ConsolePrompt<R, W> {
    fn confirm_overwrite(&mut self, path: &Path) -> bool {
        let _ = write!(self.output, "File {} already exists.\nOverwrite? [y/N]: ", path.display());
        let _ = self.output.flush();

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => answer.trim() == "y",
            Err(_) => false,
        }
    }
}

/// Replays canned answers, declining once they run out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConfirm {
    answers: VecDeque<bool>,
    pub asked: Vec<std::path::PathBuf>,
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        ScriptedConfirm {
            answers: answers.into_iter().collect(),
            asked: vec![],
        }
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm_overwrite(&mut self, path: &Path) -> bool {
        self.asked.push(path.to_path_buf());
        self.answers.pop_front().unwrap_or(false)
    }
}
