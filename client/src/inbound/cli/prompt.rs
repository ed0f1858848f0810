//! Line-oriented yes/no prompt.

use std::io::{self, BufRead, BufReader, Stderr, Stdin, Write};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::domain::ports::ConfirmationPrompt;

/// Asks a question on `output` and reads one answer line from `input`.
///
/// Only `y` or `yes` (any case) confirm. End of input and read errors
/// decline.
pub struct LineConfirmation<R, W> {
    io: Mutex<(R, W)>,
}

impl LineConfirmation<BufReader<Stdin>, Stderr> {
    /// Prompt on stderr and read answers from stdin.
    pub fn terminal() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R, W> LineConfirmation<R, W>
where
    R: BufRead,
    W: Write,
{
    /// Build a prompt over arbitrary streams.
    pub fn new(input: R, output: W) -> Self {
        Self {
            io: Mutex::new((input, output)),
        }
    }

    fn ask(&self, question: &str) -> io::Result<bool> {
        let mut guard = self.io.lock().unwrap_or_else(PoisonError::into_inner);
        let (input, output) = &mut *guard;
        write!(output, "{question} [y/N] ")?;
        output.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

impl<R, W> ConfirmationPrompt for LineConfirmation<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn confirm(&self, question: &str) -> bool {
        self.ask(question).unwrap_or_else(|error| {
            warn!(%error, "confirmation prompt failed; treating as declined");
            false
        })
    }
}
