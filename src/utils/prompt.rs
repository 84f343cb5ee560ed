use std::io::{self, BufRead, Write};

use tracing::warn;

/// Synchronous yes/no question put to the user before a destructive action.
pub trait ConfirmPrompt: Send {
    fn confirm(&self, question: &str) -> bool;
}

/// Answers every question the same way. Used for `--yes` and in tests.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl ConfirmPrompt for AutoConfirm {
    fn confirm(&self, _question: &str) -> bool {
        self.0
    }
}

/// Asks on stdout and reads the answer from stdin. Anything but an explicit
/// yes counts as declining.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl ConfirmPrompt for TerminalPrompt {
    fn confirm(&self, question: &str) -> bool {
        print!("{} [y/N] ", question);
        if let Err(e) = io::stdout().flush() {
            warn!("Failed to flush prompt: {}", e);
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
