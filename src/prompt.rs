//! Terminal interaction.
//!
//! All operator-facing text goes through a [`Prompter`] so the collection
//! flow can be driven by a script in tests.

use std::io::{self, BufRead, Write};

use secrecy::SecretString;

use crate::error::{PaykeysError, Result};

/// Source of operator input and sink for operator-facing output.
pub trait Prompter {
    /// Read a plain (echoed) line. The answer is trimmed.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Read a masked line that is never echoed. The answer is trimmed.
    fn ask_secret(&mut self, prompt: &str) -> Result<SecretString>;

    /// Print one line of output.
    fn say(&mut self, line: &str);
}

/// Prompter backed by stdin/stdout, with masked reads through `rpassword`.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            // stdin closed (Ctrl-D)
            return Err(PaykeysError::Cancelled);
        }
        Ok(input.trim().to_string())
    }

    fn ask_secret(&mut self, prompt: &str) -> Result<SecretString> {
        match rpassword::prompt_password(prompt) {
            Ok(value) => Ok(SecretString::from(value.trim().to_string())),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(PaykeysError::Cancelled),
            Err(e) => Err(e.into()),
        }
    }

    fn say(&mut self, line: &str) {
        println!("{}", line);
    }
}
