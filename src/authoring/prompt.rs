//! Question/answer abstraction for the authoring flow

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use super::AuthoringError;

/// Source of operator answers.
///
/// Every question blocks until a valid answer is available; implementations
/// decide what "valid" means for free text.
pub trait Prompter {
    /// Ask a yes/no question.
    fn ask_yes_no(&mut self, question: &str) -> Result<bool, AuthoringError>;

    /// Ask the operator to pick one of `options`, returning its index.
    fn ask_choice(&mut self, question: &str, options: &[&str]) -> Result<usize, AuthoringError>;

    /// Ask for free text. A blank answer yields `default`.
    fn ask_text(&mut self, question: &str, default: &str) -> Result<String, AuthoringError>;

    /// Show a message.
    fn say(&mut self, message: &str) -> Result<(), AuthoringError>;
}

/// Line-oriented prompter over any reader/writer pair.
///
/// Invalid answers are rejected with a hint and the question is asked again.
/// Running out of input is an error, so a truncated script never loops.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<StdinLock<'static>, Stdout> {
    /// Prompter bound to the process terminal.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self, prompt: &str) -> Result<String, AuthoringError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AuthoringError::Input("unexpected end of input".to_string()));
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn ask_yes_no(&mut self, question: &str) -> Result<bool, AuthoringError> {
        loop {
            let answer = self.read_answer(&format!("{} (y/n): ", question))?;
            match answer.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer y or n")?,
            }
        }
    }

    fn ask_choice(&mut self, question: &str, options: &[&str]) -> Result<usize, AuthoringError> {
        if options.is_empty() {
            return Err(AuthoringError::Input(format!("no options to choose from: {}", question)));
        }

        writeln!(self.output)?;
        writeln!(self.output, "{}", question)?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, option)?;
        }

        let prompt = format!("Choose (1-{}): ", options.len());
        loop {
            let answer = self.read_answer(&prompt)?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(self.output, "Invalid choice, please try again")?,
            }
        }
    }

    fn ask_text(&mut self, question: &str, default: &str) -> Result<String, AuthoringError> {
        let prompt = if default.is_empty() {
            format!("{}: ", question)
        } else {
            format!("{} [{}]: ", question, default)
        };
        let answer = self.read_answer(&prompt)?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    fn say(&mut self, message: &str) -> Result<(), AuthoringError> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}
