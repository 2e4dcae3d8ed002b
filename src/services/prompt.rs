use std::io::{self, BufRead, IsTerminal, Write};

/// Line-oriented user input. `Ok(None)` means input is exhausted.
pub trait Prompter {
    fn read_visible(&mut self, prompt: &str) -> io::Result<Option<String>>;
    fn read_hidden(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Reads from the process stdin, suppressing echo for secrets when stdin is a TTY.
pub struct TerminalPrompter {
    stdin: io::Stdin,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn read_visible(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;
        self.read_line()
    }

    fn read_hidden(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if !self.stdin.is_terminal() {
            log::debug!("stdin is not a terminal, reading secret as a plain line");
            return self.read_visible(prompt);
        }

        let label = prompt.trim_end().trim_end_matches(':');
        dialoguer::Password::new()
            .with_prompt(label)
            .allow_empty_password(true)
            .interact()
            .map(Some)
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned answers and records every prompt shown.
    #[derive(Default)]
    pub struct ScriptedPrompter {
        answers: VecDeque<String>,
        pub visible_prompts: Vec<String>,
        pub hidden_prompts: Vec<String>,
    }

    impl ScriptedPrompter {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                ..Self::default()
            }
        }

        pub fn remaining(&self) -> usize {
            self.answers.len()
        }
    }

    impl Prompter for ScriptedPrompter {
        fn read_visible(&mut self, prompt: &str) -> io::Result<Option<String>> {
            self.visible_prompts.push(prompt.to_string());
            Ok(self.answers.pop_front())
        }

        fn read_hidden(&mut self, prompt: &str) -> io::Result<Option<String>> {
            self.hidden_prompts.push(prompt.to_string());
            Ok(self.answers.pop_front())
        }
    }
}
