//! Prompting backends for the menu shell
//!
//! On a terminal the shell uses `dialoguer` widgets; when input is piped
//! (scripts, tests) it falls back to plain line-based prompts.

use crate::error::Result;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use std::io::{self, BufRead, Write};

/// Source of user answers for the shell
pub trait Prompter {
    /// Show the menu and return the raw choice (`"1"` for the first item)
    ///
    /// `None` means the user is done: input ended or the menu was dismissed.
    fn menu(&mut self, title: &str, items: &[&str]) -> Result<Option<String>>;

    /// Ask for a free-text answer, falling back to `default` when left empty
    ///
    /// `None` means input ended.
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<Option<String>>;
}

/// Interactive prompts for a real terminal
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn menu(&mut self, title: &str, items: &[&str]) -> Result<Option<String>> {
        let selection = Select::with_theme(&self.theme)
            .with_prompt(title)
            .items(items)
            .default(0)
            .interact_opt()?;

        Ok(selection.map(|index| (index + 1).to_string()))
    }

    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);

        if let Some(default) = default {
            input = input.default(default.to_string());
        }

        Ok(Some(input.interact_text()?))
    }
}

/// Line-oriented prompts over any reader and writer
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

impl LinePrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompts over the process's standard input and output
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn menu(&mut self, title: &str, items: &[&str]) -> Result<Option<String>> {
        writeln!(self.writer, "\n{title}:")?;
        for (index, item) in items.iter().enumerate() {
            writeln!(self.writer, "{}. {item}", index + 1)?;
        }
        write!(self.writer, "Choose: ")?;
        self.writer.flush()?;

        Ok(self.read_line()?.map(|choice| choice.trim().to_string()))
    }

    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        match default {
            Some(default) => write!(self.writer, "{prompt} [{default}]: ")?,
            None => write!(self.writer, "{prompt}: ")?,
        }
        self.writer.flush()?;

        Ok(self.read_line()?.map(|answer| match default {
            Some(default) if answer.trim().is_empty() => default.to_string(),
            _ => answer,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_line_menu_renders_items_and_reads_choice() {
        let mut out = Vec::new();
        let mut prompter = LinePrompter::new(Cursor::new(" 2 \n"), &mut out);

        let choice = prompter.menu("Menu", &["Add", "Remove"]).unwrap();
        assert_eq!(choice.as_deref(), Some("2"));

        let rendered = String::from_utf8(out).unwrap();
        assert_eq!(rendered, "\nMenu:\n1. Add\n2. Remove\nChoose: ");
    }

    #[test]
    fn test_line_input_uses_default_and_detects_eof() {
        let mut out = Vec::new();
        let mut prompter = LinePrompter::new(Cursor::new("\r\n  keep spaces \n"), &mut out);

        assert_eq!(
            prompter.input("Path", Some("tickets.csv")).unwrap().as_deref(),
            Some("tickets.csv")
        );
        assert_eq!(
            prompter.input("Description", None).unwrap().as_deref(),
            Some("  keep spaces ")
        );
        assert_eq!(prompter.input("Id", None).unwrap(), None);
    }
}
