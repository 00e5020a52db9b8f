//! Line-oriented prompts for the interactive menu.
//!
//! Every typed prompt re-asks until it gets a value it can parse. End of
//! input surfaces as [`ShopError::EndOfInput`] so the menu can shut down.

use crate::dates::parse_date;
use crate::error::{Result, ShopError};
use chrono::NaiveDate;
use colored::Colorize;
use std::io::{BufRead, Write};

pub const INVALID_INPUT: &str = "Your input is invalid!";

pub struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub fn warn(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text.yellow())?;
        Ok(())
    }

    /// Prints `label` and reads one line, without its line ending.
    pub fn line(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(ShopError::EndOfInput);
        }
        Ok(buf.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Reads a line that must not be blank.
    pub fn required(&mut self, label: &str) -> Result<String> {
        loop {
            let value = self.line(label)?;
            if !value.trim().is_empty() {
                return Ok(value.trim().to_string());
            }
            self.warn(INVALID_INPUT)?;
        }
    }

    pub fn number(&mut self, label: &str) -> Result<i64> {
        loop {
            match self.line(label)?.trim().parse::<i64>() {
                Ok(n) => return Ok(n),
                Err(_) => self.warn(INVALID_INPUT)?,
            }
        }
    }

    /// Reads a number greater than zero.
    pub fn positive(&mut self, label: &str) -> Result<i64> {
        loop {
            let n = self.number(label)?;
            if n > 0 {
                return Ok(n);
            }
            self.warn("Please enter a number greater than zero.")?;
        }
    }

    pub fn date(&mut self, label: &str) -> Result<NaiveDate> {
        loop {
            let value = self.line(label)?;
            match parse_date(&value) {
                Ok(date) => return Ok(date),
                Err(e) => self.warn(&e.to_string())?,
            }
        }
    }

    /// The menu's choice prompt.
    pub fn choice(&mut self) -> Result<i64> {
        self.number("Please make your choice: ")
    }

    /// Shows a numbered list (starting at 0) and returns the chosen index.
    pub fn pick<S: AsRef<str>>(&mut self, heading: &str, items: &[S]) -> Result<usize> {
        self.say(heading)?;
        for (i, item) in items.iter().enumerate() {
            self.say(&format!("{}. {}", i, item.as_ref()))?;
        }
        loop {
            let choice = self.choice()?;
            if let Ok(idx) = usize::try_from(choice) {
                if idx < items.len() {
                    return Ok(idx);
                }
            }
            self.warn(INVALID_INPUT)?;
        }
    }

    /// Asks a `<1 - Yes/ 2 - No>` question.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        self.say(&format!("{} <1 - Yes/ 2 - No>", question))?;
        loop {
            match self.choice()? {
                1 => return Ok(true),
                2 => return Ok(false),
                _ => self.warn(INVALID_INPUT)?,
            }
        }
    }
}
