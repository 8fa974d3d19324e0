//! Text and JSON rendering for command results

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Prints command results either as pretty JSON or as colored text.
pub struct Formatter {
    json: bool,
    no_color: bool,
}

impl Formatter {
    pub fn new(json: bool, no_color: bool) -> Self {
        Self { json, no_color }
    }

    /// Print `value` as JSON in `--json` mode, otherwise the text `render` builds.
    pub fn emit<T, F>(&self, value: &T, render: F) -> Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&Self) -> String,
    {
        if self.json {
            let output =
                serde_json::to_string_pretty(value).context("Failed to format JSON")?;
            println!("{}", output);
        } else {
            let text = render(self);
            if !text.is_empty() {
                println!("{}", text.trim_end());
            }
        }
        Ok(())
    }

    pub fn heading(&self, text: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            text.bright_cyan().bold().to_string()
        }
    }

    pub fn chord(&self, text: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            text.bright_green().bold().to_string()
        }
    }

    pub fn numeral(&self, text: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            text.bright_yellow().to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            text.dimmed().to_string()
        }
    }
}

/// Left-align `text` in `width` columns before any color is applied.
pub fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}
