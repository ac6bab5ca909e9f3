//! Terminal rendering module for rich markdown output
//!
//! Markdown produced by the core display types is rendered with termimad,
//! with a plain-text fallback for `--no-color` and non-terminal use.

use std::io::{self, Write};

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.strikeout.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Formats markdown for the terminal without printing it.
    ///
    /// Headers keep their `#` markers so the column structure of a day stays
    /// readable; everything else goes through termimad's inline renderer.
    pub fn paint(&self, markdown: &str) -> String {
        if !self.rich_enabled {
            return markdown.to_string();
        }
        let mut out = String::with_capacity(markdown.len());
        for line in markdown.lines() {
            if line.starts_with('#') {
                out.push_str(&format!("\x1b[34m{line}\x1b[0m"));
            } else {
                out.push_str(&self.skin.inline(line).to_string());
            }
            out.push('\n');
        }
        out
    }

    /// Renders markdown text to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(self.paint(markdown).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
