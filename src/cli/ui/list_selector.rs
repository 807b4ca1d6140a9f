use std::io::{self, Stdout, Write};

use colored::Colorize;
use crossterm::{
    cursor,
    event::KeyCode,
    terminal::{self, ClearType},
    ExecutableCommand,
};

use crate::cli::output::current_preferences;
use crate::cli::ui::navigation::{read_nav_key, step, NavKey};
use crate::cli::ui::table_renderer::{horizontal_rule, Table};

const HIGHLIGHT: &str = "> ";
const NORMAL: &str = "  ";
const FOOTER_HINT: &str = "Use ↑ ↓ to navigate, Enter to select, ESC to return.";

#[derive(Debug, PartialEq, Eq)]
pub enum ListSelectionResult {
    Selected(usize),
    Escaped,
    Empty,
}

/// Arrow-key row picker over a rendered [`Table`].
pub struct ListSelector<'a> {
    table: &'a Table,
}

impl<'a> ListSelector<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    pub fn run(&self) -> ListSelectionResult {
        if self.table.rows.is_empty() {
            return ListSelectionResult::Empty;
        }
        if terminal::enable_raw_mode().is_err() {
            return ListSelectionResult::Escaped;
        }

        let mut stdout = io::stdout();
        let cursor_hidden = stdout.execute(cursor::Hide).is_ok();
        let len = self.table.rows.len();
        let mut index = 0;

        let result = loop {
            if self.draw(&mut stdout, index).is_err() {
                break ListSelectionResult::Escaped;
            }
            match read_nav_key() {
                NavKey::Enter => break ListSelectionResult::Selected(index),
                NavKey::Esc => break ListSelectionResult::Escaped,
                key => index = step(index, len, key),
            }
        };

        if cursor_hidden {
            stdout.execute(cursor::Show).ok();
        }
        terminal::disable_raw_mode().ok();
        println!();
        result
    }

    /// Drives the selector from a fixed key sequence without a terminal.
    pub fn run_simulated(&self, keys: &[KeyCode]) -> ListSelectionResult {
        if self.table.rows.is_empty() {
            return ListSelectionResult::Empty;
        }
        let len = self.table.rows.len();
        let mut index = 0;
        for key in keys {
            match NavKey::from(*key) {
                NavKey::Enter => return ListSelectionResult::Selected(index),
                NavKey::Esc => return ListSelectionResult::Escaped,
                nav => index = step(index, len, nav),
            }
        }
        ListSelectionResult::Escaped
    }

    fn draw(&self, stdout: &mut Stdout, index: usize) -> io::Result<()> {
        stdout.execute(cursor::MoveToColumn(0))?;
        stdout.execute(terminal::Clear(ClearType::FromCursorDown))?;
        let lines = self.render_lines(index);
        let height = lines.len() + 1;
        for line in &lines {
            write!(stdout, "{line}\r\n")?;
        }
        write!(stdout, "{FOOTER_HINT}\r\n")?;
        stdout.flush()?;
        stdout.execute(cursor::MoveUp(height as u16))?;
        Ok(())
    }

    /// Table lines with the marker on row `index`.
    pub fn render_lines(&self, index: usize) -> Vec<String> {
        let widths = self.table.compute_widths();
        let color = current_preferences().color_enabled;
        let mut lines = Vec::new();

        if self.table.show_headers {
            let headers: Vec<String> = self
                .table
                .columns
                .iter()
                .map(|column| column.header.to_uppercase())
                .collect();
            lines.push(format!("{NORMAL}{}", self.table.render_row(&headers, &widths)));
            lines.push(format!(
                "{NORMAL}{}",
                horizontal_rule(&widths, self.table.padding)
            ));
        }

        for (row_idx, row) in self.table.rows.iter().enumerate() {
            let content = self.table.render_row(row, &widths);
            if row_idx == index {
                let line = format!("{HIGHLIGHT}{content}");
                lines.push(if color {
                    line.reversed().to_string()
                } else {
                    line
                });
            } else {
                lines.push(format!("{NORMAL}{content}"));
            }
        }
        lines
    }
}
