use crate::cli::output::current_preferences;
use crate::domain::record::{Record, DATE_FORMAT};

/// Describes how a column should align its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Center,
}

/// Specifies the configuration for a single column in the rendered table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub min_width: usize,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            min_width: 0,
            max_width: None,
            alignment: Alignment::Left,
        }
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Column metadata plus rows of pre-formatted cells.
#[derive(Clone, Debug)]
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub show_headers: bool,
    pub padding: usize,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            show_headers: true,
            padding: 1,
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Content width per column: widest of header, cells and `min_width`,
    /// capped by `max_width`.
    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let cells = self.rows.iter().filter_map(|row| row.get(idx));
                let widest = cells
                    .map(|cell| visible_width(cell))
                    .fold(visible_width(&column.header), usize::max)
                    .max(column.min_width);
                column.max_width.map_or(widest, |cap| widest.min(cap))
            })
            .collect()
    }

    pub fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                render_cell(text, *width, column.alignment, self.padding)
            })
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end()
            .to_string()
    }

    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        if self.show_headers {
            let header: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
            lines.push(self.render_row(&header, &widths));
            lines.push(horizontal_rule(&widths, self.padding));
        }
        lines.extend(self.rows.iter().map(|row| self.render_row(row, &widths)));
        lines.join("\n")
    }
}

/// The user list table: one row per record in the given order.
pub fn record_table(records: &[Record]) -> Table {
    let mut table = Table::new(vec![
        TableColumn::new("Username").max_width(24),
        TableColumn::new("First Name").max_width(20),
        TableColumn::new("Last Name").max_width(20),
        TableColumn::new("Date of Birth"),
    ]);
    for record in records {
        table.push_row(vec![
            record.username.clone(),
            record.first_name.clone(),
            record.last_name.clone(),
            record.dob.format(DATE_FORMAT).to_string(),
        ]);
    }
    table
}

fn skip_escape(bytes: &[u8], mut idx: usize) -> usize {
    idx += 1;
    if bytes.get(idx) == Some(&b'[') {
        idx += 1;
        while let Some(byte) = bytes.get(idx) {
            idx += 1;
            if (0x40..=0x7E).contains(byte) {
                break;
            }
        }
    }
    idx
}

/// Character count ignoring ANSI escape sequences.
pub fn visible_width(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut idx = 0;
    let mut width = 0;
    while idx < bytes.len() {
        if bytes[idx] == 0x1b {
            idx = skip_escape(bytes, idx);
            continue;
        }
        match text.get(idx..).and_then(|rest| rest.chars().next()) {
            Some(ch) => {
                width += 1;
                idx += ch.len_utf8();
            }
            None => break,
        }
    }
    width
}

pub fn truncate_text(text: &str, width: usize) -> String {
    if visible_width(text) <= width {
        return text.to_string();
    }
    match width {
        0 => String::new(),
        1 => "…".to_string(),
        _ => {
            let bytes = text.as_bytes();
            let target = width - 1;
            let mut idx = 0;
            let mut visible = 0;
            let mut out = String::new();
            let mut saw_ansi = false;
            while idx < bytes.len() && visible < target {
                if bytes[idx] == 0x1b {
                    let end = skip_escape(bytes, idx);
                    out.push_str(text.get(idx..end).unwrap_or(""));
                    saw_ansi = true;
                    idx = end;
                    continue;
                }
                let Some(ch) = text.get(idx..).and_then(|rest| rest.chars().next()) else {
                    break;
                };
                out.push(ch);
                visible += 1;
                idx += ch.len_utf8();
            }
            out.push('…');
            if saw_ansi {
                out.push_str("\u{1b}[0m");
            }
            out
        }
    }
}

pub fn render_cell(text: &str, width: usize, alignment: Alignment, padding: usize) -> String {
    let fitted = truncate_text(text, width);
    let remaining = width.saturating_sub(visible_width(&fitted));
    let (left, right) = match alignment {
        Alignment::Left => (0, remaining),
        Alignment::Right => (remaining, 0),
        Alignment::Center => (remaining / 2, remaining - remaining / 2),
    };
    format!(
        "{pad}{}{fitted}{}{pad}",
        " ".repeat(left),
        " ".repeat(right),
        pad = " ".repeat(padding)
    )
}

/// Rule spanning every column plus padding and separators.
pub fn horizontal_rule(widths: &[usize], padding: usize) -> String {
    if widths.is_empty() {
        return String::new();
    }
    let total = widths.iter().map(|w| w + padding * 2).sum::<usize>() + widths.len() - 1;
    let ch = if current_preferences().plain_mode {
        "-"
    } else {
        "─"
    };
    ch.repeat(total)
}
