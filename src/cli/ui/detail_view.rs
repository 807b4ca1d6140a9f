use std::cmp;

use crate::cli::output::current_preferences;
use crate::domain::Record;

/// Long-form date used on the details view, e.g. "January 1, 1990".
pub const LONG_DATE_FORMAT: &str = "%B %-d, %Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub key: String,
    pub value: String,
}

/// A read-only view model: a title and ordered key/value fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub fields: Vec<DetailField>,
}

impl DetailView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(DetailField {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .map(|field| field.value.as_str())
    }

    /// Title, a rule, aligned `key: value` lines, and a closing rule.
    pub fn render(&self) -> String {
        let key_width = self
            .fields
            .iter()
            .map(|field| field.key.chars().count())
            .max()
            .unwrap_or(0);
        let lines: Vec<String> = self
            .fields
            .iter()
            .map(|field| {
                let pad = key_width - field.key.chars().count();
                format!("  {}:{}  {}", field.key, " ".repeat(pad), field.value)
            })
            .collect();

        let widest = lines
            .iter()
            .map(|line| line.chars().count())
            .chain([self.title.chars().count()])
            .max()
            .unwrap_or(0);
        let rule = rule(cmp::max(widest, 40));

        let mut out = vec![self.title.clone(), rule.clone()];
        out.extend(lines);
        out.push(rule);
        out.join("\n")
    }
}

fn rule(len: usize) -> String {
    let ch = if current_preferences().plain_mode {
        "-"
    } else {
        "─"
    };
    ch.repeat(len)
}

pub fn record_details(record: &Record) -> DetailView {
    DetailView::new("User Details")
        .with_field("Username", record.username.clone())
        .with_field("Full Name", record.full_name())
        .with_field("Date of Birth", record.dob.format(LONG_DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecordId;
    use chrono::NaiveDate;

    #[test]
    fn record_details_use_long_date() {
        let record = Record {
            id: RecordId::new("7"),
            username: "jdoe".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        };
        let view = record_details(&record);
        assert_eq!(view.title, "User Details");
        assert_eq!(view.value("Full Name"), Some("Jane Doe"));
        assert_eq!(view.value("Date of Birth"), Some("January 1, 1990"));
    }

    #[test]
    fn keys_are_aligned() {
        let rendered = DetailView::new("T")
            .with_field("A", "1")
            .with_field("Long", "2")
            .render();
        assert!(rendered.contains("  A:     1"));
        assert!(rendered.contains("  Long:  2"));
    }
}
