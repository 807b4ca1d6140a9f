use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

use crate::notify::{Notification, NotificationKind};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
    Separator,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputPreferences {
    pub color_enabled: bool,
    /// ASCII-only rules and markers.
    pub plain_mode: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            color_enabled: true,
            plain_mode: false,
        }
    }
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
    colored::control::set_override(prefs.color_enabled);
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn build_label(kind: MessageKind, plain: bool) -> (&'static str, &'static str) {
    match (kind, plain) {
        (MessageKind::Info, _) => ("INFO", "[i]"),
        (MessageKind::Success, false) => ("SUCCESS", "[✓]"),
        (MessageKind::Success, true) => ("SUCCESS", "[+]"),
        (MessageKind::Warning, _) => ("WARNING", "[!]"),
        (MessageKind::Error, _) => ("ERROR", "[x]"),
        (MessageKind::Section | MessageKind::Separator, _) => ("INFO", ""),
    }
}

/// Formats `message` for `kind` without printing it.
pub fn format_message(
    kind: MessageKind,
    message: impl fmt::Display,
    prefs: &OutputPreferences,
) -> String {
    let text = message.to_string();

    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Separator => {
            let ch = if prefs.plain_mode { "-" } else { "─" };
            ch.repeat(40)
        }
        _ => {
            let (label, icon) = build_label(kind, prefs.plain_mode);
            format!("{label}: {icon} {text}")
        }
    };

    if !prefs.color_enabled {
        return formatted;
    }

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Separator | MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let prefs = current_preferences();
    let formatted = format_message(kind, message, &prefs);
    match kind {
        MessageKind::Section | MessageKind::Separator => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

pub fn separator() {
    print(MessageKind::Separator, "");
}

/// Prints raw text (tables, detail views) as-is.
pub fn block(text: impl fmt::Display) {
    println!("{}", text);
}

pub fn kind_for(notification: &Notification) -> MessageKind {
    match notification.kind {
        NotificationKind::Success => MessageKind::Success,
        NotificationKind::Error => MessageKind::Error,
    }
}

/// Prints every notification in order.
pub fn notifications(pending: Vec<Notification>) {
    for notification in pending {
        print(kind_for(&notification), &notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: OutputPreferences = OutputPreferences {
        color_enabled: false,
        plain_mode: true,
    };

    #[test]
    fn plain_messages_carry_labels() {
        assert_eq!(
            format_message(MessageKind::Error, "error deleting user", &PLAIN),
            "ERROR: [x] error deleting user"
        );
        assert_eq!(
            format_message(MessageKind::Success, "saved", &PLAIN),
            "SUCCESS: [+] saved"
        );
        assert_eq!(
            format_message(MessageKind::Section, " User List ", &PLAIN),
            "=== User List ==="
        );
    }

    #[test]
    fn notifications_map_to_message_kinds() {
        assert_eq!(
            kind_for(&Notification::error("x")),
            MessageKind::Error
        );
        assert_eq!(
            kind_for(&Notification::success("x")),
            MessageKind::Success
        );
    }
}
