//! Seams between the interactive app and the terminal.
//!
//! [`App`](crate::cli::app::App) only ever asks an [`Interaction`] what the
//! user wants. [`TerminalInteraction`] answers with dialoguer prompts and the
//! arrow-key selector; tests answer from a script.

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};

use crate::cli::output;
use crate::cli::ui::{record_table, DetailView, ListSelectionResult, ListSelector};
use crate::domain::Record;
use crate::forms::{Field, ValidationError};
use crate::notify::Notification;

/// Commands offered on the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseAction {
    View,
    Edit,
    Delete,
    Add,
    NextPage,
    PreviousPage,
    GoToPage,
    Refresh,
    Quit,
}

impl BrowseAction {
    pub fn label(&self) -> &'static str {
        match self {
            BrowseAction::View => "View user",
            BrowseAction::Edit => "Edit user",
            BrowseAction::Delete => "Delete user",
            BrowseAction::Add => "Add user",
            BrowseAction::NextPage => "Next page",
            BrowseAction::PreviousPage => "Previous page",
            BrowseAction::GoToPage => "Go to page…",
            BrowseAction::Refresh => "Refresh",
            BrowseAction::Quit => "Quit",
        }
    }
}

/// How a single field prompt was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    Value(String),
    /// Leave the current value as it is.
    Keep,
    /// Abandon the form.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResponse {
    Confirm,
    /// Walk through the fields again.
    Back,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailsAction {
    Edit,
    Back,
}

/// Everything a prompt needs to render one field.
#[derive(Debug, Clone)]
pub struct PromptContext<'a> {
    pub field: Field,
    pub label: &'static str,
    pub required: bool,
    pub secret: bool,
    pub current: &'a str,
    pub error: Option<&'a ValidationError>,
}

pub trait Interaction {
    fn browse_action(&mut self, actions: &[BrowseAction]) -> BrowseAction;

    /// Index into `records`, or `None` when the user backs out.
    fn pick_record(&mut self, records: &[Record]) -> Option<usize>;

    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse;

    fn confirm_submit(&mut self, summary: &[String]) -> ConfirmationResponse;

    fn details_action(&mut self, view: &DetailView) -> DetailsAction;

    fn confirm_delete(&mut self, record: &Record) -> bool;

    /// A page number in `1..=page_count`.
    fn page_number(&mut self, page_count: usize) -> Option<usize>;

    /// Surfaces drained controller notifications to the user.
    fn show_notifications(&mut self, notifications: Vec<Notification>);
}

/// Maps a typed answer onto a response. An unchanged answer keeps the current
/// value, except a blank answer to a required field, which goes to validation.
pub fn classify_answer(context: &PromptContext<'_>, value: String) -> PromptResponse {
    if context.required && value.trim().is_empty() {
        return PromptResponse::Value(value);
    }
    if value == context.current {
        PromptResponse::Keep
    } else {
        PromptResponse::Value(value)
    }
}

/// Interactive terminal implementation backed by dialoguer.
pub struct TerminalInteraction {
    theme: ColorfulTheme,
}

impl Default for TerminalInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalInteraction {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn select(&self, prompt: &str, items: &[&str]) -> Option<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .ok()
            .flatten()
    }
}

impl Interaction for TerminalInteraction {
    fn browse_action(&mut self, actions: &[BrowseAction]) -> BrowseAction {
        let labels: Vec<&str> = actions.iter().map(BrowseAction::label).collect();
        self.select("Choose an action", &labels)
            .and_then(|idx| actions.get(idx).copied())
            .unwrap_or(BrowseAction::Quit)
    }

    fn pick_record(&mut self, records: &[Record]) -> Option<usize> {
        let table = record_table(records);
        match ListSelector::new(&table).run() {
            ListSelectionResult::Selected(idx) => Some(idx),
            ListSelectionResult::Escaped | ListSelectionResult::Empty => None,
        }
    }

    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        if let Some(error) = context.error {
            output::warning(error);
        }
        let prompt = if context.required {
            context.label.to_string()
        } else {
            format!("{} (blank keeps current)", context.label)
        };

        let answer = if context.secret {
            Password::with_theme(&self.theme)
                .with_prompt(prompt)
                .allow_empty_password(true)
                .interact()
        } else {
            Input::<String>::with_theme(&self.theme)
                .with_prompt(prompt)
                .with_initial_text(context.current)
                .allow_empty(true)
                .interact_text()
        };

        match answer {
            Ok(value) => classify_answer(context, value),
            Err(_) => PromptResponse::Cancel,
        }
    }

    fn confirm_submit(&mut self, summary: &[String]) -> ConfirmationResponse {
        for line in summary {
            println!("  {line}");
        }
        match self.select("Save this user?", &["Save", "Edit again", "Cancel"]) {
            Some(0) => ConfirmationResponse::Confirm,
            Some(1) => ConfirmationResponse::Back,
            _ => ConfirmationResponse::Cancel,
        }
    }

    fn details_action(&mut self, _view: &DetailView) -> DetailsAction {
        match self.select("What next?", &["Edit", "Back to list"]) {
            Some(0) => DetailsAction::Edit,
            _ => DetailsAction::Back,
        }
    }

    fn confirm_delete(&mut self, record: &Record) -> bool {
        Confirm::with_theme(&self.theme)
            .with_prompt(format!("Delete {}?", record.display_label()))
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    fn page_number(&mut self, page_count: usize) -> Option<usize> {
        Input::<usize>::with_theme(&self.theme)
            .with_prompt(format!("Page (1-{page_count})"))
            .validate_with(move |page: &usize| {
                if (1..=page_count).contains(page) {
                    Ok(())
                } else {
                    Err(format!("Enter a number between 1 and {page_count}"))
                }
            })
            .interact_text()
            .ok()
    }

    fn show_notifications(&mut self, notifications: Vec<Notification>) {
        output::notifications(notifications);
    }
}
