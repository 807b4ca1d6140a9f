#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Once;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use user_admin::cli::interaction::{
    BrowseAction, ConfirmationResponse, DetailsAction, Interaction, PromptContext, PromptResponse,
};
use user_admin::cli::output::{set_preferences, OutputPreferences};
use user_admin::cli::ui::DetailView;
use user_admin::domain::{Record, RecordId};
use user_admin::forms::Field;
use user_admin::notify::Notification;

/// Six users `A`..`F`, in service order.
pub static SIX_USERS: Lazy<Vec<Record>> = Lazy::new(|| {
    ["A", "B", "C", "D", "E", "F"]
        .iter()
        .map(|id| record(id))
        .collect()
});

pub fn record(id: &str) -> Record {
    Record {
        id: RecordId::new(id),
        username: format!("user_{}", id.to_lowercase()),
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
    }
}

pub fn ids(records: &[Record]) -> Vec<String> {
    records.iter().map(|r| r.id.as_str().to_string()).collect()
}

/// Plain, uncolored output for deterministic rendering.
pub fn plain_output() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        std::env::set_var("NO_COLOR", "1");
        set_preferences(OutputPreferences {
            color_enabled: false,
            plain_mode: true,
        });
    });
}

/// One scripted answer to whatever the app asks next.
#[derive(Debug, Clone)]
pub enum Step {
    Browse(BrowseAction),
    Pick(usize),
    Field(PromptResponse),
    Submit(ConfirmationResponse),
    Details(DetailsAction),
    ConfirmDelete(bool),
    Page(usize),
}

/// Answers prompts from a fixed script. When the script runs out it quits
/// or cancels, so a mis-scripted test terminates instead of hanging.
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    steps: VecDeque<Step>,
    pub prompted_fields: Vec<Field>,
    pub offered_actions: Vec<Vec<BrowseAction>>,
    pub submit_summaries: Vec<Vec<String>>,
    pub notifications: Vec<Notification>,
}

impl ScriptedInteraction {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
            ..Self::default()
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.steps.is_empty()
    }

    fn next(&mut self) -> Option<Step> {
        self.steps.pop_front()
    }
}

impl Interaction for ScriptedInteraction {
    fn browse_action(&mut self, actions: &[BrowseAction]) -> BrowseAction {
        self.offered_actions.push(actions.to_vec());
        match self.next() {
            Some(Step::Browse(action)) => action,
            None => BrowseAction::Quit,
            other => panic!("expected a browse step, got {other:?}"),
        }
    }

    fn pick_record(&mut self, records: &[Record]) -> Option<usize> {
        match self.next() {
            Some(Step::Pick(idx)) if idx < records.len() => Some(idx),
            Some(Step::Pick(_)) => None,
            other => panic!("expected a pick step, got {other:?}"),
        }
    }

    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        self.prompted_fields.push(context.field);
        match self.next() {
            Some(Step::Field(response)) => response,
            None => PromptResponse::Cancel,
            other => panic!("expected a field step, got {other:?}"),
        }
    }

    fn confirm_submit(&mut self, summary: &[String]) -> ConfirmationResponse {
        self.submit_summaries.push(summary.to_vec());
        match self.next() {
            Some(Step::Submit(response)) => response,
            None => ConfirmationResponse::Cancel,
            other => panic!("expected a submit step, got {other:?}"),
        }
    }

    fn details_action(&mut self, _view: &DetailView) -> DetailsAction {
        match self.next() {
            Some(Step::Details(action)) => action,
            None => DetailsAction::Back,
            other => panic!("expected a details step, got {other:?}"),
        }
    }

    fn confirm_delete(&mut self, _record: &Record) -> bool {
        match self.next() {
            Some(Step::ConfirmDelete(answer)) => answer,
            other => panic!("expected a delete confirmation, got {other:?}"),
        }
    }

    fn page_number(&mut self, page_count: usize) -> Option<usize> {
        match self.next() {
            Some(Step::Page(page)) if (1..=page_count).contains(&page) => Some(page),
            Some(Step::Page(_)) => None,
            other => panic!("expected a page step, got {other:?}"),
        }
    }

    fn show_notifications(&mut self, notifications: Vec<Notification>) {
        self.notifications.extend(notifications);
    }
}

pub fn value(text: &str) -> Step {
    Step::Field(PromptResponse::Value(text.to_string()))
}
