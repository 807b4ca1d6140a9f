use tracing::debug;

use crate::cli::interaction::{
    BrowseAction, ConfirmationResponse, DetailsAction, Interaction, PromptContext, PromptResponse,
};
use crate::cli::output;
use crate::cli::ui::{record_details, record_table};
use crate::coordinator::{ActiveMode, ViewCoordinator, ViewState};
use crate::domain::Record;
use crate::forms::{schema, FormEvent, FormMode, RecordFormController};
use crate::list::{MutationEvent, RecordListController};
use crate::transport::RecordTransport;

/// Whether the main loop should keep going after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The interactive front end: one coordinator, one list, and a form opened
/// on demand, all talking to a single transport.
pub struct App<T: RecordTransport> {
    transport: T,
    coordinator: ViewCoordinator,
    list: RecordListController,
}

impl<T: RecordTransport> App<T> {
    pub fn new(transport: T, page_size: usize) -> Self {
        Self {
            transport,
            coordinator: ViewCoordinator::new(),
            list: RecordListController::new(page_size),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn coordinator(&self) -> &ViewCoordinator {
        &self.coordinator
    }

    pub fn list(&self) -> &RecordListController {
        &self.list
    }

    pub fn run<I: Interaction>(&mut self, interaction: &mut I) {
        while self.step(interaction) == Flow::Continue {}
    }

    /// Runs the active view once.
    pub fn step<I: Interaction>(&mut self, interaction: &mut I) -> Flow {
        match self.coordinator.state().clone() {
            ViewState::Browsing => self.browse(interaction),
            ViewState::Editing(record) => {
                self.edit(record, interaction);
                Flow::Continue
            }
            ViewState::ViewingDetails(record) => {
                self.details(record, interaction);
                Flow::Continue
            }
        }
    }

    fn browse<I: Interaction>(&mut self, interaction: &mut I) -> Flow {
        self.list.activate(&self.transport);
        interaction.show_notifications(self.list.take_notifications());
        self.render_list();

        match interaction.browse_action(&self.available_actions()) {
            BrowseAction::Add => self.leave_browsing(None, ActiveMode::Editing),
            BrowseAction::View => {
                if let Some(record) = self.pick(interaction) {
                    self.leave_browsing(Some(record), ActiveMode::ViewingDetails);
                }
            }
            BrowseAction::Edit => {
                if let Some(record) = self.pick(interaction) {
                    self.leave_browsing(Some(record), ActiveMode::Editing);
                }
            }
            BrowseAction::Delete => {
                if let Some(record) = self.pick(interaction) {
                    if interaction.confirm_delete(&record) {
                        self.list.request_delete(&record.id, &self.transport);
                    }
                }
            }
            BrowseAction::NextPage => self.list.next_page(),
            BrowseAction::PreviousPage => self.list.previous_page(),
            BrowseAction::GoToPage => {
                if let Some(page) = interaction.page_number(self.list.page_count()) {
                    self.list.go_to(page);
                }
            }
            BrowseAction::Refresh => self.list.refresh(&self.transport),
            BrowseAction::Quit => return Flow::Quit,
        }
        interaction.show_notifications(self.list.take_notifications());
        Flow::Continue
    }

    /// Actions that make sense for the current cache and page.
    pub fn available_actions(&self) -> Vec<BrowseAction> {
        let mut actions = Vec::new();
        if !self.list.is_empty() {
            actions.extend([BrowseAction::View, BrowseAction::Edit, BrowseAction::Delete]);
        }
        actions.push(BrowseAction::Add);
        if self.list.has_next() {
            actions.push(BrowseAction::NextPage);
        }
        if self.list.has_previous() {
            actions.push(BrowseAction::PreviousPage);
        }
        if self.list.page_count() > 1 {
            actions.push(BrowseAction::GoToPage);
        }
        actions.extend([BrowseAction::Refresh, BrowseAction::Quit]);
        actions
    }

    fn render_list(&self) {
        output::section("User List");
        if self.list.is_empty() {
            output::info("No users found.");
            return;
        }
        output::block(record_table(self.list.visible_page()).render());
        output::info(format!(
            "Page {} of {}",
            self.list.current_page(),
            self.list.page_count()
        ));
    }

    fn pick<I: Interaction>(&self, interaction: &mut I) -> Option<Record> {
        let page = self.list.visible_page();
        interaction
            .pick_record(page)
            .and_then(|idx| page.get(idx).cloned())
    }

    /// Drops the list state; it refetches from page 1 when shown again.
    fn leave_browsing(&mut self, record: Option<Record>, target: ActiveMode) {
        self.list.invalidate();
        match (target, record) {
            (ActiveMode::ViewingDetails, Some(record)) => self.coordinator.select_for_view(record),
            (_, record) => self.coordinator.select_for_edit(record),
        }
    }

    fn edit<I: Interaction>(&mut self, record: Option<Record>, interaction: &mut I) {
        let mut form = RecordFormController::new(record);
        output::section(match form.mode() {
            FormMode::Create => "Add User",
            FormMode::Update => "Edit User",
        });

        loop {
            if !prompt_fields(&mut form, interaction) {
                debug!("form cancelled");
                self.coordinator.dismiss();
                return;
            }

            match interaction.confirm_submit(&summary_lines(&form)) {
                ConfirmationResponse::Confirm => {}
                ConfirmationResponse::Back => continue,
                ConfirmationResponse::Cancel => {
                    self.coordinator.dismiss();
                    return;
                }
            }

            let event = form.submit(&self.transport);
            interaction.show_notifications(form.take_notifications());
            for (field, error) in form.errors() {
                output::warning(format!("{field}: {error}"));
            }
            if let Some(FormEvent::Saved(_)) = event {
                self.list.handle(MutationEvent::Saved, &self.transport);
                interaction.show_notifications(self.list.take_notifications());
                self.coordinator.on_saved();
                return;
            }
        }
    }

    fn details<I: Interaction>(&mut self, record: Record, interaction: &mut I) {
        let view = record_details(&record);
        output::block(view.render());
        match interaction.details_action(&view) {
            DetailsAction::Edit => self.coordinator.select_for_edit(Some(record)),
            DetailsAction::Back => self.coordinator.dismiss(),
        }
    }
}

/// Walks every editable field once. Invalid answers are re-prompted with
/// their error. Returns `false` when the user cancels.
fn prompt_fields<I: Interaction>(form: &mut RecordFormController, interaction: &mut I) -> bool {
    for descriptor in schema(form.mode()) {
        loop {
            let context = PromptContext {
                field: descriptor.field,
                label: descriptor.label,
                required: descriptor.required,
                secret: descriptor.secret,
                current: if descriptor.secret {
                    ""
                } else {
                    form.value(descriptor.field)
                },
                error: form.error(descriptor.field),
            };
            match interaction.prompt_field(&context) {
                PromptResponse::Value(value) => {
                    form.on_field_change(descriptor.field, value);
                    if form.error(descriptor.field).is_none() {
                        break;
                    }
                }
                PromptResponse::Keep => break,
                PromptResponse::Cancel => return false,
            }
        }
    }
    true
}

fn summary_lines(form: &RecordFormController) -> Vec<String> {
    schema(form.mode())
        .into_iter()
        .map(|descriptor| {
            let value = form.value(descriptor.field);
            let shown = if descriptor.secret {
                "*".repeat(value.chars().count())
            } else if value.trim().is_empty() {
                "(unchanged)".to_string()
            } else {
                value.to_string()
            };
            format!("{}: {}", descriptor.label, shown)
        })
        .collect()
}
