//! Top-level view selection.
//!
//! The coordinator is an explicit state value. Every transition is a pure
//! function of `(state, event)`, and the form and list controllers never talk
//! to each other directly: returning to [`ViewState::Browsing`] is what makes
//! the list refetch.

use tracing::debug;

use crate::domain::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveMode {
    Browsing,
    Editing,
    ViewingDetails,
}

/// Which view is active and which record it concerns. Details always carry a
/// record; editing carries one only for updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Browsing,
    Editing(Option<Record>),
    ViewingDetails(Record),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Open the form; `None` creates a new user.
    SelectForEdit(Option<Record>),
    SelectForView(Record),
    /// The form saved successfully.
    Saved,
    /// The user left the current view without saving.
    Dismissed,
}

impl ViewState {
    pub fn apply(self, event: ViewEvent) -> ViewState {
        match event {
            ViewEvent::SelectForEdit(record) => ViewState::Editing(record),
            ViewEvent::SelectForView(record) => ViewState::ViewingDetails(record),
            ViewEvent::Saved | ViewEvent::Dismissed => ViewState::Browsing,
        }
    }

    pub fn active_mode(&self) -> ActiveMode {
        match self {
            ViewState::Browsing => ActiveMode::Browsing,
            ViewState::Editing(_) => ActiveMode::Editing,
            ViewState::ViewingDetails(_) => ActiveMode::ViewingDetails,
        }
    }

    pub fn selected_record(&self) -> Option<&Record> {
        match self {
            ViewState::Browsing => None,
            ViewState::Editing(record) => record.as_ref(),
            ViewState::ViewingDetails(record) => Some(record),
        }
    }
}

/// Holds the current [`ViewState`] and applies transitions to it.
#[derive(Debug, Default)]
pub struct ViewCoordinator {
    state: ViewState,
}

impl ViewCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn active_mode(&self) -> ActiveMode {
        self.state.active_mode()
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.state.selected_record()
    }

    pub fn dispatch(&mut self, event: ViewEvent) -> &ViewState {
        let previous = std::mem::take(&mut self.state);
        self.state = previous.apply(event);
        debug!(mode = ?self.state.active_mode(), "view changed");
        &self.state
    }

    pub fn select_for_edit(&mut self, record: Option<Record>) {
        self.dispatch(ViewEvent::SelectForEdit(record));
    }

    pub fn select_for_view(&mut self, record: Record) {
        self.dispatch(ViewEvent::SelectForView(record));
    }

    pub fn on_saved(&mut self) {
        self.dispatch(ViewEvent::Saved);
    }

    pub fn dismiss(&mut self) {
        self.dispatch(ViewEvent::Dismissed);
    }
}
