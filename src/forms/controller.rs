use tracing::{debug, info, warn};

use super::schema::{
    parse_form_date, schema, validate, validate_field, Field, FieldErrors, FieldValues, FormMode,
    ValidationError,
};
use crate::domain::record::DATE_FORMAT;
use crate::domain::{CreationRequest, Record, RecordId, UpdateRequest};
use crate::errors::ClientError;
use crate::notify::{Notification, Notifications};
use crate::transport::RecordTransport;

const SAVE_FAILED: &str = "Error saving user. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Submitting,
}

/// The request a valid form turns into, tagged by mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    Create(CreationRequest),
    Update { id: RecordId, request: UpdateRequest },
}

/// Result of asking the form to start a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStep {
    /// A submission is already in flight; the trigger was ignored.
    Busy,
    /// Local validation failed; nothing should be sent.
    Invalid(FieldErrors),
    /// The form is now `Submitting` and this request must be sent.
    Ready(SubmitRequest),
}

/// Domain events emitted to the view coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Saved(Record),
}

/// Owns one create-or-update form: values, field errors and the submit
/// lifecycle `Idle -> Submitting -> Idle`.
///
/// Only one submission may be in flight per instance; a second trigger while
/// `Submitting` is a no-op.
#[derive(Debug)]
pub struct RecordFormController {
    mode: FormMode,
    original: Option<Record>,
    values: FieldValues,
    errors: FieldErrors,
    status: SubmitStatus,
    notifications: Notifications,
}

impl RecordFormController {
    /// Opens the form. Supplying a record selects update mode with its
    /// editable fields pre-filled; `None` opens an empty create form.
    pub fn new(existing: Option<Record>) -> Self {
        let mode = if existing.is_some() {
            FormMode::Update
        } else {
            FormMode::Create
        };
        let values = existing.as_ref().map(prefill).unwrap_or_default();
        Self {
            mode,
            original: existing,
            values,
            errors: FieldErrors::new(),
            status: SubmitStatus::Idle,
            notifications: Notifications::default(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn editable_fields(&self) -> Vec<Field> {
        schema(self.mode)
            .into_iter()
            .map(|descriptor| descriptor.field)
            .collect()
    }

    pub fn is_editable(&self, field: Field) -> bool {
        self.editable_fields().contains(&field)
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn error(&self, field: Field) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    /// Stores `value`, drops the field's previous error and re-checks it for
    /// immediate feedback. Fields outside the editable set are ignored.
    pub fn on_field_change(&mut self, field: Field, value: impl Into<String>) {
        if !self.is_editable(field) {
            debug!(field = field.key(), "ignoring change to non-editable field");
            return;
        }
        let value = value.into();
        self.errors.remove(&field);
        if let Err(err) = validate_field(self.mode, field, &value) {
            self.errors.insert(field, err);
        }
        self.values.insert(field, value);
    }

    /// Validates and, when valid, moves to `Submitting` and hands back the
    /// request to send.
    pub fn begin_submit(&mut self) -> SubmitStep {
        if self.status == SubmitStatus::Submitting {
            debug!("submit ignored: already submitting");
            return SubmitStep::Busy;
        }

        let outcome = validate(self.mode, &self.values);
        if !outcome.valid {
            debug!(errors = outcome.errors.len(), "form invalid; submit blocked");
            self.errors = outcome.errors.clone();
            return SubmitStep::Invalid(outcome.errors);
        }

        match self.build_request() {
            Ok(request) => {
                self.errors.clear();
                self.status = SubmitStatus::Submitting;
                debug!(mode = ?self.mode, "form submitting");
                SubmitStep::Ready(request)
            }
            Err(errors) => {
                self.errors = errors.clone();
                SubmitStep::Invalid(errors)
            }
        }
    }

    /// Applies the transport's answer to an in-flight submission. Returns
    /// `Saved` on success. Completions arriving while idle are ignored.
    pub fn complete_submit(&mut self, result: Result<Record, ClientError>) -> Option<FormEvent> {
        if self.status != SubmitStatus::Submitting {
            debug!("stale submit completion ignored");
            return None;
        }
        self.status = SubmitStatus::Idle;
        self.values.remove(&Field::Password);

        match result {
            Ok(record) => {
                let message = match self.mode {
                    FormMode::Create => "User created successfully",
                    FormMode::Update => "User updated successfully",
                };
                info!(user = %record.display_label(), mode = ?self.mode, "user saved");
                self.notifications.push(Notification::success(message));
                self.values.clear();
                self.errors.clear();
                Some(FormEvent::Saved(record))
            }
            Err(err) => {
                warn!(error = %err, mode = ?self.mode, "saving user failed");
                self.notifications.push(Notification::error(SAVE_FAILED));
                None
            }
        }
    }

    /// Runs a whole submission against `transport`.
    pub fn submit<T>(&mut self, transport: &T) -> Option<FormEvent>
    where
        T: RecordTransport + ?Sized,
    {
        let request = match self.begin_submit() {
            SubmitStep::Ready(request) => request,
            SubmitStep::Busy | SubmitStep::Invalid(_) => return None,
        };
        let result = match &request {
            SubmitRequest::Create(create) => transport.create(create),
            SubmitRequest::Update { id, request } => transport.update(id, request),
        };
        self.complete_submit(result)
    }

    fn build_request(&self) -> Result<SubmitRequest, FieldErrors> {
        let text = |field: Field| self.value(field).trim().to_string();
        let dob_input = text(Field::DateOfBirth);

        match &self.original {
            None => {
                let dob = parse_form_date(&dob_input).ok_or_else(date_error)?;
                Ok(SubmitRequest::Create(CreationRequest {
                    username: text(Field::Username),
                    password: self.value(Field::Password).to_string(),
                    first_name: text(Field::FirstName),
                    last_name: text(Field::LastName),
                    dob,
                }))
            }
            Some(original) => {
                let changed = |field: Field, current: &str| {
                    let value = text(field);
                    (!value.is_empty() && value != current).then_some(value)
                };
                let dob = if dob_input.is_empty() {
                    None
                } else {
                    let parsed = parse_form_date(&dob_input).ok_or_else(date_error)?;
                    (parsed != original.dob).then_some(parsed)
                };
                Ok(SubmitRequest::Update {
                    id: original.id.clone(),
                    request: UpdateRequest {
                        first_name: changed(Field::FirstName, &original.first_name),
                        last_name: changed(Field::LastName, &original.last_name),
                        dob,
                    },
                })
            }
        }
    }
}

fn prefill(record: &Record) -> FieldValues {
    FieldValues::from([
        (Field::FirstName, record.first_name.clone()),
        (Field::LastName, record.last_name.clone()),
        (Field::DateOfBirth, record.dob.format(DATE_FORMAT).to_string()),
    ])
}

fn date_error() -> FieldErrors {
    FieldErrors::from([(
        Field::DateOfBirth,
        ValidationError::new("Use YYYY-MM-DD format"),
    )])
}
