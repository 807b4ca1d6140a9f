//! Declarative validation rules shared by the create and update forms.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::domain::record::DATE_FORMAT;

/// Which request the form will produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

/// Every input the user form can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Username,
    Password,
    FirstName,
    LastName,
    DateOfBirth,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Username,
        Field::Password,
        Field::FirstName,
        Field::LastName,
        Field::DateOfBirth,
    ];

    /// Wire/JSON name of the field.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Password => "password",
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::DateOfBirth => "dob",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Username => "Username",
            Field::Password => "Password",
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::DateOfBirth => "Date of Birth",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Built-in checks applied to raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Text,
    Date,
}

impl Validator {
    fn validate(&self, label: &str, required: bool, input: &str) -> Result<(), ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return if required {
                Err(ValidationError::new(format!("{label} is required")))
            } else {
                Ok(())
            };
        }
        match self {
            Validator::Text => Ok(()),
            Validator::Date => parse_form_date(trimmed)
                .map(|_| ())
                .ok_or_else(|| ValidationError::new("Use YYYY-MM-DD format")),
        }
    }
}

/// Declarative description of a single form field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub field: Field,
    pub label: &'static str,
    pub required: bool,
    /// Input must be masked and never echoed back.
    pub secret: bool,
    pub validator: Validator,
}

impl FieldDescriptor {
    fn new(field: Field, validator: Validator) -> Self {
        Self {
            field,
            label: field.label(),
            required: true,
            secret: false,
            validator,
        }
    }

    fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn check(&self, input: &str) -> Result<(), ValidationError> {
        self.validator.validate(self.label, self.required, input)
    }
}

/// Ordered fields editable in `mode`. Update mode never exposes the
/// username or password.
pub fn schema(mode: FormMode) -> Vec<FieldDescriptor> {
    match mode {
        FormMode::Create => vec![
            FieldDescriptor::new(Field::Username, Validator::Text),
            FieldDescriptor::new(Field::Password, Validator::Text).secret(),
            FieldDescriptor::new(Field::FirstName, Validator::Text),
            FieldDescriptor::new(Field::LastName, Validator::Text),
            FieldDescriptor::new(Field::DateOfBirth, Validator::Date),
        ],
        FormMode::Update => vec![
            FieldDescriptor::new(Field::FirstName, Validator::Text).optional(),
            FieldDescriptor::new(Field::LastName, Validator::Text).optional(),
            FieldDescriptor::new(Field::DateOfBirth, Validator::Date).optional(),
        ],
    }
}

pub type FieldValues = BTreeMap<Field, String>;
pub type FieldErrors = BTreeMap<Field, ValidationError>;

/// Outcome of validating a whole form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub errors: FieldErrors,
}

/// Validates every field of `mode` against `values`. Missing entries count as
/// blank input. Pure: never performs I/O.
pub fn validate(mode: FormMode, values: &FieldValues) -> Validation {
    let errors: FieldErrors = schema(mode)
        .iter()
        .filter_map(|descriptor| {
            let raw = values
                .get(&descriptor.field)
                .map(String::as_str)
                .unwrap_or("");
            descriptor
                .check(raw)
                .err()
                .map(|err| (descriptor.field, err))
        })
        .collect();
    Validation {
        valid: errors.is_empty(),
        errors,
    }
}

/// Checks a single field, used for feedback while typing. Fields outside the
/// schema for `mode` are always accepted.
pub fn validate_field(mode: FormMode, field: Field, value: &str) -> Result<(), ValidationError> {
    schema(mode)
        .iter()
        .find(|descriptor| descriptor.field == field)
        .map_or(Ok(()), |descriptor| descriptor.check(value))
}

/// Strict `YYYY-MM-DD` parse used for form input.
pub fn parse_form_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}
