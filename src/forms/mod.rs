//! The user form: validation schema plus the create/update controller.

pub mod controller;
pub mod schema;

pub use controller::{FormEvent, RecordFormController, SubmitRequest, SubmitStatus, SubmitStep};
pub use schema::{
    schema, validate, Field, FieldDescriptor, FieldErrors, FieldValues, FormMode, Validation,
    ValidationError,
};
