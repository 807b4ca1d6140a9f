pub mod record;

pub use record::{CreationRequest, Record, RecordId, UpdateRequest};
