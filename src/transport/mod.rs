//! Typed access to the remote user CRUD service.
//!
//! Each operation is a single round trip: no retry, no caching, and no local
//! state is touched. Callers decide when to refetch.

pub mod http;
pub mod memory;

pub use http::HttpTransport;
pub use memory::{InMemoryTransport, TransportCall};

use crate::domain::{CreationRequest, Record, RecordId, UpdateRequest};
use crate::errors::ClientError;

/// Operations exposed by the service under `/users`.
pub trait RecordTransport {
    fn list(&self) -> Result<Vec<Record>, ClientError>;
    fn get(&self, id: &RecordId) -> Result<Record, ClientError>;
    fn create(&self, request: &CreationRequest) -> Result<Record, ClientError>;
    fn update(&self, id: &RecordId, request: &UpdateRequest) -> Result<Record, ClientError>;
    fn delete(&self, id: &RecordId) -> Result<(), ClientError>;
}

/// Operation names, used for logging and for priming failures in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}
