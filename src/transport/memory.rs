use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use super::{Operation, RecordTransport};
use crate::domain::{CreationRequest, Record, RecordId, UpdateRequest};
use crate::errors::ClientError;

/// A request observed by [`InMemoryTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    List,
    Get(RecordId),
    /// Only the username is kept; the password never leaves the call.
    Create {
        username: String,
    },
    Update(RecordId, UpdateRequest),
    Delete(RecordId),
}

impl TransportCall {
    pub fn operation(&self) -> Operation {
        match self {
            TransportCall::List => Operation::List,
            TransportCall::Get(_) => Operation::Get,
            TransportCall::Create { .. } => Operation::Create,
            TransportCall::Update(..) => Operation::Update,
            TransportCall::Delete(_) => Operation::Delete,
        }
    }
}

#[derive(Default)]
struct MemoryState {
    records: Vec<Record>,
    calls: Vec<TransportCall>,
    failures: HashMap<Operation, VecDeque<ClientError>>,
}

/// Ordered, process-local stand-in for the remote service.
///
/// Behaves like the real service for the purposes of the client: ids are
/// assigned on create, usernames are unique, and unknown ids yield
/// [`ClientError::NotFound`]. Every call is recorded so callers can assert
/// which requests were issued.
#[derive(Default)]
pub struct InMemoryTransport {
    state: Mutex<MemoryState>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        let transport = Self::new();
        if let Ok(mut state) = transport.state.lock() {
            state.records = records;
        }
        transport
    }

    /// A small roster used by the CLI's `--demo` mode.
    pub fn demo() -> Self {
        let seed = [
            ("ada", "Ada", "Lovelace", (1815, 12, 10)),
            ("alan", "Alan", "Turing", (1912, 6, 23)),
            ("grace", "Grace", "Hopper", (1906, 12, 9)),
            ("linus", "Linus", "Torvalds", (1969, 12, 28)),
            ("barbara", "Barbara", "Liskov", (1939, 11, 7)),
            ("ken", "Ken", "Thompson", (1943, 2, 4)),
            ("margaret", "Margaret", "Hamilton", (1936, 8, 17)),
        ];
        let records = seed
            .iter()
            .filter_map(|(username, first, last, (y, m, d))| {
                NaiveDate::from_ymd_opt(*y, *m, *d).map(|dob| Record {
                    id: RecordId::new(Uuid::new_v4().to_string()),
                    username: (*username).to_string(),
                    first_name: (*first).to_string(),
                    last_name: (*last).to_string(),
                    dob,
                })
            })
            .collect();
        Self::with_records(records)
    }

    /// Makes the next call of `operation` fail with `error`.
    pub fn fail_next(&self, operation: Operation, error: ClientError) {
        if let Ok(mut state) = self.state.lock() {
            state.failures.entry(operation).or_default().push_back(error);
        }
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.state
            .lock()
            .map(|state| state.calls.clone())
            .unwrap_or_default()
    }

    pub fn calls_of(&self, operation: Operation) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    pub fn records(&self) -> Vec<Record> {
        self.state
            .lock()
            .map(|state| state.records.clone())
            .unwrap_or_default()
    }

    fn begin(&self, call: TransportCall) -> Result<MutexGuard<'_, MemoryState>, ClientError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ClientError::transport("in-memory store poisoned"))?;
        let operation = call.operation();
        debug!(operation = operation.as_str(), "in-memory request");
        state.calls.push(call);
        if let Some(error) = state
            .failures
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
        {
            return Err(error);
        }
        Ok(state)
    }
}

impl RecordTransport for InMemoryTransport {
    fn list(&self) -> Result<Vec<Record>, ClientError> {
        let state = self.begin(TransportCall::List)?;
        Ok(state.records.clone())
    }

    fn get(&self, id: &RecordId) -> Result<Record, ClientError> {
        let state = self.begin(TransportCall::Get(id.clone()))?;
        state
            .records
            .iter()
            .find(|record| &record.id == id)
            .cloned()
            .ok_or_else(|| ClientError::not_found(id.as_str()))
    }

    fn create(&self, request: &CreationRequest) -> Result<Record, ClientError> {
        let mut state = self.begin(TransportCall::Create {
            username: request.username.clone(),
        })?;
        if state
            .records
            .iter()
            .any(|record| record.username == request.username)
        {
            return Err(ClientError::rejected(
                409,
                format!("username `{}` already exists", request.username),
            ));
        }
        let record = Record {
            id: RecordId::new(Uuid::new_v4().to_string()),
            username: request.username.clone(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            dob: request.dob,
        };
        state.records.push(record.clone());
        Ok(record)
    }

    fn update(&self, id: &RecordId, request: &UpdateRequest) -> Result<Record, ClientError> {
        let mut state = self.begin(TransportCall::Update(id.clone(), request.clone()))?;
        let record = state
            .records
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or_else(|| ClientError::not_found(id.as_str()))?;
        request.apply_to(record);
        Ok(record.clone())
    }

    fn delete(&self, id: &RecordId) -> Result<(), ClientError> {
        let mut state = self.begin(TransportCall::Delete(id.clone()))?;
        let before = state.records.len();
        state.records.retain(|record| &record.id != id);
        if state.records.len() == before {
            return Err(ClientError::not_found(id.as_str()));
        }
        Ok(())
    }
}
