use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::{Operation, RecordTransport};
use crate::domain::{CreationRequest, Record, RecordId, UpdateRequest};
use crate::errors::ClientError;

/// Default service location used when no configuration overrides it.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/crud";

const USERS_SEGMENT: &str = "users";

/// Blocking HTTP implementation of [`RecordTransport`].
///
/// The underlying client has no request timeout: a hung request keeps the
/// caller waiting until the service answers or the user quits.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|err| {
                ClientError::transport(format!("failed to build HTTP client: {err}"))
            })?;
        Ok(Self { base_url, client })
    }

    /// Parses `base_url` (e.g. `http://localhost:8080/crud`) and builds a client.
    pub fn parse(base_url: &str) -> Result<Self, ClientError> {
        let url = Url::parse(base_url).map_err(|err| {
            ClientError::transport(format!("invalid base URL `{base_url}`: {err}"))
        })?;
        Self::new(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn users_url(&self, id: Option<&RecordId>) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ClientError::transport(format!("base URL `{}` cannot hold a path", self.base_url))
            })?;
            segments.pop_if_empty().push(USERS_SEGMENT);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    fn send(
        &self,
        operation: Operation,
        method: Method,
        id: Option<&RecordId>,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, ClientError> {
        let url = self.users_url(id)?;
        debug!(operation = operation.as_str(), %method, path = url.path(), "sending request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().map_err(|err| {
            warn!(operation = operation.as_str(), error = %err, "request failed");
            ClientError::from(err)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        let error = classify_failure(operation, status, id, body);
        warn!(
            operation = operation.as_str(),
            status = status.as_u16(),
            error = %error,
            "request rejected"
        );
        Err(error)
    }

    fn decode<T: DeserializeOwned>(
        operation: Operation,
        response: Response,
    ) -> Result<T, ClientError> {
        response.json::<T>().map_err(|err| {
            warn!(operation = operation.as_str(), error = %err, "malformed response body");
            ClientError::transport(format!("malformed {} response: {err}", operation.as_str()))
        })
    }

    fn encode<T: serde::Serialize>(payload: &T) -> Result<serde_json::Value, ClientError> {
        serde_json::to_value(payload)
            .map_err(|err| ClientError::transport(format!("failed to encode request: {err}")))
    }
}

/// Maps a non-success status onto the error taxonomy for `operation`.
pub fn classify_failure(
    operation: Operation,
    status: StatusCode,
    id: Option<&RecordId>,
    body: String,
) -> ClientError {
    let addresses_record = matches!(
        operation,
        Operation::Get | Operation::Update | Operation::Delete
    );
    let carries_payload = matches!(operation, Operation::Create | Operation::Update);

    if status == StatusCode::NOT_FOUND && addresses_record {
        return ClientError::not_found(id.map(RecordId::to_string).unwrap_or_default());
    }
    if status.is_client_error() && carries_payload {
        return ClientError::rejected(status.as_u16(), body);
    }
    ClientError::transport(format!(
        "{} returned unexpected status {}",
        operation.as_str(),
        status
    ))
}

impl RecordTransport for HttpTransport {
    fn list(&self) -> Result<Vec<Record>, ClientError> {
        let response = self.send(Operation::List, Method::GET, None, None)?;
        Self::decode(Operation::List, response)
    }

    fn get(&self, id: &RecordId) -> Result<Record, ClientError> {
        let response = self.send(Operation::Get, Method::GET, Some(id), None)?;
        Self::decode(Operation::Get, response)
    }

    fn create(&self, request: &CreationRequest) -> Result<Record, ClientError> {
        let body = Self::encode(request)?;
        let response = self.send(Operation::Create, Method::POST, None, Some(&body))?;
        Self::decode(Operation::Create, response)
    }

    fn update(&self, id: &RecordId, request: &UpdateRequest) -> Result<Record, ClientError> {
        let body = Self::encode(request)?;
        let response = self.send(Operation::Update, Method::PUT, Some(id), Some(&body))?;
        Self::decode(Operation::Update, response)
    }

    fn delete(&self, id: &RecordId) -> Result<(), ClientError> {
        self.send(Operation::Delete, Method::DELETE, Some(id), None)?;
        Ok(())
    }
}
