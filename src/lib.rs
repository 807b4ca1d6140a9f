#![doc(test(attr(deny(warnings))))]

//! User Admin is a client for a remote user CRUD service: a typed transport,
//! a validated create/update form, a client-side paginated list cache and the
//! view coordination that ties them together, plus a terminal front end.

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod errors;
pub mod forms;
pub mod list;
pub mod notify;
pub mod transport;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("User Admin tracing initialized.");
    });
}
