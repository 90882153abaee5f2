//! Remote record list fetching.
//!
//! # Responsibility
//! - Define the record source contract and its error taxonomy.
//! - Run one read and package the result as a completion bound to the
//!   view mount that requested it.
//!
//! # Invariants
//! - A completion carries the ticket of the mount that issued it; views
//!   drop completions whose ticket is stale.
//! - No retries happen here.

pub mod http;

use crate::model::record::ListRecord;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type FetchResult<T> = Result<T, FetchError>;

/// Remote read failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, TLS or timeout failure.
    Network(String),
    /// Server answered with a non-success status.
    Status(u16),
    /// Body was not a JSON array of records.
    Decode(String),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(message) => write!(f, "network error: {message}"),
            Self::Status(code) => write!(f, "unexpected HTTP status {code}"),
            Self::Decode(message) => write!(f, "invalid record payload: {message}"),
        }
    }
}

impl Error for FetchError {}

/// Source of the full record collection.
pub trait RecordSource {
    fn fetch_records(&self) -> FetchResult<Vec<ListRecord>>;
}

/// Identifies the browse-view mount that requested a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub(crate) mount_id: u64,
}

impl FetchTicket {
    pub fn mount_id(&self) -> u64 {
        self.mount_id
    }
}

/// Result of one fetch, ready to be applied to the requesting view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCompletion {
    pub ticket: FetchTicket,
    pub result: FetchResult<Vec<ListRecord>>,
}

/// Performs the single outbound read for `ticket`.
///
/// # Side effects
/// - Emits `records_fetch` start and outcome events with duration.
pub fn run_fetch<R: RecordSource + ?Sized>(source: &R, ticket: FetchTicket) -> FetchCompletion {
    let started_at = Instant::now();
    info!(
        "event=records_fetch module=fetch status=start mount_id={}",
        ticket.mount_id
    );

    let result = source.fetch_records();
    match &result {
        Ok(records) => info!(
            "event=records_fetch module=fetch status=ok mount_id={} count={} duration_ms={}",
            ticket.mount_id,
            records.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=records_fetch module=fetch status=error mount_id={} duration_ms={} error={}",
            ticket.mount_id,
            started_at.elapsed().as_millis(),
            err
        ),
    }

    FetchCompletion { ticket, result }
}

/// Fixed in-memory source, for hosts without network and for tests.
#[derive(Debug, Clone)]
pub struct StaticRecordSource {
    result: FetchResult<Vec<ListRecord>>,
}

impl StaticRecordSource {
    pub fn new(records: Vec<ListRecord>) -> Self {
        Self {
            result: Ok(records),
        }
    }

    pub fn failing(err: FetchError) -> Self {
        Self { result: Err(err) }
    }
}

impl RecordSource for StaticRecordSource {
    fn fetch_records(&self) -> FetchResult<Vec<ListRecord>> {
        self.result.clone()
    }
}
