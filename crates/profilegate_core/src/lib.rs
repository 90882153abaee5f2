//! Core logic for ProfileGate.
//! Identity intake, the session gate in front of the record browser, banner
//! sequencing and the fetch-then-filter list all live here; UI hosts only
//! render state and forward events.

pub mod app;
pub mod config;
pub mod db;
pub mod fetch;
pub mod form;
pub mod logging;
pub mod model;
pub mod nav;
pub mod notify;
pub mod search;
pub mod store;
pub mod view;

pub use app::{ActiveView, App, UnknownRouteError};
pub use config::{CoreConfig, DEFAULT_RECORDS_URL, PAGE_SIZE};
pub use fetch::http::HttpRecordSource;
pub use fetch::{
    run_fetch, FetchCompletion, FetchError, FetchResult, FetchTicket, RecordSource,
    StaticRecordSource,
};
pub use form::intake::{FormEvent, FormState, IntakeForm, Key, SubmitOutcome};
pub use logging::{
    active_config, default_log_level, init_logging, redact, LogConfig, LoggingError,
};
pub use model::identity::{Identity, IdentityField, ValidationErrorSet};
pub use model::record::ListRecord;
pub use nav::gate::{GateDecision, Redirect, GATE_ALERT_MESSAGE};
pub use nav::history::{History, HistoryEntry, NavState};
pub use nav::route::Route;
pub use notify::sequencer::{
    BannerSlot, DismissEffect, Notification, NotificationKind, NotificationSequencer,
};
pub use notify::{EpochMs, BANNER_DURATION_MS};
pub use search::filter::filter_records;
pub use store::identity_store::{IdentityStore, USER_DETAILS_KEY};
pub use store::kv::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};
pub use view::browse::{BrowseView, FetchState};
pub use view::pager::Page;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
