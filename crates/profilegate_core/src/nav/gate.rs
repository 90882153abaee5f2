//! Session gate protecting the browse route.

use crate::logging::redact;
use crate::nav::route::{Route, BROWSE_PATH};
use crate::store::identity_store::IdentityStore;
use crate::store::kv::KeyValueStore;
use log::{error, info};

/// Blocking informational alert raised when the gate redirects.
pub const GATE_ALERT_MESSAGE: &str = "Please provide your details before accessing this page";

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(Redirect),
}

/// Redirect instruction emitted when no identity is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
    /// Originating path, for "return to" behavior.
    pub from: String,
    pub alert: &'static str,
}

/// Evaluates the gate against the current store contents.
///
/// A store read failure is treated as "no identity": the gate fails closed.
pub fn evaluate<S: KeyValueStore>(store: &IdentityStore<S>) -> GateDecision {
    let present = match store.is_present() {
        Ok(present) => present,
        Err(err) => {
            error!(
                "event=gate_check module=nav status=error error={}",
                redact(&err.to_string())
            );
            false
        }
    };

    if present {
        return GateDecision::Allow;
    }

    info!("event=gate_check module=nav status=redirect from={BROWSE_PATH}");
    GateDecision::Redirect(Redirect {
        to: Route::Intake,
        from: BROWSE_PATH.to_string(),
        alert: GATE_ALERT_MESSAGE,
    })
}
