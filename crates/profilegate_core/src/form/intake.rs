//! Intake form state machine.
//!
//! # Invariants
//! - States are `Idle`, `Invalid(errors)` and `Valid`.
//! - `Valid` is reached only after the identity was written to the store.
//! - Only field names are logged, never field values.

use crate::logging::redact;
use crate::model::identity::{Identity, IdentityField, ValidationErrorSet};
use crate::nav::route::Route;
use crate::store::identity_store::IdentityStore;
use crate::store::kv::{KeyValueStore, StoreResult};
use log::{info, warn};

/// Validation state of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Invalid(ValidationErrorSet),
    Valid,
}

/// Keys the form reacts to; only Enter has behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

/// Discrete inputs driving the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    FieldChanged { field: IdentityField, value: String },
    KeyPressed { field: IdentityField, key: Key },
    SubmitRequested,
}

/// Result of feeding one event into the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Event had no submit semantics.
    None,
    /// Identity persisted; caller should navigate to `navigate_to`.
    Accepted {
        identity: Identity,
        navigate_to: Route,
    },
    /// At least one field failed; the error banner should be raised.
    Rejected(ValidationErrorSet),
}

/// Working state of the intake form.
#[derive(Debug, Clone)]
pub struct IntakeForm {
    values: Identity,
    state: FormState,
}

impl IntakeForm {
    /// Mounts the form, pre-filling any identity already persisted.
    ///
    /// An unreadable persisted record is logged and ignored so the user can
    /// overwrite it.
    pub fn mount<S: KeyValueStore>(store: &IdentityStore<S>) -> Self {
        let values = match store.load() {
            Ok(Some(identity)) => {
                info!("event=intake_mount module=form status=ok prefilled=true");
                identity
            }
            Ok(None) => {
                info!("event=intake_mount module=form status=ok prefilled=false");
                Identity::default()
            }
            Err(err) => {
                warn!(
                    "event=intake_mount module=form status=error error={}",
                    redact(&err.to_string())
                );
                Identity::default()
            }
        };

        Self {
            values,
            state: FormState::Idle,
        }
    }

    pub fn values(&self) -> &Identity {
        &self.values
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Current per-field flags; all clear unless the form is `Invalid`.
    pub fn errors(&self) -> ValidationErrorSet {
        match self.state {
            FormState::Invalid(errors) => errors,
            FormState::Idle | FormState::Valid => ValidationErrorSet::default(),
        }
    }

    /// Dispatches one event.
    pub fn handle<S: KeyValueStore>(
        &mut self,
        event: FormEvent,
        store: &IdentityStore<S>,
    ) -> StoreResult<SubmitOutcome> {
        match event {
            FormEvent::FieldChanged { field, value } => {
                self.update_field(field, value);
                Ok(SubmitOutcome::None)
            }
            FormEvent::KeyPressed {
                key: Key::Enter, ..
            }
            | FormEvent::SubmitRequested => self.validate_and_submit(store),
            FormEvent::KeyPressed {
                key: Key::Other, ..
            } => Ok(SubmitOutcome::None),
        }
    }

    /// Assigns one field; error flags are left as they are.
    pub fn update_field(&mut self, field: IdentityField, value: impl Into<String>) {
        *self.values.field_mut(field) = value.into();
        if self.state == FormState::Valid {
            self.state = FormState::Idle;
        }
    }

    /// Validates all fields and persists the identity when they all pass.
    ///
    /// # Errors
    /// - Returns a store error when the valid identity cannot be written; the
    ///   form then stays `Idle` so the user can retry.
    pub fn validate_and_submit<S: KeyValueStore>(
        &mut self,
        store: &IdentityStore<S>,
    ) -> StoreResult<SubmitOutcome> {
        let errors = self.values.validate();

        if !errors.is_empty() {
            let fields = errors
                .failing_fields()
                .into_iter()
                .map(IdentityField::as_str)
                .collect::<Vec<_>>()
                .join(",");
            info!("event=intake_submit module=form status=rejected fields={fields}");
            self.state = FormState::Invalid(errors);
            return Ok(SubmitOutcome::Rejected(errors));
        }

        if let Err(err) = store.save(&self.values) {
            warn!(
                "event=intake_submit module=form status=error error={}",
                redact(&err.to_string())
            );
            self.state = FormState::Idle;
            return Err(err);
        }

        info!("event=intake_submit module=form status=ok");
        self.state = FormState::Valid;
        Ok(SubmitOutcome::Accepted {
            identity: self.values.clone(),
            navigate_to: Route::browse_after_submit(),
        })
    }

    /// Clears every field flag at once (error banner dismissal).
    pub fn clear_errors(&mut self) {
        if matches!(self.state, FormState::Invalid(_)) {
            self.state = FormState::Idle;
        }
    }
}
