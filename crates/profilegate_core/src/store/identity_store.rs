//! Typed identity persistence over a [`KeyValueStore`].
//!
//! # Invariants
//! - Writes overwrite the previous record verbatim (no merge).
//! - Presence follows the raw stored value: an empty string counts as absent.

use crate::model::identity::Identity;
use crate::store::kv::{KeyValueStore, StoreError, StoreResult};
use log::{info, warn};

/// Persisted key holding the JSON-encoded identity.
pub const USER_DETAILS_KEY: &str = "userDetails";

/// Identity store wrapper; owns the injected key-value capability.
pub struct IdentityStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> IdentityStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Underlying key-value capability.
    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Returns whether any identity value is persisted.
    ///
    /// Decoding is not attempted; an unreadable record still counts as
    /// present, matching what the gate can observe.
    pub fn is_present(&self) -> StoreResult<bool> {
        Ok(self
            .kv
            .get(USER_DETAILS_KEY)?
            .is_some_and(|raw| !raw.is_empty()))
    }

    /// Loads and decodes the persisted identity, if any.
    pub fn load(&self) -> StoreResult<Option<Identity>> {
        let Some(raw) = self.kv.get(USER_DETAILS_KEY)? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Decode {
                key: USER_DETAILS_KEY.to_string(),
                source,
            })
    }

    /// Persists `identity`, replacing any previous value.
    pub fn save(&self, identity: &Identity) -> StoreResult<()> {
        let encoded = serde_json::to_string(identity).map_err(StoreError::Encode)?;
        self.kv.set(USER_DETAILS_KEY, &encoded)?;
        info!("event=identity_save module=store status=ok");
        Ok(())
    }

    /// Removes the persisted identity.
    ///
    /// Core flows never call this; it exists for hosts that reset the profile.
    pub fn clear(&self) -> StoreResult<()> {
        self.kv.clear(USER_DETAILS_KEY)?;
        warn!("event=identity_clear module=store status=ok");
        Ok(())
    }
}
