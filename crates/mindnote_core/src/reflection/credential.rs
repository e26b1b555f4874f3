//! Stored reflection credential.
//!
//! # Invariants
//! - The in-memory copy mirrors the durable copy after every successful write.
//! - Reads (`has_credential`, `mode`) have no side effects.
//! - The credential value is never logged.

use crate::reflection::client::ReflectionMode;
use crate::storage::{KeyValueStore, StorageResult, CREDENTIAL_KEY};
use log::{error, info};

pub struct CredentialVault<S: KeyValueStore> {
    storage: S,
    credential: Option<String>,
}

impl<S: KeyValueStore> CredentialVault<S> {
    /// Reads the stored credential; read failures behave as "unconfigured".
    pub fn load(storage: S) -> Self {
        let credential = match storage.get(CREDENTIAL_KEY) {
            Ok(value) => value.filter(|value| !value.is_empty()),
            Err(err) => {
                error!("event=credential_load module=reflection status=error error={err}");
                None
            }
        };
        Self {
            storage,
            credential,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// Mode for the next reflection request.
    pub fn mode(&self) -> ReflectionMode {
        ReflectionMode::from_credential(self.credential())
    }

    /// Stores `credential`, overwriting any previous value.
    pub fn store(&mut self, credential: &str) -> StorageResult<()> {
        self.storage.set(CREDENTIAL_KEY, credential)?;
        self.credential = Some(credential.to_string());
        info!("event=credential_store module=reflection status=ok");
        Ok(())
    }

    /// Clears both the in-memory and the durable credential.
    ///
    /// A failed removal leaves the in-memory credential in place.
    pub fn clear(&mut self) -> StorageResult<()> {
        self.storage.remove(CREDENTIAL_KEY)?;
        self.credential = None;
        info!("event=credential_clear module=reflection status=ok");
        Ok(())
    }
}
