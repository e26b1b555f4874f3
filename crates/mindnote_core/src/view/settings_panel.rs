//! API-key settings panel view model.

use crate::reflection::CredentialVault;
use crate::storage::{KeyValueStore, StorageResult};

const MASK_CHAR: char = '•';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Stored,
    /// Draft was blank after trimming; nothing was written.
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiKeyPanel {
    draft: String,
    revealed: bool,
}

impl ApiKeyPanel {
    /// Opens the panel pre-filled with the stored key.
    pub fn open<S: KeyValueStore>(vault: &CredentialVault<S>) -> Self {
        Self {
            draft: vault.credential().unwrap_or_default().to_string(),
            revealed: false,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, value: impl Into<String>) {
        self.draft = value.into();
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn toggle_reveal(&mut self) {
        self.revealed = !self.revealed;
    }

    /// Draft as displayed: masked unless revealed.
    pub fn displayed_draft(&self) -> String {
        if self.revealed {
            self.draft.clone()
        } else {
            self.draft.chars().map(|_| MASK_CHAR).collect()
        }
    }

    /// Stores the trimmed draft when it is non-empty.
    pub fn save<S: KeyValueStore>(
        &mut self,
        vault: &mut CredentialVault<S>,
    ) -> StorageResult<SaveOutcome> {
        let trimmed = self.draft.trim();
        if trimmed.is_empty() {
            return Ok(SaveOutcome::Ignored);
        }
        vault.store(trimmed)?;
        self.draft = trimmed.to_string();
        Ok(SaveOutcome::Stored)
    }

    /// Removes the stored key and clears the draft.
    pub fn remove<S: KeyValueStore>(&mut self, vault: &mut CredentialVault<S>) -> StorageResult<()> {
        self.draft.clear();
        vault.clear()
    }
}
