//! PII protection
//!
//! Field-level encryption at rest and masking for display of personal and
//! financial fields (national ids, bank details, salaries).

pub mod encryption;
pub mod fields;
pub mod masking;

pub use encryption::{ENCRYPTED_PREFIX, FieldCipher};
pub use fields::{
    ProtectedField, decrypt_fields, encrypt_fields, get_path_mut, mask_fields, protected_fields,
    reveal_fields,
};
pub use masking::{MaskKind, mask};

use crate::auth::actor::SessionActor;
use crate::config::SecurityConfig;
use crate::utils::error::Result;
use bson::Document;

/// Applies the PII policy to documents entering and leaving the service
#[derive(Debug, Clone)]
pub struct PiiGuard {
    cipher: FieldCipher,
    mask_results: bool,
}

impl PiiGuard {
    pub fn new(config: &SecurityConfig) -> Result<Self> {
        Ok(Self {
            cipher: FieldCipher::new(&config.pii_key)?,
            mask_results: config.mask_search_results,
        })
    }

    pub fn cipher(&self) -> &FieldCipher {
        &self.cipher
    }

    /// Encrypt a collection's protected fields before storage
    pub fn encrypt_document(&self, collection: &str, document: &mut Document) -> Result<usize> {
        let paths: Vec<&str> = protected_fields(collection)
            .iter()
            .map(|field| field.path)
            .collect();
        encrypt_fields(&self.cipher, document, &paths)
    }

    /// Prepare a stored document for an actor
    ///
    /// Super admins, and everyone when masking is disabled, see decrypted
    /// values; everyone else sees masked values. A value that cannot be
    /// decrypted is shown fully masked to both.
    pub fn prepare_for_display(
        &self,
        actor: &SessionActor,
        collection: &str,
        document: &mut Document,
    ) {
        let fields = protected_fields(collection);
        if fields.is_empty() {
            return;
        }

        if actor.is_super_admin() || !self.mask_results {
            reveal_fields(&self.cipher, document, fields);
        } else {
            mask_fields(&self.cipher, document, fields);
        }
    }
}
