//! Protected field paths and document field helpers

use super::encryption::FieldCipher;
use super::masking::{MaskKind, mask};
use crate::utils::error::Result;
use bson::{Bson, Document};
use tracing::warn;

/// A document path holding personal or financial data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectedField {
    pub path: &'static str,
    pub kind: MaskKind,
}

const fn field(path: &'static str, kind: MaskKind) -> ProtectedField {
    ProtectedField { path, kind }
}

const EMPLOYEE_FIELDS: &[ProtectedField] = &[
    field("personal.nationalId", MaskKind::NationalId),
    field("personal.passportNumber", MaskKind::NationalId),
    field("bankDetails.iban", MaskKind::Iban),
    field("bankDetails.accountNumber", MaskKind::Generic),
    field("compensation.baseSalary", MaskKind::Generic),
];

const VENDOR_FIELDS: &[ProtectedField] = &[
    field("bankDetails.iban", MaskKind::Iban),
    field("bankDetails.accountNumber", MaskKind::Generic),
    field("taxNumber", MaskKind::Generic),
];

const TENANT_FIELDS: &[ProtectedField] = &[field("nationalId", MaskKind::NationalId)];

const INVOICE_FIELDS: &[ProtectedField] = &[field("payment.bankAccount", MaskKind::Iban)];

/// Protected paths of a collection; empty for collections without PII
pub fn protected_fields(collection: &str) -> &'static [ProtectedField] {
    match collection {
        "employees" => EMPLOYEE_FIELDS,
        "vendors" => VENDOR_FIELDS,
        "tenants" => TENANT_FIELDS,
        "invoices" => INVOICE_FIELDS,
        _ => &[],
    }
}

/// Mutable access to the value at a dotted path through nested documents
pub fn get_path_mut<'a>(document: &'a mut Document, path: &str) -> Option<&'a mut Bson> {
    match path.split_once('.') {
        None => document.get_mut(path),
        Some((head, rest)) => match document.get_mut(head)? {
            Bson::Document(inner) => get_path_mut(inner, rest),
            _ => None,
        },
    }
}

/// Text form of a scalar value eligible for encryption
fn scalar_text(value: &Bson) -> Option<String> {
    match value {
        Bson::String(text) => Some(text.clone()),
        Bson::Int32(n) => Some(n.to_string()),
        Bson::Int64(n) => Some(n.to_string()),
        Bson::Double(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Encrypt the values at `paths`, returning how many were changed
///
/// Numbers are encrypted in their text form. Missing paths and non-scalar
/// values are skipped.
pub fn encrypt_fields(
    cipher: &FieldCipher,
    document: &mut Document,
    paths: &[&str],
) -> Result<usize> {
    let mut changed = 0;
    for path in paths {
        let Some(value) = get_path_mut(document, path) else {
            continue;
        };
        let Some(text) = scalar_text(value) else {
            continue;
        };
        if FieldCipher::is_encrypted(&text) {
            continue;
        }
        *value = Bson::String(cipher.encrypt(&text)?);
        changed += 1;
    }
    Ok(changed)
}

/// Decrypt the values at `paths`, returning how many were changed
pub fn decrypt_fields(
    cipher: &FieldCipher,
    document: &mut Document,
    paths: &[&str],
) -> Result<usize> {
    let mut changed = 0;
    for path in paths {
        if let Some(Bson::String(text)) = get_path_mut(document, path) {
            if FieldCipher::is_encrypted(text) {
                *text = cipher.decrypt(text)?;
                changed += 1;
            }
        }
    }
    Ok(changed)
}

/// Decrypt protected fields for display
///
/// Values that fail to decrypt are masked completely.
pub fn reveal_fields(cipher: &FieldCipher, document: &mut Document, fields: &[ProtectedField]) {
    for protected in fields {
        let Some(Bson::String(text)) = get_path_mut(document, protected.path) else {
            continue;
        };
        if !FieldCipher::is_encrypted(text) {
            continue;
        }

        *text = match cipher.decrypt(text) {
            Ok(plain) => plain,
            Err(e) => {
                warn!(path = protected.path, "Protected field could not be decrypted: {}", e);
                "*".repeat(8)
            }
        };
    }
}

/// Decrypt and mask protected fields for display
///
/// Values that fail to decrypt are masked completely.
pub fn mask_fields(cipher: &FieldCipher, document: &mut Document, fields: &[ProtectedField]) {
    for protected in fields {
        let Some(value) = get_path_mut(document, protected.path) else {
            continue;
        };
        let Some(text) = scalar_text(value) else {
            continue;
        };

        let masked = match cipher.decrypt(&text) {
            Ok(plain) => mask(protected.kind, &plain),
            Err(e) => {
                warn!(path = protected.path, "Protected field could not be decrypted: {}", e);
                "*".repeat(8)
            }
        };
        *value = Bson::String(masked);
    }
}
