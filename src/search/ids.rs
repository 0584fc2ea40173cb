//! Identifier normalisation
//!
//! Ids that parse as 24-hex ObjectIds are stored natively; anything else
//! (legacy string ids, UUIDs) is compared as a plain string.

use bson::Bson;
use bson::oid::ObjectId;

/// Convert an id to the store's native id type when possible
pub fn normalize_id(id: &str) -> Bson {
    let id = id.trim();
    match ObjectId::parse_str(id) {
        Ok(oid) => Bson::ObjectId(oid),
        Err(_) => Bson::String(id.to_string()),
    }
}

/// Normalise a list of ids, dropping blanks
pub fn normalize_ids<I, S>(ids: I) -> Vec<Bson>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter()
        .filter(|id| !id.as_ref().trim().is_empty())
        .map(|id| normalize_id(id.as_ref()))
        .collect()
}
