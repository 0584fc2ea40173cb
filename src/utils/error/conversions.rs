//! Type conversions into FixzitError

use super::types::FixzitError;

impl From<bson::ser::Error> for FixzitError {
    fn from(err: bson::ser::Error) -> Self {
        FixzitError::Storage(format!("Failed to encode document: {}", err))
    }
}

impl From<bson::de::Error> for FixzitError {
    fn from(err: bson::de::Error) -> Self {
        FixzitError::Storage(format!("Failed to decode document: {}", err))
    }
}

impl From<bson::extjson::de::Error> for FixzitError {
    fn from(err: bson::extjson::de::Error) -> Self {
        FixzitError::Storage(format!("Invalid extended JSON: {}", err))
    }
}

impl From<regex::Error> for FixzitError {
    fn from(err: regex::Error) -> Self {
        FixzitError::BadRequest(format!("Invalid pattern: {}", err))
    }
}
