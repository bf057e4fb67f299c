use thiserror::Error;

use crate::constants::ARRAY_SOURCE_MESSAGE;
use crate::type_key::TypeKey;

#[derive(Error, Debug)]
pub enum MapperError {
    #[error("Adding mapping failed: the mapping key already added (sourceType: {source_key}, destinationType: {destination_key})")]
    DuplicateMapping {
        source_key: TypeKey,
        destination_key: TypeKey,
    },

    #[error("A mapping for types not registered (sourceType: {source_key}, destinationType: {destination_key})")]
    UnregisteredMapping {
        source_key: TypeKey,
        destination_key: TypeKey,
    },

    #[error("{}", ARRAY_SOURCE_MESSAGE)]
    InvalidSourceKind,

    #[error("Mapping (sourceType: {source_key}, destinationType: {destination_key}) converts {expected}, but was called with {found}")]
    ConversionTypeMismatch {
        source_key: TypeKey,
        destination_key: TypeKey,
        expected: String,
        found: String,
    },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MapperError>;
