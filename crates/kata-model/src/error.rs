use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("value id must not be empty")]
    EmptyValueId,
    #[error("value id {0:?} collides with the unselected sentinel")]
    SentinelValueId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
