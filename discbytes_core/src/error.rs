use std::error::Error;
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreErrorKind {
    #[error("Index out of range")]
    IndexOutOfRange,
    #[error("Invalid length")]
    InvalidLength,
    #[error("Value out of range")]
    ValueOutOfRange,
    #[error("Malformed hex")]
    MalformedHex,
    #[error("Value too large")]
    ValueTooLarge,
    #[error("Encode/Decode error")]
    EncodeDecodeError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreError {
    pub error_kind: CoreErrorKind,
    pub message: String,
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Core Error: {}: {}", self.error_kind, self.message)
    }
}

impl Error for CoreError {}

impl CoreError {
    pub fn new(error_kind: CoreErrorKind, message: &str) -> Self {
        Self {
            error_kind,
            message: message.to_owned(),
        }
    }

    pub fn kind(&self) -> CoreErrorKind {
        self.error_kind
    }
}

impl From<bincode::error::DecodeError> for CoreError {
    fn from(value: bincode::error::DecodeError) -> Self {
        CoreError::new(CoreErrorKind::EncodeDecodeError, &value.to_string())
    }
}

impl From<bincode::error::EncodeError> for CoreError {
    fn from(value: bincode::error::EncodeError) -> Self {
        Self::new(CoreErrorKind::EncodeDecodeError, value.to_string().as_str())
    }
}

/// Checks that the window `[from, from + len)` fits into `size` bytes.
pub(crate) fn check_range(from: usize, len: usize, size: usize) -> Result<(), CoreError> {
    match from.checked_add(len) {
        Some(end) if end <= size => Ok(()),
        _ => Err(CoreError::new(
            CoreErrorKind::IndexOutOfRange,
            format!("Range [{from}, {from}+{len}) is out of bounds for size {size}").as_str(),
        )),
    }
}

pub(crate) fn check_index(index: usize, size: usize) -> Result<(), CoreError> {
    if index < size {
        Ok(())
    } else {
        Err(CoreError::new(
            CoreErrorKind::IndexOutOfRange,
            format!("Index {index} is out of bounds for size {size}").as_str(),
        ))
    }
}
