use discbytes_core::error::CoreError;
use std::fmt::{Debug, Display, Formatter};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DiscoveryErrorKind {
    CoreError(CoreError),
    InvalidState,
    InvalidConfig,
    InvalidNodeRecord,
}

impl Display for DiscoveryErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryErrorKind::CoreError(err) => std::fmt::Display::fmt(&err, f),
            DiscoveryErrorKind::InvalidState => write!(f, "Invalid service state"),
            DiscoveryErrorKind::InvalidConfig => write!(f, "Invalid configuration"),
            DiscoveryErrorKind::InvalidNodeRecord => write!(f, "Invalid node record"),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub struct DiscoveryError {
    pub error_kind: DiscoveryErrorKind,
    pub message: String,
}

impl Display for DiscoveryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.error_kind {
            DiscoveryErrorKind::CoreError(e) => write!(f, "DiscoveryError -> {}", e),
            _ => write!(f, "DiscoveryError: {}: {}", self.error_kind, self.message),
        }
    }
}

impl DiscoveryError {
    pub fn new(error_kind: DiscoveryErrorKind, message: &str) -> Self {
        Self {
            error_kind,
            message: message.to_owned(),
        }
    }
}

impl From<CoreError> for DiscoveryError {
    fn from(value: CoreError) -> Self {
        Self::new(DiscoveryErrorKind::CoreError(value), "")
    }
}
