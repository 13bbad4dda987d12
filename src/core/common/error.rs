use std::fmt;

use crate::core::indexing::kdtree::KdTreeError;

#[derive(Debug)]
pub enum OxikdError {
    Io(std::io::Error),
    Configuration(String),
    NotFound(String),
    InvalidQuery(String),
}

impl fmt::Display for OxikdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO Error: {}", e),
            Self::Configuration(s) => write!(f, "Configuration error: {}", s),
            Self::NotFound(s) => write!(f, "Not Found: {}", s),
            Self::InvalidQuery(s) => write!(f, "Invalid query: {}", s),
        }
    }
}

impl std::error::Error for OxikdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

// Manual From implementations
impl From<std::io::Error> for OxikdError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<KdTreeError> for OxikdError {
    fn from(err: KdTreeError) -> Self {
        match err {
            KdTreeError::NotFound(s) => Self::NotFound(s),
            KdTreeError::InvalidQuery(s) => Self::InvalidQuery(s),
        }
    }
}
