use std::error::Error;
use std::panic::Location;
use std::path::{Path, PathBuf};

use crate::catalog_path::CatalogPathBuf;

#[derive(Debug)]
pub enum InnerError {
    DirectoryUnreadable {
        dir: PathBuf,
        cause: Option<std::io::Error>,
    },
    UnknownHandlerType {
        discriminator: String,
        entry: PathBuf,
    },
    MalformedAddress(String),
    NodeCollision {
        address: CatalogPathBuf,
    },
    CategoryNotFound {
        address: CatalogPathBuf,
    },
    AddressNotFound {
        address: CatalogPathBuf,
        missing: String,
    },
    HandlerBuild {
        address: CatalogPathBuf,
        message: String,
    },
    GlobPattern(glob::PatternError),
}

#[derive(Debug)]
pub struct CatalogError {
    pub error: InnerError,
    pub location: &'static Location<'static>,
}

impl CatalogError {
    #[track_caller]
    pub fn directory_unreadable(dir: &Path, cause: Option<std::io::Error>) -> Self {
        Self {
            error: InnerError::DirectoryUnreadable {
                dir: dir.to_path_buf(),
                cause,
            },
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn unknown_handler_type(discriminator: &str, entry: &Path) -> Self {
        Self {
            error: InnerError::UnknownHandlerType {
                discriminator: discriminator.to_string(),
                entry: entry.to_path_buf(),
            },
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn malformed_address(input: &str) -> Self {
        Self {
            error: InnerError::MalformedAddress(input.to_string()),
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn node_collision(address: &CatalogPathBuf) -> Self {
        Self {
            error: InnerError::NodeCollision {
                address: address.clone(),
            },
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn category_not_found(address: &CatalogPathBuf) -> Self {
        Self {
            error: InnerError::CategoryNotFound {
                address: address.clone(),
            },
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn address_not_found(address: &CatalogPathBuf, missing: &str) -> Self {
        Self {
            error: InnerError::AddressNotFound {
                address: address.clone(),
                missing: missing.to_string(),
            },
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn handler_build(address: &CatalogPathBuf, message: &str) -> Self {
        Self {
            error: InnerError::HandlerBuild {
                address: address.clone(),
                message: message.to_string(),
            },
            location: Location::caller(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.error {
            InnerError::DirectoryUnreadable { .. } => "DirectoryUnreadable",
            InnerError::UnknownHandlerType { .. } => "UnknownHandlerType",
            InnerError::MalformedAddress(_) => "MalformedAddress",
            InnerError::NodeCollision { .. } => "NodeCollision",
            InnerError::CategoryNotFound { .. } => "CategoryNotFound",
            InnerError::AddressNotFound { .. } => "AddressNotFound",
            InnerError::HandlerBuild { .. } => "HandlerBuild",
            InnerError::GlobPattern(_) => "GlobPattern",
        }
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}: {:?}", self.kind_name(), self.location, self.error)
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.error {
            InnerError::DirectoryUnreadable { cause, .. } => {
                cause.as_ref().map(|e| e as &(dyn Error + 'static))
            }
            InnerError::GlobPattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<glob::PatternError> for CatalogError {
    #[track_caller]
    fn from(e: glob::PatternError) -> Self {
        Self {
            error: InnerError::GlobPattern(e),
            location: Location::caller(),
        }
    }
}
