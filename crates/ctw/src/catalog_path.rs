use serde::Serialize;

use crate::CatalogError;

/// A slash-joined address of a node in the catalog tree. Stored in normalized
/// form: no leading separator, every segment non-empty.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Serialize)]
pub struct CatalogPathBuf(pub String);

impl From<&str> for CatalogPathBuf {
    fn from(input: &str) -> Self {
        if input.len() > 0 && input.as_bytes()[0] == b'/' {
            Self(input[1..].to_string())
        } else {
            Self(input.to_string())
        }
    }
}

impl From<&String> for CatalogPathBuf {
    fn from(input: &String) -> Self { Self::from(input.as_str()) }
}

impl std::fmt::Display for CatalogPathBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl CatalogPathBuf {
    /// The empty address: the root category of the store.
    pub fn root() -> CatalogPathBuf {
        CatalogPathBuf(String::new())
    }

    /// Validating constructor for untrusted input. One leading separator is
    /// stripped; an empty segment anywhere else is a `MalformedAddress`.
    pub fn parse(input: &str) -> Result<CatalogPathBuf, CatalogError> {
        let stripped = input.strip_prefix('/').unwrap_or(input);
        if stripped.is_empty() {
            return Ok(Self::root());
        }
        if stripped.split('/').any(|segment| segment.is_empty()) {
            return Err(CatalogError::malformed_address(input));
        }
        Ok(CatalogPathBuf(stripped.to_string()))
    }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn is_root(&self) -> bool { self.0.is_empty() }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    pub fn parent(&self) -> Option<CatalogPathBuf> {
        if self.is_root() {
            return None;
        }
        match self.0.rsplit_once('/') {
            Some((parent, _)) => Some(CatalogPathBuf(parent.to_string())),
            None => Some(Self::root()),
        }
    }

    pub fn parent_or_empty(&self) -> CatalogPathBuf {
        self.parent().unwrap_or(Self::root())
    }

    /// Last segment of the address, or "" for the root.
    pub fn last_segment(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    pub fn join(&self, segment: &str) -> CatalogPathBuf {
        assert!(!segment.is_empty());
        assert!(!segment.contains('/'));

        let mut result_str = self.0.to_string();
        if result_str.len() > 0 {
            result_str.push('/');
        }
        result_str.push_str(segment);
        CatalogPathBuf(result_str)
    }
}
