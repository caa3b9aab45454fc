use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::CatalogError;

use super::HandlerSpec;

// Names a statically registered handler type could legally have.
static TYPE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap());

/// Canonical discriminator transform: first character ASCII-uppercased, the
/// remainder ASCII-lowercased. `panel`, `PANEL` and `Panel` all map to
/// `Panel`.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let mut result = first.to_ascii_uppercase().to_string();
            result.push_str(&chars.as_str().to_ascii_lowercase());
            result
        }
        None => String::new(),
    }
}

/// Basename with the final extension removed; the key a file leaf is stored
/// under.
pub fn file_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
}

/// Static table of discriminator name to handler type. Resolution failures
/// are hard errors: an unresolvable entry is a naming-convention violation or
/// a missing registration, and a loud failure beats a silently-incomplete
/// catalog.
pub struct HandlerRegistry {
    specs: HashMap<String, Box<dyn HandlerSpec>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            specs: HashMap::new(),
        }
    }

    pub fn register(&mut self, spec: Box<dyn HandlerSpec>) {
        self.specs.insert(spec.type_name().to_string(), spec);
    }

    pub fn get(&self, type_name: &str) -> Option<&dyn HandlerSpec> {
        self.specs.get(type_name).map(|spec| spec.as_ref())
    }

    fn resolve(&self, discriminator: &str, entry: &Path) -> Result<&dyn HandlerSpec, CatalogError> {
        let type_name = capitalize(discriminator);
        if !TYPE_NAME_RE.is_match(&type_name) {
            return Err(CatalogError::unknown_handler_type(discriminator, entry));
        }
        log::debug!("resolve: {:?} -> {}", entry, type_name);
        self.get(&type_name)
            .ok_or_else(|| CatalogError::unknown_handler_type(discriminator, entry))
    }

    /// Files discriminate on their extension. A file without one cannot be
    /// resolved.
    pub fn resolve_file(
        &self,
        file_name: &str,
        entry: &Path,
    ) -> Result<&dyn HandlerSpec, CatalogError> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| CatalogError::unknown_handler_type(file_name, entry))?;
        self.resolve(ext, entry)
    }

    /// Directories discriminate on their own basename.
    pub fn resolve_directory(
        &self,
        dir_name: &str,
        entry: &Path,
    ) -> Result<&dyn HandlerSpec, CatalogError> {
        self.resolve(dir_name, entry)
    }
}
