use std::path::{Path, PathBuf};

use crate::CatalogError;
use crate::catalog_path::CatalogPathBuf;
use crate::collector::{BuildCtx, COLLECTOR_KEY, Collector};
use crate::handler::{Handler, HandlerRegistry};
use crate::store::{CatalogNode, CatalogStore};

/// A fully built component catalog. The store is populated once by the root
/// collector and read-only afterwards; consumers navigate it through `get`.
pub struct Catalog {
    store: CatalogStore,
    root_address: CatalogPathBuf,
    source_root: PathBuf,
    built_at: chrono::DateTime<chrono::Utc>,
}

impl Catalog {
    /// Scan `source_root` depth-first and classify everything under it. Any
    /// failure aborts the build; there is no partial-recovery mode.
    pub fn build(
        source_root: &Path,
        registry: &HandlerRegistry,
    ) -> Result<Catalog, CatalogError> {
        let mut store = CatalogStore::new();
        {
            let mut ctx = BuildCtx::new(&mut store, registry);
            let mut root = Collector::new(CatalogPathBuf::root(), source_root.to_path_buf());
            root.build(&mut ctx)?;
        }
        Ok(Catalog {
            store,
            root_address: CatalogPathBuf::from(COLLECTOR_KEY),
            source_root: source_root.to_path_buf(),
            built_at: chrono::Utc::now(),
        })
    }

    pub fn get(&self, address: &CatalogPathBuf) -> Result<&CatalogNode, CatalogError> {
        self.store.get(address)
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Address of the root collector's category (`collector`).
    pub fn root_address(&self) -> &CatalogPathBuf {
        &self.root_address
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn built_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.built_at
    }

    pub fn to_json(&self) -> serde_json::Value {
        self.store.to_json()
    }
}
