use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::debug;

use crate::CatalogError;
use crate::catalog_path::CatalogPathBuf;
use crate::globber::Globber;
use crate::handler::{Handler, HandlerCtx, HandlerRegistry, HandlerSpec, registry};
use crate::store::CatalogStore;

pub const COLLECTOR_KEY: &str = "collector";
pub const FILES_CATEGORY: &str = "files";
pub const DIRECTORIES_CATEGORY: &str = "directories";

/// Shared state of one catalog build: the store under construction, the
/// handler table, and the set of directories already scanned (the symlink
/// cycle guard).
pub struct BuildCtx<'a> {
    pub store: &'a mut CatalogStore,
    pub registry: &'a HandlerRegistry,
    visited: HashSet<PathBuf>,
}

impl<'a> BuildCtx<'a> {
    pub fn new(store: &'a mut CatalogStore, registry: &'a HandlerRegistry) -> Self {
        Self {
            store,
            registry,
            visited: HashSet::new(),
        }
    }

    // A symlink cycle shows up as the same canonical directory scanned twice.
    fn mark_visited(&mut self, dir: &Path) -> Result<(), CatalogError> {
        let canonical = dir
            .canonicalize()
            .map_err(|e| CatalogError::directory_unreadable(dir, Some(e)))?;
        if !self.visited.insert(canonical) {
            return Err(CatalogError::directory_unreadable(dir, None));
        }
        Ok(())
    }
}

/// Turns one filesystem subtree into one catalog subtree. Builds a
/// `collector` category at its own address, registers itself inside it, then
/// classifies children into `files` and `directories`, recursing into the
/// latter depth-first.
pub struct Collector {
    address: CatalogPathBuf,
    source_path: PathBuf,
    type_name: String,
}

impl Collector {
    pub fn new(address: CatalogPathBuf, source_path: PathBuf) -> Collector {
        Collector {
            address,
            source_path,
            type_name: "Collector".to_string(),
        }
    }

    pub fn address(&self) -> &CatalogPathBuf {
        &self.address
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    fn build_files(
        &self,
        ctx: &mut BuildCtx<'_>,
        self_category: &CatalogPathBuf,
        globber: &Globber,
    ) -> Result<(), CatalogError> {
        let files = globber.files()?;
        if files.is_empty() {
            return Ok(());
        }

        let files_category = ctx.store.add_category(self_category, FILES_CATEGORY)?;
        for file_name in files {
            let full_path = self.source_path.join(&file_name);
            let spec = ctx.registry.resolve_file(&file_name, &full_path)?;
            let mut handler = spec.new_handler(HandlerCtx {
                address: files_category.join(registry::file_stem(&file_name)),
                source_path: full_path,
            });
            handler.build(ctx)?;

            let key = handler.catalog_property().to_string();
            ctx.store.add_leaf(&files_category, &key, handler)?;
        }
        Ok(())
    }

    fn build_directories(
        &self,
        ctx: &mut BuildCtx<'_>,
        self_category: &CatalogPathBuf,
        globber: &Globber,
    ) -> Result<(), CatalogError> {
        let directories = globber.directories()?;
        if directories.is_empty() {
            return Ok(());
        }

        let dirs_category = ctx.store.add_category(self_category, DIRECTORIES_CATEGORY)?;
        for dir_name in directories {
            let child_path = self.source_path.join(&dir_name);
            let spec = ctx.registry.resolve_directory(&dir_name, &child_path)?;
            let assigned = dirs_category.join(&dir_name);
            let mut handler = spec.new_handler(HandlerCtx {
                address: assigned.clone(),
                source_path: child_path,
            });
            handler.build(ctx)?;

            // A collector registers its own category at its assigned address
            // and is done. Anything else is stored as a leaf under its
            // property key, which is where two directories declaring the same
            // type and property collide.
            if !ctx.store.contains(&assigned) {
                let key = handler.catalog_property().to_string();
                ctx.store.add_leaf(&dirs_category, &key, handler)?;
            }
        }
        Ok(())
    }
}

impl Handler for Collector {
    fn build(&mut self, ctx: &mut BuildCtx<'_>) -> Result<(), CatalogError> {
        debug!("collect: {:?} -> /{}", self.source_path, self.address);
        ctx.mark_visited(&self.source_path)?;

        // Self-registration happens before any child is inserted
        let self_category = ctx.store.add_category(&self.address, COLLECTOR_KEY)?;
        ctx.store.add_leaf(
            &self_category,
            COLLECTOR_KEY,
            Box::new(CollectorEntry::of(self)),
        )?;

        let globber = Globber::new(&self.source_path)?;
        self.build_files(ctx, &self_category, &globber)?;
        self.build_directories(ctx, &self_category, &globber)?;
        Ok(())
    }

    fn catalog_property(&self) -> &str {
        COLLECTOR_KEY
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Snapshot of a collector, stored inside its own category so consumers can
/// look up what built a subtree and where it came from.
pub struct CollectorEntry {
    address: CatalogPathBuf,
    source_path: PathBuf,
    type_name: String,
}

impl CollectorEntry {
    fn of(collector: &Collector) -> CollectorEntry {
        CollectorEntry {
            address: collector.address.clone(),
            source_path: collector.source_path.clone(),
            type_name: collector.type_name.clone(),
        }
    }

    pub fn address(&self) -> &CatalogPathBuf {
        &self.address
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }
}

impl Handler for CollectorEntry {
    fn build(&mut self, _ctx: &mut BuildCtx<'_>) -> Result<(), CatalogError> {
        Ok(())
    }

    fn catalog_property(&self) -> &str {
        COLLECTOR_KEY
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Registry entry for directory types whose handler is a plain recursive
/// collector.
pub struct CollectorSpec {
    type_name: String,
}

impl CollectorSpec {
    pub fn new(type_name: &str) -> CollectorSpec {
        CollectorSpec {
            type_name: type_name.to_string(),
        }
    }
}

impl HandlerSpec for CollectorSpec {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn new_handler(&self, ctx: HandlerCtx) -> Box<dyn Handler> {
        Box::new(Collector {
            address: ctx.address,
            source_path: ctx.source_path,
            type_name: self.type_name.clone(),
        })
    }
}
