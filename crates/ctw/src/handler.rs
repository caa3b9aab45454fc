use std::path::PathBuf;

use crate::CatalogError;
use crate::catalog_path::CatalogPathBuf;
use crate::collector::BuildCtx;

/// Construction context for a handler: the address the catalog assigned to it
/// and the filesystem entry it was resolved from.
pub struct HandlerCtx {
    pub address: CatalogPathBuf,
    pub source_path: PathBuf,
}

/// Contract every catalog leaf fulfills. The catalog never interprets what a
/// handler does in `build`; a failure there aborts the whole build.
pub trait Handler {
    fn build(&mut self, ctx: &mut BuildCtx<'_>) -> Result<(), CatalogError>;

    /// Stable key this handler is stored under in its parent category.
    fn catalog_property(&self) -> &str;

    fn type_name(&self) -> &str;
}

pub trait HandlerSpec {
    /// Name the spec is registered under (the capitalized discriminator).
    fn type_name(&self) -> &str;

    fn new_handler(&self, ctx: HandlerCtx) -> Box<dyn Handler>;
}

pub mod registry;
pub use registry::HandlerRegistry;
