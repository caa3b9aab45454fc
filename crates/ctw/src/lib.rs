// Helpers for testing
pub mod testing;

pub mod error;
pub use error::CatalogError;

// Addressing
pub mod catalog_path;
pub use catalog_path::CatalogPathBuf;

// Tree walk
pub mod globber;
pub use globber::Globber;

pub mod store;
pub use store::{CatalogNode, CatalogStore, LeafEntry};

pub mod handler;
pub use handler::{Handler, HandlerCtx, HandlerRegistry, HandlerSpec};

pub mod collector;
pub use collector::{BuildCtx, Collector, CollectorSpec};

pub mod catalog;
pub use catalog::Catalog;

pub mod config;
pub mod handlers;
