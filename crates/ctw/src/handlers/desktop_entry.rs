use std::path::PathBuf;

use crate::CatalogError;
use crate::catalog_path::CatalogPathBuf;
use crate::collector::BuildCtx;
use crate::handler::{Handler, HandlerCtx, HandlerSpec};

/// Leaf handler for freedesktop `.desktop` launcher files. Reads the
/// `[Desktop Entry]` group and keeps the declared name and command line.
pub struct DesktopEntryHandler {
    address: CatalogPathBuf,
    source_path: PathBuf,
    name: Option<String>,
    exec: Option<String>,
}

impl DesktopEntryHandler {
    pub fn new(ctx: HandlerCtx) -> DesktopEntryHandler {
        DesktopEntryHandler {
            address: ctx.address,
            source_path: ctx.source_path,
            name: None,
            exec: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn exec(&self) -> Option<&str> {
        self.exec.as_deref()
    }
}

fn parse_entry_group(contents: &str) -> (Option<String>, Option<String>) {
    let mut in_entry_group = false;
    let mut name = None;
    let mut exec = None;

    for line in contents.lines().map(|l| l.trim()) {
        if line.starts_with('[') {
            in_entry_group = line == "[Desktop Entry]";
            continue;
        }
        if !in_entry_group {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            match key.trim() {
                "Name" => name = Some(value.trim().to_string()),
                "Exec" => exec = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }

    (name, exec)
}

impl Handler for DesktopEntryHandler {
    fn build(&mut self, _ctx: &mut BuildCtx<'_>) -> Result<(), CatalogError> {
        let contents = std::fs::read_to_string(&self.source_path).map_err(|e| {
            CatalogError::handler_build(
                &self.address,
                &format!("read {:?}: {}", self.source_path, e),
            )
        })?;
        (self.name, self.exec) = parse_entry_group(&contents);
        Ok(())
    }

    fn catalog_property(&self) -> &str {
        self.address.last_segment()
    }

    fn type_name(&self) -> &str {
        "Desktop"
    }
}

pub struct DesktopEntrySpec;

impl HandlerSpec for DesktopEntrySpec {
    fn type_name(&self) -> &str {
        "Desktop"
    }

    fn new_handler(&self, ctx: HandlerCtx) -> Box<dyn Handler> {
        Box::new(DesktopEntryHandler::new(ctx))
    }
}
