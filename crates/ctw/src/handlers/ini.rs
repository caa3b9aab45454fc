use std::path::PathBuf;

use crate::CatalogError;
use crate::catalog_path::CatalogPathBuf;
use crate::collector::BuildCtx;
use crate::handler::{Handler, HandlerCtx, HandlerSpec};

/// Leaf handler for `.ini` configuration files. Reads the file at build time
/// and keeps its section names; the catalog itself never interprets them.
pub struct IniHandler {
    address: CatalogPathBuf,
    source_path: PathBuf,
    sections: Vec<String>,
}

impl IniHandler {
    pub fn new(ctx: HandlerCtx) -> IniHandler {
        IniHandler {
            address: ctx.address,
            source_path: ctx.source_path,
            sections: Vec::new(),
        }
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }
}

pub fn parse_sections(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(|line| line.trim())
        .filter_map(|line| line.strip_prefix('[')?.strip_suffix(']'))
        .map(|name| name.to_string())
        .collect()
}

impl Handler for IniHandler {
    fn build(&mut self, _ctx: &mut BuildCtx<'_>) -> Result<(), CatalogError> {
        let contents = std::fs::read_to_string(&self.source_path).map_err(|e| {
            CatalogError::handler_build(
                &self.address,
                &format!("read {:?}: {}", self.source_path, e),
            )
        })?;
        self.sections = parse_sections(&contents);
        Ok(())
    }

    fn catalog_property(&self) -> &str {
        self.address.last_segment()
    }

    fn type_name(&self) -> &str {
        "Ini"
    }
}

pub struct IniSpec;

impl HandlerSpec for IniSpec {
    fn type_name(&self) -> &str {
        "Ini"
    }

    fn new_handler(&self, ctx: HandlerCtx) -> Box<dyn Handler> {
        Box::new(IniHandler::new(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::handler::HandlerRegistry;
    use crate::store::CatalogStore;
    use crate::testing::write_file;

    #[test]
    fn test_parse_sections() {
        let contents = "[general]\nkey=value\n\n  [panel]  \nheight=32\nnot a section\n";
        assert_eq!(parse_sections(contents), vec!["general", "panel"]);

        assert!(parse_sections("key=value\n").is_empty());
    }

    #[test]
    fn test_build_reads_file() -> std::io::Result<()> {
        let tempdir = tempfile::tempdir()?;
        write_file(tempdir.path(), "session.ini", "[session]\n[env]\n")?;

        let mut handler = IniHandler::new(HandlerCtx {
            address: CatalogPathBuf::from("collector/files/session"),
            source_path: tempdir.path().join("session.ini"),
        });

        let registry = HandlerRegistry::new();
        let mut store = CatalogStore::new();
        let mut ctx = BuildCtx::new(&mut store, &registry);
        handler.build(&mut ctx).unwrap();

        assert_eq!(handler.sections(), &["session", "env"]);
        assert_eq!(handler.catalog_property(), "session");

        Ok(())
    }

    #[test]
    fn test_build_unreadable_file() {
        let tempdir = tempfile::tempdir().unwrap();

        let mut handler = IniHandler::new(HandlerCtx {
            address: CatalogPathBuf::from("collector/files/missing"),
            source_path: tempdir.path().join("missing.ini"),
        });

        let registry = HandlerRegistry::new();
        let mut store = CatalogStore::new();
        let mut ctx = BuildCtx::new(&mut store, &registry);
        let error = handler.build(&mut ctx).err().expect("Should be err");
        assert!(matches!(
            error.error,
            crate::error::InnerError::HandlerBuild { .. }
        ));
    }
}
