use std::path::Path;

use crate::collector::CollectorSpec;
use crate::handler::HandlerRegistry;
use crate::handlers;

/// Write a file under `file_root`, creating parent directories as needed.
pub fn write_file(file_root: &Path, entry_path: &str, file_contents: &str) -> std::io::Result<()> {
    let fs_path = file_root.join(entry_path);
    if let Some(parent_dir) = fs_path.parent() {
        std::fs::create_dir_all(parent_dir)?;
    }

    std::fs::write(&fs_path, file_contents)
}

/// The built-in handler table plus collector types the test trees use.
pub fn test_registry() -> HandlerRegistry {
    let mut registry = handlers::desktop_registry();
    registry.register(Box::new(CollectorSpec::new("Themes")));
    registry.register(Box::new(CollectorSpec::new("Loop")));
    registry
}
