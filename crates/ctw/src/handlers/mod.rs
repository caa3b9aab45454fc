pub mod ini;
pub use ini::IniSpec;

pub mod desktop_entry;
pub use desktop_entry::DesktopEntrySpec;

use crate::collector::CollectorSpec;
use crate::handler::HandlerRegistry;

/// Handler table for the desktop-configuration trees this crate scans:
/// `.ini` and `.desktop` files plus the well-known component directories.
pub fn desktop_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register(Box::new(IniSpec));
    registry.register(Box::new(DesktopEntrySpec));
    registry.register(Box::new(CollectorSpec::new("Panel")));
    registry.register(Box::new(CollectorSpec::new("Applications")));
    registry.register(Box::new(CollectorSpec::new("Autostart")));
    registry
}
