use std::path::Path;

use serde::Deserialize;

use crate::collector::CollectorSpec;
use crate::handler::HandlerRegistry;

pub const CONFIG_FILENAME: &str = "catwalk.json";

#[derive(Debug, Deserialize)]
pub struct ScanConfig {
    /// Extra directory type names registered as plain collectors.
    #[serde(default)]
    pub collector_types: Vec<String>,
}

impl ScanConfig {
    pub fn load_from(filepath: &Path) -> Option<ScanConfig> {
        let data = std::fs::read(filepath).ok()?;
        let data_str = std::str::from_utf8(&data).ok()?;
        if data_str.is_empty() {
            return None;
        }

        serde_json::from_str(data_str).expect(&format!("couldn't load config from {:?}", filepath))
    }

    pub fn apply(&self, registry: &mut HandlerRegistry) {
        for type_name in &self.collector_types {
            registry.register(Box::new(CollectorSpec::new(type_name)));
        }
    }
}
