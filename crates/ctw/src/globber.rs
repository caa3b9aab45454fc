use std::path::{Path, PathBuf};

use crate::CatalogError;

/// Lists the immediate children of one directory, split into files and
/// subdirectories. Hidden entries (leading dot) are excluded. Output is
/// sorted so repeated scans of the same snapshot list in the same order.
pub struct Globber {
    dir: PathBuf,
}

impl Globber {
    pub fn ignore_entry(name: &str) -> bool {
        name.starts_with('.')
    }

    pub fn new(dir: &Path) -> Result<Globber, CatalogError> {
        let metadata = std::fs::metadata(dir)
            .map_err(|e| CatalogError::directory_unreadable(dir, Some(e)))?;
        if !metadata.is_dir() {
            return Err(CatalogError::directory_unreadable(dir, None));
        }
        Ok(Globber { dir: dir.to_path_buf() })
    }

    fn glob_children(&self) -> Result<Vec<PathBuf>, CatalogError> {
        let dir_str = self.dir.to_str()
            .ok_or_else(|| CatalogError::directory_unreadable(&self.dir, None))?;
        let glob_string = format!("{}/*", glob::Pattern::escape(dir_str));
        log::debug!("glob_children: {}", glob_string);

        let mut result = Vec::new();
        for entry in glob::glob(&glob_string)? {
            let path = entry
                .map_err(|e| CatalogError::directory_unreadable(&self.dir, Some(e.into_error())))?;
            let basename = path.file_name().and_then(|n| n.to_str());
            let Some(basename) = basename else {
                continue;
            };
            if Self::ignore_entry(basename) {
                continue;
            }
            result.push(path);
        }
        result.sort();
        Ok(result)
    }

    fn basenames(paths: Vec<PathBuf>) -> Vec<String> {
        paths.iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .map(|n| n.to_string())
            .collect()
    }

    pub fn files(&self) -> Result<Vec<String>, CatalogError> {
        let children = self.glob_children()?
            .into_iter()
            .filter(|p| p.is_file())
            .collect();
        Ok(Self::basenames(children))
    }

    pub fn directories(&self) -> Result<Vec<String>, CatalogError> {
        let children = self.glob_children()?
            .into_iter()
            .filter(|p| p.is_dir())
            .collect();
        Ok(Self::basenames(children))
    }
}
