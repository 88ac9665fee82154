use super::{RESOURCE_ROOT, ResourceLister, compile_pattern, file_name_matches, has_parent_segment};
use crate::common::{SchemeError, SchemeResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Loose theme files below a packages directory.
///
/// `<root>/Theme - Soda/Dusk.tmTheme` is exposed as
/// `Packages/Theme - Soda/Dusk.tmTheme`.
pub struct DirectoryLister {
    root: PathBuf,
}

impl DirectoryLister {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn to_resource_id(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let segments: Vec<&str> = relative
            .components()
            .map(|component| match component {
                Component::Normal(segment) => segment.to_str(),
                _ => None,
            })
            .collect::<Option<_>>()?;
        if segments.is_empty() {
            return None;
        }
        Some(format!("{RESOURCE_ROOT}/{}", segments.join("/")))
    }

    fn to_path(&self, id: &str) -> Option<PathBuf> {
        let relative = id.strip_prefix(RESOURCE_ROOT)?.strip_prefix('/')?;
        if relative.is_empty() || has_parent_segment(relative) {
            return None;
        }
        Some(relative.split('/').fold(self.root.clone(), |path, segment| path.join(segment)))
    }
}

impl ResourceLister for DirectoryLister {
    fn list_resources(&self, pattern: &str) -> SchemeResult<Vec<String>> {
        let pattern = compile_pattern(pattern)?;

        if !self.root.is_dir() {
            log::debug!("Packages directory {} does not exist", self.root.display());
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry under {}: {e}", self.root.display());
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            match self.to_resource_id(entry.path()) {
                Some(id) if file_name_matches(&pattern, &id) => ids.push(id),
                Some(_) => {}
                None => log::debug!("Ignoring non UTF-8 path {}", entry.path().display()),
            }
        }

        log::debug!("Found {} loose resources in {}", ids.len(), self.root.display());
        Ok(ids)
    }

    fn read_resource(&self, id: &str) -> SchemeResult<Vec<u8>> {
        let path = self
            .to_path(id)
            .ok_or_else(|| SchemeError::ResourceNotFound(id.to_string()))?;

        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SchemeError::ResourceNotFound(id.to_string()),
            _ => SchemeError::unreadable(id, e),
        })
    }
}
