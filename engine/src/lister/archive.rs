use super::{RESOURCE_ROOT, ResourceLister, compile_pattern, file_name_matches, split_resource_id};
use crate::common::{SchemeError, SchemeResult};
use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use zip::ZipArchive;
use zip::result::ZipError;

/// File extension of packaged bundles.
pub const PACKAGE_EXTENSION: &str = "sublime-package";

/// Themes packed inside zipped `.sublime-package` bundles.
///
/// The entry `themes/Dusk.tmTheme` of `<root>/Theme - Soda.sublime-package`
/// is exposed as `Packages/Theme - Soda/themes/Dusk.tmTheme`.
pub struct ArchiveLister {
    root: PathBuf,
}

impl ArchiveLister {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn bundles(&self) -> SchemeResult<Vec<(String, PathBuf)>> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            SchemeError::unreadable(&self.root.display().to_string(), e)
        })?;

        let mut bundles = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some(PACKAGE_EXTENSION)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                bundles.push((stem.to_string(), path.clone()));
            }
        }
        bundles.sort();
        Ok(bundles)
    }

    fn open(path: &Path) -> Result<ZipArchive<File>, String> {
        let file = File::open(path).map_err(|e| e.to_string())?;
        ZipArchive::new(file).map_err(|e| e.to_string())
    }
}

impl ResourceLister for ArchiveLister {
    fn list_resources(&self, pattern: &str) -> SchemeResult<Vec<String>> {
        let pattern = compile_pattern(pattern)?;

        if !self.root.is_dir() {
            log::debug!("Installed packages directory {} does not exist", self.root.display());
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for (package, path) in self.bundles()? {
            let archive = match Self::open(&path) {
                Ok(archive) => archive,
                Err(e) => {
                    log::warn!("Skipping unreadable bundle {}: {e}", path.display());
                    continue;
                }
            };

            ids.extend(
                archive
                    .file_names()
                    .filter(|name| !name.ends_with('/'))
                    .map(|name| format!("{RESOURCE_ROOT}/{package}/{name}"))
                    .filter(|id| file_name_matches(&pattern, id)),
            );
        }

        log::debug!("Found {} packaged resources in {}", ids.len(), self.root.display());
        Ok(ids)
    }

    fn read_resource(&self, id: &str) -> SchemeResult<Vec<u8>> {
        let (package, entry_name) =
            split_resource_id(id).ok_or_else(|| SchemeError::ResourceNotFound(id.to_string()))?;

        let path = self.root.join(format!("{package}.{PACKAGE_EXTENSION}"));
        let file = File::open(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SchemeError::ResourceNotFound(id.to_string()),
            _ => SchemeError::unreadable(id, e),
        })?;
        let mut archive = ZipArchive::new(file).map_err(|e| SchemeError::unreadable(id, e))?;

        let mut entry = archive.by_name(entry_name).map_err(|e| match e {
            ZipError::FileNotFound => SchemeError::ResourceNotFound(id.to_string()),
            other => SchemeError::unreadable(id, other),
        })?;

        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| SchemeError::unreadable(id, e))?;
        Ok(bytes)
    }
}
