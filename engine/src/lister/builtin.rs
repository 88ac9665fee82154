use super::{RESOURCE_ROOT, ResourceLister, compile_pattern, file_name_matches};
use crate::common::{SchemeError, SchemeResult};

/// Package name under which the built-in schemes are exposed.
pub const BUILTIN_PACKAGE: &str = "Color Scheme - Default";

/// Default schemes embedded in the binary: `(file name, content)`.
const BUILTIN_SCHEMES: [(&str, &str); 4] = [
    ("Dawn.tmTheme", include_str!("../../themes/Dawn.tmTheme")),
    ("Monokai.tmTheme", include_str!("../../themes/Monokai.tmTheme")),
    (
        "Solarized (Light).tmTheme",
        include_str!("../../themes/Solarized (Light).tmTheme"),
    ),
    ("Zenburn.tmTheme", include_str!("../../themes/Zenburn.tmTheme")),
];

/// Schemes shipped inside the binary, always available.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinLister;

impl BuiltinLister {
    pub fn new() -> Self {
        Self
    }

    fn resource_id(file_name: &str) -> String {
        format!("{RESOURCE_ROOT}/{BUILTIN_PACKAGE}/{file_name}")
    }
}

impl ResourceLister for BuiltinLister {
    fn list_resources(&self, pattern: &str) -> SchemeResult<Vec<String>> {
        let pattern = compile_pattern(pattern)?;
        Ok(BUILTIN_SCHEMES
            .iter()
            .map(|(file_name, _)| Self::resource_id(file_name))
            .filter(|id| file_name_matches(&pattern, id))
            .collect())
    }

    fn read_resource(&self, id: &str) -> SchemeResult<Vec<u8>> {
        BUILTIN_SCHEMES
            .iter()
            .find(|(file_name, _)| Self::resource_id(file_name) == id)
            .map(|(_, content)| content.as_bytes().to_vec())
            .ok_or_else(|| SchemeError::ResourceNotFound(id.to_string()))
    }
}
