use super::ResourceLister;
use crate::common::{SchemeError, SchemeResult};
use std::collections::HashSet;

/// Ordered union of several backends.
///
/// Listing keeps the first occurrence of every id, so earlier backends shadow
/// later ones; a failing backend is logged and skipped. Reading tries the
/// backends in the same order.
#[derive(Default)]
pub struct CompositeLister {
    backends: Vec<Box<dyn ResourceLister>>,
}

impl CompositeLister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, backend: impl ResourceLister + 'static) -> Self {
        self.backends.push(Box::new(backend));
        self
    }
}

impl ResourceLister for CompositeLister {
    fn list_resources(&self, pattern: &str) -> SchemeResult<Vec<String>> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();

        for (index, backend) in self.backends.iter().enumerate() {
            match backend.list_resources(pattern) {
                Ok(listed) => {
                    for id in listed {
                        if seen.insert(id.clone()) {
                            ids.push(id);
                        }
                    }
                }
                Err(e @ SchemeError::InvalidPattern { .. }) => return Err(e),
                Err(e) => log::warn!("Resource backend #{index} failed to list resources: {e}"),
            }
        }

        Ok(ids)
    }

    fn read_resource(&self, id: &str) -> SchemeResult<Vec<u8>> {
        let mut first_error = None;

        for backend in &self.backends {
            match backend.read_resource(id) {
                Ok(bytes) => return Ok(bytes),
                Err(SchemeError::ResourceNotFound(_)) => {}
                Err(e) => {
                    log::debug!("Backend could not read {id}: {e}");
                    first_error.get_or_insert(e);
                }
            }
        }

        Err(first_error.unwrap_or_else(|| SchemeError::ResourceNotFound(id.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::assert_ok;
    use std::collections::HashMap;

    struct MapLister {
        files: HashMap<String, Result<Vec<u8>, SchemeError>>,
        fail_listing: bool,
    }

    impl MapLister {
        fn new(files: &[(&str, &[u8])]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(id, bytes)| (id.to_string(), Ok(bytes.to_vec())))
                    .collect(),
                fail_listing: false,
            }
        }
    }

    impl ResourceLister for MapLister {
        fn list_resources(&self, _pattern: &str) -> SchemeResult<Vec<String>> {
            if self.fail_listing {
                return Err(SchemeError::unreadable("backend", "offline"));
            }
            let mut ids: Vec<String> = self.files.keys().cloned().collect();
            ids.sort();
            Ok(ids)
        }

        fn read_resource(&self, id: &str) -> SchemeResult<Vec<u8>> {
            self.files
                .get(id)
                .cloned()
                .unwrap_or_else(|| Err(SchemeError::ResourceNotFound(id.to_string())))
        }
    }

    #[test]
    fn test_union_keeps_first_occurrence() {
        let lister = CompositeLister::new()
            .with_backend(MapLister::new(&[("Packages/A/X.tmTheme", b"loose")]))
            .with_backend(MapLister::new(&[
                ("Packages/A/X.tmTheme", b"packed"),
                ("Packages/B/Y.tmTheme", b"packed"),
            ]));

        let ids = assert_ok!(lister.list_resources("*.tmTheme"));
        assert_eq!(ids, vec!["Packages/A/X.tmTheme", "Packages/B/Y.tmTheme"]);
        assert_eq!(assert_ok!(lister.read_resource("Packages/A/X.tmTheme")), b"loose");
        assert_eq!(assert_ok!(lister.read_resource("Packages/B/Y.tmTheme")), b"packed");
    }

    #[test]
    fn test_failing_backend_is_skipped() {
        let mut broken = MapLister::new(&[]);
        broken.fail_listing = true;
        let lister = CompositeLister::new()
            .with_backend(broken)
            .with_backend(MapLister::new(&[("Packages/B/Y.tmTheme", b"y")]));

        assert_eq!(assert_ok!(lister.list_resources("*")), vec!["Packages/B/Y.tmTheme"]);
    }

    #[test]
    fn test_read_reports_real_errors_over_not_found() {
        let mut unreadable = MapLister::new(&[]);
        unreadable.files.insert(
            "Packages/A/X.tmTheme".to_string(),
            Err(SchemeError::unreadable("Packages/A/X.tmTheme", "denied")),
        );
        let lister = CompositeLister::new()
            .with_backend(unreadable)
            .with_backend(MapLister::new(&[]));

        assert!(matches!(
            lister.read_resource("Packages/A/X.tmTheme"),
            Err(SchemeError::ResourceUnreadable { .. })
        ));
        assert!(matches!(
            lister.read_resource("Packages/Z/Z.tmTheme"),
            Err(SchemeError::ResourceNotFound(_))
        ));
    }
}
