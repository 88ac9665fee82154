//! Theme resource discovery.
//!
//! Every backend exposes the same virtual namespace rooted at `Packages/`,
//! so the catalog never knows whether an id came from a loose directory, a
//! zipped bundle or the built-in set.

pub mod archive;
pub mod builtin;
pub mod composite;
pub mod filesystem;

pub use archive::ArchiveLister;
pub use builtin::BuiltinLister;
pub use composite::CompositeLister;
pub use filesystem::DirectoryLister;

use crate::common::{SchemeError, SchemeResult};
use glob::Pattern;

/// Root segment shared by every resource id.
pub const RESOURCE_ROOT: &str = "Packages";

/// Glob matched against file names when discovering color schemes.
pub const DEFAULT_RESOURCE_PATTERN: &str = "*.tmTheme";

/// Source of theme resources.
///
/// Implementations must return ids that [`read_resource`] accepts back.
/// A missing id is reported as [`SchemeError::ResourceNotFound`] so that a
/// [`CompositeLister`] can fall through to the next backend.
///
/// [`read_resource`]: ResourceLister::read_resource
pub trait ResourceLister {
    /// Lists ids whose file name matches the glob `pattern`.
    fn list_resources(&self, pattern: &str) -> SchemeResult<Vec<String>>;

    /// Reads the raw content behind `id`.
    fn read_resource(&self, id: &str) -> SchemeResult<Vec<u8>>;
}

impl<T: ResourceLister + ?Sized> ResourceLister for Box<T> {
    fn list_resources(&self, pattern: &str) -> SchemeResult<Vec<String>> {
        (**self).list_resources(pattern)
    }

    fn read_resource(&self, id: &str) -> SchemeResult<Vec<u8>> {
        (**self).read_resource(id)
    }
}

pub(crate) fn compile_pattern(pattern: &str) -> SchemeResult<Pattern> {
    Pattern::new(pattern).map_err(|e| SchemeError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Matches the last segment of a `/`-separated path against the glob.
pub(crate) fn file_name_matches(pattern: &Pattern, path: &str) -> bool {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    !file_name.is_empty() && pattern.matches(file_name)
}

/// Splits `Packages/<package>/<rest>` into `(package, rest)`.
pub(crate) fn split_resource_id(id: &str) -> Option<(&str, &str)> {
    let relative = id.strip_prefix(RESOURCE_ROOT)?.strip_prefix('/')?;
    let (package, rest) = relative.split_once('/')?;
    if package.is_empty() || rest.is_empty() || has_parent_segment(relative) {
        return None;
    }
    Some((package, rest))
}

pub(crate) fn has_parent_segment(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| segment == "..")
}
