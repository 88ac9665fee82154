use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Suffixes appended by companion plugins to the schemes they generate.
/// Stripping them lets a generated copy share the identity of its source.
const COMPANION_SUFFIXES: [&str; 2] = [" (SL)", " Color Highlighter"];

/// Identifies one theme file.
///
/// The `id` is a virtual path (`Packages/<package>/<file>`) that may point
/// into a loose directory, a zipped bundle or the built-in set. It is unique
/// inside one catalog snapshot only.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct ThemeResource {
    pub id: String,
    pub display_name: String,
}

impl ThemeResource {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let display_name = display_name(&id);
        Self { id, display_name }
    }
}

/// Derives the display name of a resource id: last path segment, extension
/// stripped, companion-plugin suffixes removed.
///
/// ```
/// use engine::model::display_name;
///
/// assert_eq!(display_name("Packages/Theme - Monokai/Monokai.tmTheme"), "Monokai");
/// assert_eq!(display_name("Packages/User/SublimeLinter/Monokai (SL).tmTheme"), "Monokai");
/// ```
pub fn display_name(id: &str) -> String {
    let segment = id.rsplit(['/', '\\']).next().unwrap_or(id);
    let mut name = match segment.rfind('.') {
        Some(dot) if dot > 0 => &segment[..dot],
        _ => segment,
    };

    for suffix in COMPANION_SUFFIXES {
        if name.len() >= suffix.len() {
            let split = name.len() - suffix.len();
            if name.is_char_boundary(split) && name[split..].eq_ignore_ascii_case(suffix) {
                name = &name[..split];
            }
        }
    }

    name.to_string()
}

/// An 8-bit RGB triple. Serializes as `#rrggbb`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Perceptual brightness bucket of a scheme background.
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Brightness {
    Dark,
    Light,
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Brightness::Dark => write!(f, "Dark"),
            Brightness::Light => write!(f, "Light"),
        }
    }
}

/// Metadata derived from the theme file. Both fields are absent when the
/// theme could not be read or brightness flags are disabled.
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ThemeMetadata {
    pub background: Option<Rgb>,
    pub brightness: Option<Brightness>,
}

/// One row of a catalog snapshot.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub resource: ThemeResource,
    #[serde(flatten)]
    pub metadata: ThemeMetadata,
    pub is_favorite: bool,
}

impl CatalogEntry {
    pub fn id(&self) -> &str {
        &self.resource.id
    }

    pub fn name(&self) -> &str {
        &self.resource.display_name
    }

    /// Label shown by presentation surfaces: name, brightness flag, star.
    pub fn label(&self) -> String {
        let mut label = self.resource.display_name.clone();
        if let Some(brightness) = self.metadata.brightness {
            label.push_str(&format!("   [{brightness}]"));
        }
        if self.is_favorite {
            label.push_str("   \u{2605}");
        }
        label
    }

    /// Catalog ordering: case-insensitive name, ties broken by id.
    pub fn sort_order(&self, other: &Self) -> Ordering {
        self.name()
            .to_lowercase()
            .cmp(&other.name().to_lowercase())
            .then_with(|| self.id().cmp(other.id()))
    }
}

/// Index of the entry with exactly `id`, falling back to the first entry
/// sharing its display identity. Same-named schemes from different packages
/// stay distinct as long as the id is still listed.
pub fn resolve_index(entries: &[CatalogEntry], id: &str) -> Option<usize> {
    entries.iter().position(|entry| entry.id() == id).or_else(|| {
        let name = display_name(id);
        entries.iter().position(|entry| entry.name() == name)
    })
}

/// `(label, id)` pair handed to a presentation surface.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PanelItem {
    pub label: String,
    pub id: String,
}

impl From<&CatalogEntry> for PanelItem {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            label: entry.label(),
            id: entry.id().to_string(),
        }
    }
}

/// Immutable, sorted snapshot of every discoverable scheme.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Sorts the given entries into catalog order.
    pub fn from_entries(mut entries: Vec<CatalogEntry>) -> Self {
        entries.sort_by(CatalogEntry::sort_order);
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<CatalogEntry> {
        self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Catalog reduced to favorited entries, order preserved.
    pub fn favorites(&self) -> Catalog {
        Catalog {
            entries: self
                .entries
                .iter()
                .filter(|entry| entry.is_favorite)
                .cloned()
                .collect(),
        }
    }

    /// Entry for `id`, see [`resolve_index`].
    pub fn find_by_identity(&self, id: &str) -> Option<&CatalogEntry> {
        resolve_index(&self.entries, id).map(|index| &self.entries[index])
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
