use crate::brightness::{DEFAULT_BRIGHTNESS_THRESHOLD, classify};
use crate::common::{SchemeError, SchemeResult};
use crate::favorites::FavoriteSet;
use crate::lister::{DEFAULT_RESOURCE_PATTERN, ResourceLister};
use crate::model::{Catalog, CatalogEntry, ThemeMetadata, ThemeResource};
use crate::parser::parse_background;
use crate::settings::{
    BRIGHTNESS_FLAGS_KEY, BRIGHTNESS_THRESHOLD_KEY, LEGACY_BRIGHTNESS_THRESHOLD_KEY, Scope,
    SettingsStore,
};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Paths of schemes generated by companion plugins. These are never listed.
pub const DEFAULT_NOISE_PATTERNS: [&str; 3] = [
    "SublimeLinter",
    "Color Highlighter",
    "Colorsublime - Themes/cache",
];

/// Case-insensitive regular expressions matched anywhere in a resource id.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    patterns: Vec<Regex>,
}

impl NoiseFilter {
    pub fn new<I, S>(patterns: I) -> SchemeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| SchemeError::InvalidPattern {
                        pattern: pattern.to_string(),
                        reason: e.to_string(),
                    })
            })
            .collect::<SchemeResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Filter that lets every id through.
    pub fn none() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    pub fn is_noise(&self, id: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(id))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

static DEFAULT_NOISE_FILTER: Lazy<NoiseFilter> = Lazy::new(|| {
    let escaped = DEFAULT_NOISE_PATTERNS.iter().map(|pattern| regex::escape(pattern));
    NoiseFilter::new(escaped).unwrap_or_else(|e| {
        log::error!("Default noise patterns failed to compile: {e}");
        NoiseFilter::none()
    })
});

impl Default for NoiseFilter {
    fn default() -> Self {
        DEFAULT_NOISE_FILTER.clone()
    }
}

/// Options recognized by the catalog builder.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub brightness_flags: bool,
    pub brightness_threshold: f64,
    pub noise_filters: NoiseFilter,
    /// Glob matched against file names when listing resources.
    pub resource_pattern: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            brightness_flags: true,
            brightness_threshold: DEFAULT_BRIGHTNESS_THRESHOLD,
            noise_filters: NoiseFilter::default(),
            resource_pattern: DEFAULT_RESOURCE_PATTERN.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Applies brightness options stored in the global preferences on top of
    /// this configuration.
    pub fn with_settings_overrides(mut self, settings: &dyn SettingsStore) -> Self {
        if let Some(flags) = settings.get_bool(&Scope::Global, BRIGHTNESS_FLAGS_KEY) {
            self.brightness_flags = flags;
        }

        let threshold = settings
            .get_f64(&Scope::Global, BRIGHTNESS_THRESHOLD_KEY)
            .or_else(|| settings.get_f64(&Scope::Global, LEGACY_BRIGHTNESS_THRESHOLD_KEY));
        if let Some(threshold) = threshold {
            self.brightness_threshold = threshold;
        }

        self
    }
}

/// Builds catalog snapshots. Read-only: no setting is modified.
pub struct CatalogBuilder<'a> {
    lister: &'a dyn ResourceLister,
    favorites: &'a FavoriteSet,
    config: &'a CatalogConfig,
}

/// Listed ids left out of a catalog, by reason.
#[derive(Debug, Default, PartialEq, Eq)]
struct Dropped {
    noise: usize,
    duplicates: usize,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(
        lister: &'a dyn ResourceLister,
        favorites: &'a FavoriteSet,
        config: &'a CatalogConfig,
    ) -> Self {
        Self {
            lister,
            favorites,
            config,
        }
    }

    /// Lists, filters, classifies and sorts every available scheme.
    ///
    /// Never fails: a listing error yields an empty catalog and a per-entry
    /// read or parse error yields an entry without metadata.
    pub fn build(&self) -> Catalog {
        let ids = match self.lister.list_resources(&self.config.resource_pattern) {
            Ok(ids) => ids,
            Err(e) => {
                log::error!("Failed to list color schemes: {e}");
                Vec::new()
            }
        };

        let (ids, dropped) = self.retain_listed(ids);
        let entries: Vec<CatalogEntry> = ids.into_iter().map(|id| self.entry(id)).collect();

        let unclassified = entries
            .iter()
            .filter(|entry| entry.metadata.brightness.is_none())
            .count();
        log::debug!(
            "Catalog built: {} schemes ({} filtered as noise, {} duplicate ids, {} without brightness)",
            entries.len(),
            dropped.noise,
            dropped.duplicates,
            unclassified
        );

        Catalog::from_entries(entries)
    }

    /// Drops noise ids, then repeated ids, keeping listing order.
    fn retain_listed(&self, ids: Vec<String>) -> (Vec<String>, Dropped) {
        let mut dropped = Dropped::default();
        let mut seen = std::collections::HashSet::new();
        let mut kept = Vec::with_capacity(ids.len());
        for id in ids {
            if self.config.noise_filters.is_noise(&id) {
                dropped.noise += 1;
            } else if !seen.insert(id.clone()) {
                dropped.duplicates += 1;
            } else {
                kept.push(id);
            }
        }
        (kept, dropped)
    }

    fn entry(&self, id: String) -> CatalogEntry {
        let metadata = if self.config.brightness_flags {
            self.metadata(&id)
        } else {
            ThemeMetadata::default()
        };
        let is_favorite = self.favorites.contains(&id);

        CatalogEntry {
            resource: ThemeResource::new(id),
            metadata,
            is_favorite,
        }
    }

    fn metadata(&self, id: &str) -> ThemeMetadata {
        match parse_background(self.lister, id) {
            Ok(rgb) => ThemeMetadata {
                background: Some(rgb),
                brightness: Some(classify(rgb, self.config.brightness_threshold)),
            },
            Err(e) => {
                if e.is_resource_error() {
                    log::warn!("No brightness for {id}: {e}");
                } else {
                    log::error!("Unexpected error reading {id}: {e}");
                }
                ThemeMetadata::default()
            }
        }
    }
}
