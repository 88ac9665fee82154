//! Cycling through catalog entries relative to the current selection.

use crate::common::{SchemeError, SchemeResult};
use crate::model::{CatalogEntry, display_name, resolve_index};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Cycle policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Prev,
    Random,
}

impl FromStr for Direction {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "next" => Ok(Direction::Next),
            "prev" | "previous" => Ok(Direction::Prev),
            "rand" | "random" => Ok(Direction::Random),
            _ => Err(SchemeError::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Next => write!(f, "next"),
            Direction::Prev => write!(f, "prev"),
            Direction::Random => write!(f, "rand"),
        }
    }
}

/// Index of `current_id`, or of the entry sharing its display identity
/// when the exact id is not listed.
pub fn position_of(entries: &[CatalogEntry], current_id: &str) -> SchemeResult<usize> {
    resolve_index(entries, current_id)
        .ok_or_else(|| SchemeError::SelectionNotFound(current_id.to_string()))
}

/// Starting index for a cycle or a picker. A missing or stale selection
/// starts from the first entry.
pub fn current_index(entries: &[CatalogEntry], current_id: Option<&str>) -> usize {
    let Some(current_id) = current_id else {
        return 0;
    };
    match position_of(entries, current_id) {
        Ok(index) => index,
        Err(e) => {
            log::debug!("{e}, starting from the first entry");
            0
        }
    }
}

/// Picks the entry following `current_id` under `direction`. Pure: nothing
/// is persisted.
pub fn select<'a, R: Rng>(
    entries: &'a [CatalogEntry],
    current_id: Option<&str>,
    direction: Direction,
    rng: &mut R,
) -> SchemeResult<&'a CatalogEntry> {
    if entries.is_empty() {
        return Err(SchemeError::EmptyCatalog);
    }

    let len = entries.len();
    let index = current_index(entries, current_id);
    let next = match direction {
        Direction::Next => (index + 1) % len,
        Direction::Prev => (index + len - 1) % len,
        Direction::Random => rng.gen_range(0..len),
    };

    Ok(&entries[next])
}

/// Restricts the candidates of a cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleFilter {
    pub favorites_only: bool,
    /// Keeps entries whose display name contains this substring. The entry
    /// matching the current selection is always kept so cycling can move
    /// away from it.
    pub name_contains: Option<String>,
}

impl CycleFilter {
    pub fn favorites() -> Self {
        Self {
            favorites_only: true,
            name_contains: None,
        }
    }

    pub fn with_name(mut self, needle: impl Into<String>) -> Self {
        self.name_contains = Some(needle.into());
        self
    }

    /// Entries passing the filter, order preserved.
    pub fn apply(&self, entries: &[CatalogEntry], current_id: Option<&str>) -> Vec<CatalogEntry> {
        let current_name = current_id.map(display_name);
        entries
            .iter()
            .filter(|entry| !self.favorites_only || entry.is_favorite)
            .filter(|entry| match &self.name_contains {
                Some(needle) => {
                    entry.name().contains(needle.as_str())
                        || current_name.as_deref() == Some(entry.name())
                }
                None => true,
            })
            .cloned()
            .collect()
    }
}

/// [`select`] over the entries passing `filter`.
pub fn select_filtered<R: Rng>(
    entries: &[CatalogEntry],
    current_id: Option<&str>,
    direction: Direction,
    filter: &CycleFilter,
    rng: &mut R,
) -> SchemeResult<CatalogEntry> {
    let candidates = filter.apply(entries, current_id);
    select(&candidates, current_id, direction, rng).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ThemeMetadata, ThemeResource};
    use claims::{assert_err, assert_ok};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn entry(id: &str, is_favorite: bool) -> CatalogEntry {
        CatalogEntry {
            resource: ThemeResource::new(id),
            metadata: ThemeMetadata::default(),
            is_favorite,
        }
    }

    fn catalog() -> Vec<CatalogEntry> {
        vec![
            entry("Packages/A/Monokai.tmTheme", true),
            entry("Packages/A/Solarized.tmTheme", false),
            entry("Packages/A/Zenburn.tmTheme", true),
        ]
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_next_and_prev_wrap_around() {
        let entries = catalog();
        let next = assert_ok!(select(
            &entries,
            Some("Packages/A/Zenburn.tmTheme"),
            Direction::Next,
            &mut rng()
        ));
        assert_eq!(next.name(), "Monokai");

        let prev = assert_ok!(select(
            &entries,
            Some("Packages/A/Monokai.tmTheme"),
            Direction::Prev,
            &mut rng()
        ));
        assert_eq!(prev.name(), "Zenburn");
    }

    #[test]
    fn test_stale_selection_starts_from_first_entry() {
        let entries = catalog();
        let prev = assert_ok!(select(
            &entries,
            Some("Packages/Gone/DeletedTheme.tmTheme"),
            Direction::Prev,
            &mut rng()
        ));
        assert_eq!(prev.name(), "Zenburn");

        let next = assert_ok!(select(&entries, None, Direction::Next, &mut rng()));
        assert_eq!(next.name(), "Solarized");
    }

    #[test]
    fn test_identity_matches_across_packages() {
        let entries = catalog();
        let next = assert_ok!(select(
            &entries,
            Some("Packages/User/SublimeLinter/Monokai (SL).tmTheme"),
            Direction::Next,
            &mut rng()
        ));
        assert_eq!(next.name(), "Solarized");
    }

    #[test]
    fn test_same_named_entries_are_cycled_by_id() {
        let entries = vec![
            entry("Packages/Color Scheme - Default/Monokai.tmTheme", false),
            entry("Packages/User/Monokai.tmTheme", false),
            entry("Packages/User/Zenburn.tmTheme", false),
        ];

        let mut current = entries[0].id().to_string();
        let mut visited = Vec::new();
        for _ in 0..entries.len() {
            current = assert_ok!(select(&entries, Some(&current), Direction::Next, &mut rng()))
                .id()
                .to_string();
            visited.push(current.clone());
        }
        assert_eq!(
            visited,
            vec![
                "Packages/User/Monokai.tmTheme",
                "Packages/User/Zenburn.tmTheme",
                "Packages/Color Scheme - Default/Monokai.tmTheme",
            ]
        );

        let prev = assert_ok!(select(
            &entries,
            Some("Packages/User/Monokai.tmTheme"),
            Direction::Prev,
            &mut rng()
        ));
        assert_eq!(prev.id(), "Packages/Color Scheme - Default/Monokai.tmTheme");
    }

    #[test]
    fn test_random_stays_in_range_and_is_reproducible() {
        let entries = catalog();
        let first = assert_ok!(select(&entries, None, Direction::Random, &mut rng())).clone();
        let second = assert_ok!(select(&entries, None, Direction::Random, &mut rng())).clone();
        assert_eq!(first, second);
        assert!(entries.contains(&first));
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let result = select(&[], Some("x"), Direction::Next, &mut rng());
        assert_eq!(assert_err!(result), SchemeError::EmptyCatalog);
    }

    #[test]
    fn test_favorites_filter() {
        let entries = catalog();
        let chosen = assert_ok!(select_filtered(
            &entries,
            Some("Packages/A/Monokai.tmTheme"),
            Direction::Next,
            &CycleFilter::favorites(),
            &mut rng()
        ));
        assert_eq!(chosen.name(), "Zenburn");
    }

    #[test]
    fn test_name_filter_keeps_current_entry() {
        let entries = catalog();
        let filter = CycleFilter::default().with_name("burn");
        let kept = filter.apply(&entries, Some("Packages/A/Monokai.tmTheme"));
        let names: Vec<&str> = kept.iter().map(CatalogEntry::name).collect();
        assert_eq!(names, vec!["Monokai", "Zenburn"]);

        let empty = CycleFilter::default().with_name("nothing");
        let result = select_filtered(&entries, None, Direction::Next, &empty, &mut rng());
        assert_eq!(assert_err!(result), SchemeError::EmptyCatalog);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!(assert_ok!("next".parse::<Direction>()), Direction::Next);
        assert_eq!(assert_ok!("previous".parse::<Direction>()), Direction::Prev);
        assert_eq!(assert_ok!("RAND".parse::<Direction>()), Direction::Random);
        assert_err!("sideways".parse::<Direction>());
        assert_eq!(Direction::Prev.to_string(), "prev");
    }
}
