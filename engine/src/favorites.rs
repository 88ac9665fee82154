use crate::common::SchemeResult;
use crate::settings::{FAVORITES_KEY, Scope, SettingsStore};
use serde_json::Value;
use std::collections::HashSet;

/// Reads the persisted favorites list, in stored order.
pub fn load_favorites(settings: &dyn SettingsStore) -> Vec<String> {
    match settings.get(&Scope::Favorites, FAVORITES_KEY) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(id) => Some(id),
                other => {
                    log::warn!("Ignoring non-string favorite entry: {other}");
                    None
                }
            })
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            log::warn!("Favorites setting is not a list, ignoring it: {other}");
            Vec::new()
        }
    }
}

/// Read-only membership view used while building a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: HashSet<String>,
}

impl FavoriteSet {
    pub fn load(settings: &dyn SettingsStore) -> Self {
        load_favorites(settings).into_iter().collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<String> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Favorites persisted in [`Scope::Favorites`] under `schemr_favorites`.
///
/// The stored value is an ordered list, but only membership matters: `add`
/// never creates a duplicate and `remove` of an absent id is a no-op.
pub struct FavoritesStore<'a> {
    settings: &'a mut dyn SettingsStore,
}

impl<'a> FavoritesStore<'a> {
    pub fn new(settings: &'a mut dyn SettingsStore) -> Self {
        Self { settings }
    }

    pub fn list(&self) -> Vec<String> {
        load_favorites(&*self.settings)
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.list().iter().any(|favorite| favorite == id)
    }

    /// Appends `id` unless already present, then persists.
    pub fn add(&mut self, id: &str) -> SchemeResult<()> {
        let mut favorites = self.list();
        if favorites.iter().any(|favorite| favorite == id) {
            log::debug!("{id} is already a favorite");
            return Ok(());
        }
        favorites.push(id.to_string());
        log::info!("Added favorite: {id}");
        self.save(favorites)
    }

    /// Removes the first occurrence of `id`, then persists. Absent ids are
    /// ignored.
    pub fn remove(&mut self, id: &str) -> SchemeResult<()> {
        let mut favorites = self.list();
        match favorites.iter().position(|favorite| favorite == id) {
            Some(index) => {
                favorites.remove(index);
                log::info!("Removed favorite: {id}");
                self.save(favorites)
            }
            None => {
                log::debug!("{id} is not a favorite, nothing to remove");
                Ok(())
            }
        }
    }

    fn save(&mut self, favorites: Vec<String>) -> SchemeResult<()> {
        let value = Value::Array(favorites.into_iter().map(Value::String).collect());
        self.settings.set(&Scope::Favorites, FAVORITES_KEY, value);
        self.settings.persist(&Scope::Favorites)
    }
}
