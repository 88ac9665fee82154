use crate::catalog::{CatalogBuilder, CatalogConfig};
use crate::common::SchemeResult;
use crate::favorites::{FavoriteSet, FavoritesStore, load_favorites};
use crate::lister::ResourceLister;
use crate::model::{Catalog, CatalogEntry};
use crate::preview::PreviewSession;
use crate::selector::{CycleFilter, Direction, select_filtered};
use crate::settings::{
    PREVIEW_SELECTION_KEY, Scope, SettingsStore, active_scheme, erase_scheme, save_scheme,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Entry point for every scheme command.
///
/// SchemeManager owns the resource lister, the settings store and the
/// catalog configuration. Nothing is cached: each command rebuilds the
/// catalog, so schemes installed or removed since the last command are
/// picked up immediately.
///
/// # Examples
///
/// ```no_run
/// use engine::lister::BuiltinLister;
/// use engine::manager::SchemeManager;
/// use engine::selector::{CycleFilter, Direction};
/// use engine::settings::{MemorySettings, Scope};
///
/// let mut manager = SchemeManager::new(BuiltinLister::new(), MemorySettings::new());
/// let chosen = manager.cycle(&Scope::Global, Direction::Next, &CycleFilter::default())?;
/// println!("Scheme: {}", chosen.label());
/// # Ok::<(), engine::common::SchemeError>(())
/// ```
pub struct SchemeManager<L: ResourceLister, S: SettingsStore> {
    lister: L,
    settings: S,
    config: CatalogConfig,
    preview_selection: bool,
    rng: StdRng,
}

impl<L: ResourceLister, S: SettingsStore> SchemeManager<L, S> {
    pub fn new(lister: L, settings: S) -> Self {
        Self {
            lister,
            settings,
            config: CatalogConfig::default(),
            preview_selection: true,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    /// Default for live preview when the settings store does not set
    /// `schemr_preview_selection`.
    pub fn with_preview_selection(mut self, enabled: bool) -> Self {
        self.preview_selection = enabled;
        self
    }

    /// Makes random cycling reproducible.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// Catalog configuration with the settings-store overrides applied.
    pub fn effective_config(&self) -> CatalogConfig {
        self.config.clone().with_settings_overrides(&self.settings)
    }

    pub fn preview_enabled(&self) -> bool {
        self.settings
            .get_bool(&Scope::Global, PREVIEW_SELECTION_KEY)
            .unwrap_or(self.preview_selection)
    }

    pub fn load_catalog(&self) -> Catalog {
        let favorites = FavoriteSet::load(&self.settings);
        let config = self.effective_config();
        CatalogBuilder::new(&self.lister, &favorites, &config).build()
    }

    pub fn favorite_catalog(&self) -> Catalog {
        self.load_catalog().favorites()
    }

    pub fn active_scheme(&self, scope: &Scope) -> Option<String> {
        active_scheme(&self.settings, scope)
    }

    /// Moves the active scheme of `scope` one step in `direction` and
    /// persists the result.
    pub fn cycle(
        &mut self,
        scope: &Scope,
        direction: Direction,
        filter: &CycleFilter,
    ) -> SchemeResult<CatalogEntry> {
        let catalog = self.load_catalog();
        let current = self.active_scheme(scope);
        let chosen = select_filtered(
            catalog.entries(),
            current.as_deref(),
            direction,
            filter,
            &mut self.rng,
        )?;

        save_scheme(&mut self.settings, scope, chosen.id())?;
        log::info!("Cycled {direction} in {scope}: {}", chosen.id());
        Ok(chosen)
    }

    /// Whether `scope` sets a scheme of its own.
    pub fn has_scheme(&self, scope: &Scope) -> bool {
        self.active_scheme(scope).is_some()
    }

    /// Removes the scheme set in `scope` and persists the scope. Returns the
    /// id that was set, `None` when there was nothing to remove.
    pub fn reset_scheme(&mut self, scope: &Scope) -> SchemeResult<Option<String>> {
        let Some(previous) = self.active_scheme(scope) else {
            log::debug!("No scheme set in {scope}, nothing to reset");
            return Ok(None);
        };
        erase_scheme(&mut self.settings, scope)?;
        log::info!("Reset {scope}, was {previous}");
        Ok(Some(previous))
    }

    /// Catalog id for `id`, matching the exact id before display identity.
    pub fn find_scheme(&self, id: &str) -> Option<String> {
        self.load_catalog()
            .find_by_identity(id)
            .map(|entry| entry.id().to_string())
    }

    /// Adds the global active scheme to the favorites. Returns the id added,
    /// or `None` when the active scheme is not part of the catalog.
    pub fn favorite_current(&mut self) -> SchemeResult<Option<String>> {
        let Some(id) = self.resolve_current() else {
            log::warn!("Active scheme is not in the catalog, nothing to favorite");
            return Ok(None);
        };
        FavoritesStore::new(&mut self.settings).add(&id)?;
        Ok(Some(id))
    }

    /// Removes the global active scheme from the favorites.
    pub fn unfavorite_current(&mut self) -> SchemeResult<Option<String>> {
        let Some(id) = self.resolve_current() else {
            log::warn!("Active scheme is not in the catalog, nothing to unfavorite");
            return Ok(None);
        };
        FavoritesStore::new(&mut self.settings).remove(&id)?;
        Ok(Some(id))
    }

    pub fn is_current_favorite(&self) -> bool {
        self.resolve_current()
            .is_some_and(|id| FavoriteSet::load(&self.settings).contains(&id))
    }

    pub fn can_list_favorites(&self) -> bool {
        !load_favorites(&self.settings).is_empty()
    }

    pub fn can_cycle_favorites(&self) -> bool {
        load_favorites(&self.settings).len() > 1
    }

    /// Opens an interactive picker over the full or favorites catalog.
    pub fn open_picker(
        &mut self,
        scope: Scope,
        favorites_only: bool,
    ) -> SchemeResult<PreviewSession<'_>> {
        let preview = self.preview_enabled();
        self.open_picker_with(scope, favorites_only, preview)
    }

    /// [`open_picker`](Self::open_picker) with live preview forced on or off.
    pub fn open_picker_with(
        &mut self,
        scope: Scope,
        favorites_only: bool,
        preview: bool,
    ) -> SchemeResult<PreviewSession<'_>> {
        let catalog = if favorites_only {
            self.favorite_catalog()
        } else {
            self.load_catalog()
        };
        PreviewSession::open(&mut self.settings, scope, catalog.into_entries(), preview)
    }

    fn resolve_current(&self) -> Option<String> {
        self.active_scheme(&Scope::Global)
            .and_then(|current| self.find_scheme(&current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::SchemeError;
    use crate::lister::BuiltinLister;
    use crate::preview::PreviewOutcome;
    use crate::settings::{BRIGHTNESS_FLAGS_KEY, COLOR_SCHEME_KEY, FAVORITES_KEY, MemorySettings};
    use claims::{assert_err, assert_none, assert_ok, assert_some};
    use serde_json::json;

    const DAWN: &str = "Packages/Color Scheme - Default/Dawn.tmTheme";
    const MONOKAI: &str = "Packages/Color Scheme - Default/Monokai.tmTheme";
    const ZENBURN: &str = "Packages/Color Scheme - Default/Zenburn.tmTheme";

    fn manager(settings: MemorySettings) -> SchemeManager<BuiltinLister, MemorySettings> {
        SchemeManager::new(BuiltinLister::new(), settings).with_rng_seed(42)
    }

    fn with_active(id: &str) -> MemorySettings {
        MemorySettings::new().with_value(Scope::Global, COLOR_SCHEME_KEY, json!(id))
    }

    #[test]
    fn test_catalog_is_sorted_and_labelled() {
        let catalog = manager(MemorySettings::new()).load_catalog();
        let labels: Vec<String> = catalog.iter().map(CatalogEntry::label).collect();
        assert_eq!(
            labels,
            vec![
                "Dawn   [Light]",
                "Monokai   [Dark]",
                "Solarized (Light)   [Light]",
                "Zenburn   [Dark]",
            ]
        );
    }

    #[test]
    fn test_brightness_flags_from_settings() {
        let settings =
            MemorySettings::new().with_value(Scope::Global, BRIGHTNESS_FLAGS_KEY, json!(false));
        let catalog = manager(settings).load_catalog();
        assert!(catalog.iter().all(|entry| entry.metadata.brightness.is_none()));
    }

    #[test]
    fn test_cycle_persists_in_scope() {
        let mut manager = manager(with_active(ZENBURN));

        let chosen = assert_ok!(manager.cycle(&Scope::Global, Direction::Next, &CycleFilter::default()));
        assert_eq!(chosen.id(), DAWN);
        assert_eq!(manager.active_scheme(&Scope::Global).as_deref(), Some(DAWN));
        assert_eq!(manager.settings().persist_count(&Scope::Global), 1);
    }

    #[test]
    fn test_cycle_in_syntax_scope_leaves_global_alone() {
        let mut manager = manager(with_active(ZENBURN));
        let python = Scope::Syntax("Python".to_string());

        let chosen = assert_ok!(manager.cycle(&python, Direction::Prev, &CycleFilter::default()));
        assert_eq!(chosen.id(), ZENBURN);
        assert_eq!(manager.active_scheme(&python).as_deref(), Some(ZENBURN));
        assert_eq!(manager.settings().persist_count(&Scope::Global), 0);
    }

    #[test]
    fn test_reset_syntax_scheme() {
        let python = Scope::Syntax("Python".to_string());
        let settings = with_active(MONOKAI).with_value(python.clone(), COLOR_SCHEME_KEY, json!(ZENBURN));
        let mut manager = manager(settings);
        assert!(manager.has_scheme(&python));

        assert_eq!(assert_ok!(manager.reset_scheme(&python)).as_deref(), Some(ZENBURN));
        assert!(!manager.has_scheme(&python));
        assert_eq!(manager.settings().persist_count(&python), 1);
        assert_eq!(manager.active_scheme(&Scope::Global).as_deref(), Some(MONOKAI));

        assert_none!(assert_ok!(manager.reset_scheme(&python)));
        assert_eq!(manager.settings().persist_count(&python), 1);
    }

    #[test]
    fn test_cycle_favorites_requires_favorites() {
        let mut manager = manager(MemorySettings::new());
        let result = manager.cycle(&Scope::Global, Direction::Next, &CycleFilter::favorites());
        assert_eq!(assert_err!(result), SchemeError::EmptyCatalog);
    }

    #[test]
    fn test_favorite_and_unfavorite_current() {
        let mut manager = manager(with_active("Packages/User/SublimeLinter/Monokai (SL).tmTheme"));
        assert!(!manager.is_current_favorite());
        assert!(!manager.can_list_favorites());

        assert_eq!(assert_ok!(manager.favorite_current()).as_deref(), Some(MONOKAI));
        assert!(manager.is_current_favorite());
        assert!(manager.can_list_favorites());
        assert!(!manager.can_cycle_favorites());
        assert_eq!(manager.favorite_catalog().len(), 1);

        assert_some!(assert_ok!(manager.unfavorite_current()));
        assert!(!manager.is_current_favorite());
        assert_eq!(
            manager.settings().get(&Scope::Favorites, FAVORITES_KEY),
            Some(json!([]))
        );
    }

    #[test]
    fn test_unknown_current_scheme_is_not_favorited() {
        let mut manager = manager(with_active("Packages/Gone/DeletedTheme.tmTheme"));
        assert_none!(assert_ok!(manager.favorite_current()));
        assert_none!(manager.find_scheme("Packages/Gone/DeletedTheme.tmTheme"));
        assert_eq!(manager.settings().persist_count(&Scope::Favorites), 0);
    }

    #[test]
    fn test_can_cycle_favorites_needs_two() {
        let settings = MemorySettings::new().with_value(
            Scope::Favorites,
            FAVORITES_KEY,
            json!([MONOKAI, ZENBURN]),
        );
        assert!(manager(settings).can_cycle_favorites());
    }

    #[test]
    fn test_picker_commits_and_respects_preview_setting() {
        let settings = with_active(MONOKAI).with_value(
            Scope::Global,
            PREVIEW_SELECTION_KEY,
            json!(false),
        );
        let mut manager = manager(settings).with_preview_selection(true);
        assert!(!manager.preview_enabled());

        let mut session = assert_ok!(manager.open_picker(Scope::Global, false));
        assert_eq!(session.initial_index(), 1);
        assert_ok!(session.on_highlight(1));
        assert_ok!(session.on_highlight(3));
        let outcome = assert_ok!(session.on_confirm(Some(3)));
        assert!(matches!(outcome, PreviewOutcome::Committed { ref id, .. } if id == ZENBURN));

        assert_eq!(manager.active_scheme(&Scope::Global).as_deref(), Some(ZENBURN));
    }

    #[test]
    fn test_favorites_picker_on_empty_favorites() {
        let mut manager = manager(MemorySettings::new());
        assert!(matches!(
            manager.open_picker(Scope::Global, true),
            Err(SchemeError::EmptyCatalog)
        ));
    }
}
