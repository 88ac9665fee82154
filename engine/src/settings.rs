//! Settings collaborator used for favorites and the active scheme.

use crate::common::SchemeResult;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Key holding the active color scheme in preference scopes.
pub const COLOR_SCHEME_KEY: &str = "color_scheme";
/// Key holding the favorites list in [`Scope::Favorites`].
pub const FAVORITES_KEY: &str = "schemr_favorites";
pub const BRIGHTNESS_FLAGS_KEY: &str = "schemr_brightness_flags";
pub const BRIGHTNESS_THRESHOLD_KEY: &str = "schemr_brightness_threshold";
/// Misspelled key written by earlier releases; still honored on read.
pub const LEGACY_BRIGHTNESS_THRESHOLD_KEY: &str = "schemr_brightness_theshold";
pub const PREVIEW_SELECTION_KEY: &str = "schemr_preview_selection";

/// A settings namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Global preferences: active scheme and brightness options.
    Global,
    /// Favorites, kept apart from the global preferences.
    Favorites,
    /// Per-syntax preferences, named after the syntax file stem.
    Syntax(String),
}

impl Scope {
    /// Per-syntax scope for a syntax definition path such as
    /// `Packages/Python/Python.sublime-syntax`.
    pub fn for_syntax_path(syntax_path: &str) -> Scope {
        let file_name = syntax_path.rsplit(['/', '\\']).next().unwrap_or(syntax_path);
        let stem = match file_name.rfind('.') {
            Some(dot) if dot > 0 => &file_name[..dot],
            _ => file_name,
        };
        Scope::Syntax(stem.to_string())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::Favorites => write!(f, "favorites"),
            Scope::Syntax(name) => write!(f, "syntax:{name}"),
        }
    }
}

/// Key/value preferences grouped by [`Scope`].
///
/// `set` and `erase` only change the in-memory view; nothing reaches durable
/// storage until [`persist`] is called for the scope.
///
/// [`persist`]: SettingsStore::persist
pub trait SettingsStore {
    fn get(&self, scope: &Scope, key: &str) -> Option<Value>;

    fn set(&mut self, scope: &Scope, key: &str, value: Value);

    fn erase(&mut self, scope: &Scope, key: &str);

    fn persist(&mut self, scope: &Scope) -> SchemeResult<()>;

    fn get_or(&self, scope: &Scope, key: &str, default: Value) -> Value {
        self.get(scope, key).unwrap_or(default)
    }

    fn get_bool(&self, scope: &Scope, key: &str) -> Option<bool> {
        self.get(scope, key).and_then(|value| value.as_bool())
    }

    fn get_f64(&self, scope: &Scope, key: &str) -> Option<f64> {
        self.get(scope, key).and_then(|value| value.as_f64())
    }

    fn get_string(&self, scope: &Scope, key: &str) -> Option<String> {
        self.get(scope, key)
            .and_then(|value| value.as_str().map(str::to_string))
    }
}

/// Active scheme id of a scope; `None` when unset or empty.
pub fn active_scheme(store: &dyn SettingsStore, scope: &Scope) -> Option<String> {
    store
        .get_string(scope, COLOR_SCHEME_KEY)
        .filter(|id| !id.is_empty())
}

/// Sets the active scheme without persisting it.
pub fn apply_scheme(store: &mut dyn SettingsStore, scope: &Scope, id: &str) {
    store.set(scope, COLOR_SCHEME_KEY, Value::String(id.to_string()));
}

/// Sets and persists the active scheme.
pub fn save_scheme(store: &mut dyn SettingsStore, scope: &Scope, id: &str) -> SchemeResult<()> {
    apply_scheme(store, scope, id);
    store.persist(scope)
}

/// Removes the active scheme and persists the scope.
pub fn erase_scheme(store: &mut dyn SettingsStore, scope: &Scope) -> SchemeResult<()> {
    store.erase(scope, COLOR_SCHEME_KEY);
    store.persist(scope)
}

/// In-memory store; `persist` only counts calls.
#[derive(Debug, Default, Clone)]
pub struct MemorySettings {
    values: HashMap<Scope, HashMap<String, Value>>,
    persisted: HashMap<Scope, usize>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, scope: Scope, key: &str, value: Value) -> Self {
        self.set(&scope, key, value);
        self
    }

    /// Number of `persist` calls seen for `scope`.
    pub fn persist_count(&self, scope: &Scope) -> usize {
        self.persisted.get(scope).copied().unwrap_or(0)
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, scope: &Scope, key: &str) -> Option<Value> {
        self.values.get(scope).and_then(|values| values.get(key)).cloned()
    }

    fn set(&mut self, scope: &Scope, key: &str, value: Value) {
        self.values
            .entry(scope.clone())
            .or_default()
            .insert(key.to_string(), value);
    }

    fn erase(&mut self, scope: &Scope, key: &str) {
        if let Some(values) = self.values.get_mut(scope) {
            values.remove(key);
        }
    }

    fn persist(&mut self, scope: &Scope) -> SchemeResult<()> {
        *self.persisted.entry(scope.clone()).or_default() += 1;
        Ok(())
    }
}
