//! Settings store backed by `.sublime-settings` JSON files.
//!
//! One file per scope inside the settings directory:
//!
//! | scope | file |
//! |-------|------|
//! | global | `Preferences.sublime-settings` |
//! | favorites | `SchemrFavorites.sublime-settings` |
//! | syntax `Python` | `Python.sublime-settings` |
//!
//! Files are read on first access and written back on `persist`. Comments and
//! trailing commas are accepted on read (JSON5); a written file is plain JSON.

use engine::settings::{Scope, SettingsStore};
use engine::{SchemeError, SchemeResult};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const PREFERENCES_FILE: &str = "Preferences.sublime-settings";
pub const FAVORITES_FILE: &str = "SchemrFavorites.sublime-settings";
pub const SETTINGS_EXTENSION: &str = "sublime-settings";

pub fn settings_file_name(scope: &Scope) -> String {
    match scope {
        Scope::Global => PREFERENCES_FILE.to_string(),
        Scope::Favorites => FAVORITES_FILE.to_string(),
        Scope::Syntax(name) => format!("{name}.{SETTINGS_EXTENSION}"),
    }
}

#[derive(Debug, Default)]
struct ScopeFile {
    values: Map<String, Value>,
    /// Set when the file exists but cannot be used; such a file is never
    /// overwritten.
    load_error: Option<String>,
}

#[derive(Debug)]
pub struct JsonSettingsStore {
    dir: PathBuf,
    scopes: RefCell<HashMap<Scope, ScopeFile>>,
}

impl JsonSettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            scopes: RefCell::new(HashMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, scope: &Scope) -> PathBuf {
        self.dir.join(settings_file_name(scope))
    }

    fn with_scope<T>(&self, scope: &Scope, f: impl FnOnce(&mut ScopeFile) -> T) -> T {
        let mut scopes = self.scopes.borrow_mut();
        let file = scopes
            .entry(scope.clone())
            .or_insert_with(|| load_scope_file(&self.path_for(scope)));
        f(file)
    }
}

fn load_scope_file(path: &Path) -> ScopeFile {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return ScopeFile::default(),
        Err(e) => {
            log::warn!("Cannot read settings file {}: {e}", path.display());
            return ScopeFile {
                values: Map::new(),
                load_error: Some(e.to_string()),
            };
        }
    };

    match parse_settings(&content) {
        Ok(values) => ScopeFile {
            values,
            load_error: None,
        },
        Err(e) => {
            log::warn!("Ignoring malformed settings file {}: {e}", path.display());
            ScopeFile {
                values: Map::new(),
                load_error: Some(e),
            }
        }
    }
}

/// Parses a settings document: strict JSON first, then JSON5 for the
/// comments and trailing commas editors accept. Blank input is an empty
/// object.
pub fn parse_settings(content: &str) -> Result<Map<String, Value>, String> {
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    if content.trim().is_empty() {
        return Ok(Map::new());
    }

    let document = match serde_json::from_str::<Value>(content) {
        Ok(document) => document,
        Err(json_error) => json5::from_str::<Value>(content).map_err(|json5_error| {
            format!("parse failed as JSON ({json_error}) and JSON5 ({json5_error})")
        })?,
    };

    match document {
        Value::Object(values) => Ok(values),
        _ => Err("top-level value is not an object".to_string()),
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get(&self, scope: &Scope, key: &str) -> Option<Value> {
        self.with_scope(scope, |file| file.values.get(key).cloned())
    }

    fn set(&mut self, scope: &Scope, key: &str, value: Value) {
        self.with_scope(scope, |file| {
            file.values.insert(key.to_string(), value);
        });
    }

    fn erase(&mut self, scope: &Scope, key: &str) {
        self.with_scope(scope, |file| {
            file.values.remove(key);
        });
    }

    fn persist(&mut self, scope: &Scope) -> SchemeResult<()> {
        let path = self.path_for(scope);
        let document = self.with_scope(scope, |file| match &file.load_error {
            Some(e) => Err(SchemeError::Settings(format!(
                "refusing to overwrite unreadable {}: {e}",
                path.display()
            ))),
            None => serde_json::to_string_pretty(&Value::Object(file.values.clone()))
                .map_err(|e| SchemeError::Settings(e.to_string())),
        })?;

        fs::create_dir_all(&self.dir).map_err(|e| {
            SchemeError::Settings(format!("cannot create {}: {e}", self.dir.display()))
        })?;

        let tmp = path.with_extension(format!("{SETTINGS_EXTENSION}.tmp"));
        fs::write(&tmp, format!("{document}\n"))
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|e| SchemeError::Settings(format!("cannot write {}: {e}", path.display())))?;

        log::debug!("Saved {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};
    use serde_json::json;

    #[test]
    fn test_file_names_per_scope() {
        assert_eq!(settings_file_name(&Scope::Global), "Preferences.sublime-settings");
        assert_eq!(
            settings_file_name(&Scope::Favorites),
            "SchemrFavorites.sublime-settings"
        );
        assert_eq!(
            settings_file_name(&Scope::Syntax("Python".to_string())),
            "Python.sublime-settings"
        );
    }

    #[test]
    fn test_parse_accepts_comments_and_trailing_commas() {
        let values = assert_ok!(parse_settings(
            r#"
            // user preferences
            {
                "color_scheme": "Packages/A/Monokai.tmTheme", /* active */
                "url": "http://example.com//path",
                "ignored_packages": ["Vintage", "Markdown",],
            }
            "#
        ));
        assert_eq!(values["color_scheme"], json!("Packages/A/Monokai.tmTheme"));
        assert_eq!(values["url"], json!("http://example.com//path"));
        assert_eq!(values["ignored_packages"], json!(["Vintage", "Markdown"]));
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert_err!(parse_settings("[1, 2]"));
        assert_err!(parse_settings("{ nope"));
        assert!(assert_ok!(parse_settings("  \n")).is_empty());
        assert!(assert_ok!(parse_settings("\u{FEFF}{}")).is_empty());
    }

    #[test]
    fn test_escaped_quotes_do_not_end_strings() {
        let values = assert_ok!(parse_settings(r#"{"a": "say \"hi\", // not a comment"}"#));
        assert_eq!(values["a"], json!("say \"hi\", // not a comment"));
    }
}
