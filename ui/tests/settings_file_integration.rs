use claims::{assert_err, assert_ok};
use engine::settings::{COLOR_SCHEME_KEY, Scope, SettingsStore, active_scheme, erase_scheme, save_scheme};
use engine::SchemeError;
use schemr::settings_file::{JsonSettingsStore, PREFERENCES_FILE};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_values_survive_a_new_store() {
    let dir = TempDir::new().unwrap();

    let mut store = JsonSettingsStore::new(dir.path());
    assert_ok!(save_scheme(&mut store, &Scope::Global, "Packages/A/Monokai.tmTheme"));

    let reopened = JsonSettingsStore::new(dir.path());
    assert_eq!(
        active_scheme(&reopened, &Scope::Global).as_deref(),
        Some("Packages/A/Monokai.tmTheme")
    );
    assert!(!dir.path().join("Preferences.sublime-settings.tmp").exists());
}

#[test]
fn test_unpersisted_changes_stay_in_memory() {
    let dir = TempDir::new().unwrap();

    let mut store = JsonSettingsStore::new(dir.path());
    store.set(&Scope::Global, COLOR_SCHEME_KEY, json!("Packages/A/Dawn.tmTheme"));
    assert_eq!(
        store.get(&Scope::Global, COLOR_SCHEME_KEY),
        Some(json!("Packages/A/Dawn.tmTheme"))
    );
    assert!(!store.path_for(&Scope::Global).exists());
}

#[test]
fn test_syntax_scope_has_its_own_file() {
    let dir = TempDir::new().unwrap();
    let python = Scope::Syntax("Python".to_string());

    let mut store = JsonSettingsStore::new(dir.path());
    assert_ok!(save_scheme(&mut store, &python, "Packages/A/Zenburn.tmTheme"));

    assert_eq!(
        read_json(&dir.path().join("Python.sublime-settings")),
        json!({ "color_scheme": "Packages/A/Zenburn.tmTheme" })
    );
    assert!(!dir.path().join(PREFERENCES_FILE).exists());
}

#[test]
fn test_erase_keeps_other_keys() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(PREFERENCES_FILE),
        "{\n  // editor font\n  \"font_size\": 11,\n  \"color_scheme\": \"Packages/A/Dawn.tmTheme\",\n}\n",
    )
    .unwrap();

    let mut store = JsonSettingsStore::new(dir.path());
    assert_ok!(erase_scheme(&mut store, &Scope::Global));

    let preferences = read_json(&dir.path().join(PREFERENCES_FILE));
    assert_eq!(preferences["font_size"].as_f64(), Some(11.0));
    assert!(preferences.get(COLOR_SCHEME_KEY).is_none());
}

#[test]
fn test_malformed_file_is_not_overwritten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(PREFERENCES_FILE);
    fs::write(&path, "{ \"font_size\": 11").unwrap();

    let mut store = JsonSettingsStore::new(dir.path());
    assert_eq!(active_scheme(&store, &Scope::Global), None);

    let error = assert_err!(save_scheme(&mut store, &Scope::Global, "Packages/A/Dawn.tmTheme"));
    assert!(matches!(error, SchemeError::Settings(_)));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ \"font_size\": 11");
}

#[test]
fn test_missing_directory_is_created_on_persist() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("Packages").join("User");

    let mut store = JsonSettingsStore::new(&nested);
    assert_ok!(save_scheme(&mut store, &Scope::Favorites, "Packages/A/Dawn.tmTheme"));
    assert!(nested.join("SchemrFavorites.sublime-settings").is_file());
}
