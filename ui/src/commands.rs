use crate::cli::Commands;
use crate::config::AppConfig;
use crate::config::setup;
use crate::error::{AppError, AppResult};
use crate::picker::QuickPanel;
use crate::scope::resolve_scope;
use crate::settings_file::JsonSettingsStore;
use engine::SchemeManager;
use engine::lister::{ArchiveLister, BuiltinLister, CompositeLister, DirectoryLister, ResourceLister};
use engine::selector::CycleFilter;
use engine::settings::{Scope, SettingsStore};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Manager used by the binary: loose packages, then installed bundles, then
/// the built-in schemes, with settings in the editor's `User` package.
pub type CliManager = SchemeManager<CompositeLister, JsonSettingsStore>;

pub fn build_lister(config: &AppConfig) -> CompositeLister {
    let paths = config.paths();
    let mut lister = CompositeLister::new()
        .with_backend(DirectoryLister::new(paths.packages_dir()))
        .with_backend(ArchiveLister::new(paths.installed_packages_dir()));
    if config.catalog().include_builtin() {
        lister = lister.with_backend(BuiltinLister::new());
    }
    lister
}

pub fn build_manager(config: &AppConfig) -> AppResult<CliManager> {
    let settings = JsonSettingsStore::new(config.paths().settings_dir());
    log::debug!("Reading settings from {}", settings.dir().display());

    Ok(SchemeManager::new(build_lister(config), settings)
        .with_config(config.catalog_config()?)
        .with_preview_selection(config.catalog().preview_selection()))
}

/// Runs a scheme command against the real terminal. The picker draws on
/// stderr so stdout only carries the result.
pub fn run(command: &Commands, config: &AppConfig) -> AppResult<()> {
    let mut manager = build_manager(config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    execute(
        &mut manager,
        command,
        &mut stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
}

/// Writes the default config into `config_dir` unless one exists.
pub fn init(config_dir: &Path, out: &mut dyn Write) -> AppResult<()> {
    let path = setup::initialize_config_dir_at(config_dir)?;
    writeln!(out, "Config file: {}", path.display())?;
    Ok(())
}

/// Executes a scheme command. Results go to `out`; the interactive picker
/// reads `input` and draws on `panel`.
pub fn execute<L: ResourceLister, S: SettingsStore>(
    manager: &mut SchemeManager<L, S>,
    command: &Commands,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    panel: &mut dyn Write,
) -> AppResult<()> {
    match command {
        Commands::List { favorites, json } => list(manager, *favorites, *json, out),
        Commands::Current { syntax } => current(manager, &resolve_scope(syntax.as_deref())?, out),
        Commands::Cycle {
            direction,
            favorites,
            filter,
            syntax,
        } => {
            let scope = resolve_scope(syntax.as_deref())?;
            if *favorites && !manager.can_cycle_favorites() {
                return Err(AppError::Scheme(
                    "Cycling favorites needs at least two favorites".to_string(),
                ));
            }
            let filter = CycleFilter {
                favorites_only: *favorites,
                name_contains: filter.clone(),
            };
            let chosen = manager.cycle(&scope, *direction, &filter)?;
            writeln!(out, "Scheme: {}", chosen.label())?;
            Ok(())
        }
        Commands::Favorite => {
            if manager.is_current_favorite() {
                writeln!(out, "Already a favorite")?;
                return Ok(());
            }
            match manager.favorite_current()? {
                Some(id) => writeln!(out, "Added favorite: {id}")?,
                None => return Err(not_in_catalog()),
            }
            Ok(())
        }
        Commands::Unfavorite => {
            if !manager.is_current_favorite() {
                writeln!(out, "Not a favorite")?;
                return Ok(());
            }
            match manager.unfavorite_current()? {
                Some(id) => writeln!(out, "Removed favorite: {id}")?,
                None => return Err(not_in_catalog()),
            }
            Ok(())
        }
        Commands::Pick {
            favorites,
            syntax,
            no_preview,
        } => {
            let scope = resolve_scope(syntax.as_deref())?;
            if *favorites && !manager.can_list_favorites() {
                return Err(AppError::Scheme("No favorites yet".to_string()));
            }
            let preview = !*no_preview && manager.preview_enabled();
            let mut session = manager.open_picker_with(scope, *favorites, preview)?;
            let outcome = QuickPanel::new(input, &mut *panel).run(&mut session)?;

            match outcome.status_message() {
                Some(message) => writeln!(out, "{message}")?,
                None => writeln!(panel, "Cancelled")?,
            }
            Ok(())
        }
        Commands::Reset { syntax } => {
            let scope = resolve_scope(Some(syntax))?;
            if !manager.has_scheme(&scope) {
                writeln!(out, "No color scheme set for {scope}")?;
                return Ok(());
            }
            if let Some(previous) = manager.reset_scheme(&scope)? {
                writeln!(out, "Reset {scope} (was {previous})")?;
            }
            Ok(())
        }
        Commands::Init => Err(AppError::Config(
            "init does not operate on schemes".to_string(),
        )),
    }
}

fn list<L: ResourceLister, S: SettingsStore>(
    manager: &SchemeManager<L, S>,
    favorites: bool,
    json: bool,
    out: &mut dyn Write,
) -> AppResult<()> {
    let catalog = if favorites {
        manager.favorite_catalog()
    } else {
        manager.load_catalog()
    };
    if json {
        let document = serde_json::to_string_pretty(catalog.entries())
            .map_err(|e| AppError::Scheme(format!("Cannot encode catalog: {e}")))?;
        writeln!(out, "{document}")?;
        return Ok(());
    }
    if catalog.is_empty() {
        let what = if favorites { "favorites" } else { "color schemes" };
        writeln!(out, "No {what} found")?;
        return Ok(());
    }

    let active = manager
        .active_scheme(&Scope::Global)
        .and_then(|id| catalog.find_by_identity(&id).map(|entry| entry.id().to_string()));
    for entry in &catalog {
        let marker = if active.as_deref() == Some(entry.id()) { '*' } else { ' ' };
        writeln!(out, "{marker} {}", entry.label())?;
    }
    Ok(())
}

fn current<L: ResourceLister, S: SettingsStore>(
    manager: &SchemeManager<L, S>,
    scope: &Scope,
    out: &mut dyn Write,
) -> AppResult<()> {
    let Some(id) = manager.active_scheme(scope) else {
        writeln!(out, "No color scheme set for {scope}")?;
        return Ok(());
    };

    let catalog = manager.load_catalog();
    match catalog.find_by_identity(&id) {
        Some(entry) => writeln!(out, "{}\t{id}", entry.label())?,
        None => writeln!(out, "{id} (not installed)")?,
    }
    Ok(())
}

fn not_in_catalog() -> AppError {
    AppError::Scheme("The active color scheme is not in the catalog".to_string())
}
