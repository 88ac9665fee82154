//! Preview-then-commit selection over a quick panel.
//!
//! A [`PreviewSession`] walks through `Open -> Previewing* -> Committed |
//! Cancelled`. Highlighting applies the scheme tentatively without persisting
//! it; confirming persists it; cancelling restores what was active when the
//! session was opened.

use crate::common::{SchemeError, SchemeResult};
use crate::model::{CatalogEntry, PanelItem};
use crate::selector::current_index;
use crate::settings::{Scope, SettingsStore, active_scheme, apply_scheme, erase_scheme, save_scheme};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    Open,
    Previewing,
    Committed,
    Cancelled,
}

impl PreviewState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PreviewState::Committed | PreviewState::Cancelled)
    }
}

impl fmt::Display for PreviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PreviewState::Open => "open",
            PreviewState::Previewing => "previewing",
            PreviewState::Committed => "committed",
            PreviewState::Cancelled => "cancelled",
        };
        write!(f, "{name}")
    }
}

/// Result of [`PreviewSession::on_confirm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    Committed { id: String, label: String },
    /// `restored` is the scheme put back, `None` when the key was erased.
    Cancelled { restored: Option<String> },
}

impl PreviewOutcome {
    /// Status line for the host: `Scheme: <label>` after a commit.
    pub fn status_message(&self) -> Option<String> {
        match self {
            PreviewOutcome::Committed { label, .. } => Some(format!("Scheme: {label}")),
            PreviewOutcome::Cancelled { .. } => None,
        }
    }
}

pub struct PreviewSession<'a> {
    settings: &'a mut dyn SettingsStore,
    scope: Scope,
    entries: Vec<CatalogEntry>,
    items: Vec<PanelItem>,
    original: Option<String>,
    initial_index: usize,
    preview: bool,
    first_highlight_seen: bool,
    /// Index of the entry applied tentatively, if any.
    previewing: Option<usize>,
    state: PreviewState,
}

impl<'a> PreviewSession<'a> {
    /// Captures the active scheme of `scope` and positions the panel on it.
    pub fn open(
        settings: &'a mut dyn SettingsStore,
        scope: Scope,
        entries: Vec<CatalogEntry>,
        preview: bool,
    ) -> SchemeResult<Self> {
        if entries.is_empty() {
            return Err(SchemeError::EmptyCatalog);
        }

        let original = active_scheme(&*settings, &scope);
        let initial_index = current_index(&entries, original.as_deref());
        let items = entries.iter().map(PanelItem::from).collect();
        log::debug!(
            "Opened picker for {scope} with {} entries at index {initial_index}",
            entries.len()
        );

        Ok(Self {
            settings,
            scope,
            entries,
            items,
            original,
            initial_index,
            preview,
            first_highlight_seen: false,
            previewing: None,
            state: PreviewState::Open,
        })
    }

    pub fn items(&self) -> &[PanelItem] {
        &self.items
    }

    pub fn initial_index(&self) -> usize {
        self.initial_index
    }

    pub fn state(&self) -> PreviewState {
        self.state
    }

    /// Scheme active when the session was opened.
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    pub fn preview_enabled(&self) -> bool {
        self.preview
    }

    /// Entry currently applied as a live preview. Always `None` when preview
    /// is disabled.
    pub fn previewing(&self) -> Option<&CatalogEntry> {
        self.previewing.and_then(|index| self.entries.get(index))
    }

    /// Applies the highlighted scheme without persisting it.
    ///
    /// The first highlight is the panel reporting its initial position and is
    /// ignored.
    pub fn on_highlight(&mut self, index: usize) -> SchemeResult<()> {
        self.ensure_open()?;
        let id = self.entry_id(index)?;

        if !self.first_highlight_seen {
            self.first_highlight_seen = true;
            return Ok(());
        }

        self.state = PreviewState::Previewing;
        if self.preview {
            apply_scheme(self.settings, &self.scope, &id);
            self.previewing = Some(index);
        }
        Ok(())
    }

    /// `Some(index)` commits that entry, `None` cancels the session.
    pub fn on_confirm(&mut self, selection: Option<usize>) -> SchemeResult<PreviewOutcome> {
        self.ensure_open()?;
        match selection {
            Some(index) => self.commit(index),
            None => self.cancel(),
        }
    }

    fn commit(&mut self, index: usize) -> SchemeResult<PreviewOutcome> {
        let id = self.entry_id(index)?;
        let label = self.items[index].label.clone();

        save_scheme(self.settings, &self.scope, &id)?;
        self.previewing = None;
        self.state = PreviewState::Committed;
        log::info!("Committed scheme {id} in {}", self.scope);
        Ok(PreviewOutcome::Committed { id, label })
    }

    fn cancel(&mut self) -> SchemeResult<PreviewOutcome> {
        match self.original.clone() {
            Some(original) => save_scheme(self.settings, &self.scope, &original)?,
            None => erase_scheme(self.settings, &self.scope)?,
        }
        self.previewing = None;
        self.state = PreviewState::Cancelled;
        log::debug!("Picker cancelled, restored {:?} in {}", self.original, self.scope);
        Ok(PreviewOutcome::Cancelled {
            restored: self.original.clone(),
        })
    }

    fn ensure_open(&self) -> SchemeResult<()> {
        if self.state.is_terminal() {
            return Err(SchemeError::SessionClosed);
        }
        Ok(())
    }

    fn entry_id(&self, index: usize) -> SchemeResult<String> {
        self.entries
            .get(index)
            .map(|entry| entry.id().to_string())
            .ok_or(SchemeError::SelectionOutOfRange {
                index,
                len: self.entries.len(),
            })
    }
}
