//! Top navigation bar built from the dataset directory.
//!
//! Every immediate subdirectory of the data root becomes one entry. The
//! listing is taken once at startup; datasets added later are not picked up
//! until the server restarts.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("Cannot read data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Name the navigation bar is registered under in the page templates.
pub const NAVBAR_ID: &str = "frontend_top";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Lock,
    Unlock,
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavIcon {
    pub kind: IconKind,
    pub src: &'static str,
    pub height: u32,
    pub width: u32,
}

pub const LOCK_ICON: NavIcon = NavIcon { kind: IconKind::Lock, src: "/static/img/lock.png", height: 20, width: 20 };
pub const UNLOCK_ICON: NavIcon = NavIcon { kind: IconKind::Unlock, src: "/static/img/unlock.png", height: 20, width: 20 };
pub const SEPARATOR_ICON: NavIcon = NavIcon { kind: IconKind::Separator, src: "/static/img/separate.png", height: 25, width: 10 };

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub name: String,
    pub href: String,
    pub separator_before: bool,
    // Both icons are always attached; nothing decides yet which dataset is private.
    pub icons: [NavIcon; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub id: &'static str,
    pub separator: NavIcon,
    pub entries: Vec<NavEntry>,
}

impl Navigation {
    /// Scan `data_dir` for dataset directories.
    pub fn scan(data_dir: &Path) -> Result<Self, NavigationError> {
        let read_err = |source: std::io::Error| NavigationError::DataDir { path: data_dir.to_path_buf(), source };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(data_dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            if !entry.path().is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::warn!(name = ?raw, "skipping dataset directory with non UTF-8 name"),
            }
        }
        names.sort();

        tracing::info!(data_dir = %data_dir.display(), datasets = names.len(), "built navigation");
        Ok(Self::from_names(names))
    }

    pub fn from_names(names: impl IntoIterator<Item = String>) -> Self {
        let entries = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| NavEntry {
                href: format!("/{name}"),
                name,
                separator_before: i > 0,
                icons: [LOCK_ICON, UNLOCK_ICON],
            })
            .collect();

        Self { id: NAVBAR_ID, separator: SEPARATOR_ICON, entries }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}
