//! JSON snapshot persistence.
//!
//! A [`Snapshot`] bundles the fact store and the conversation journal
//! into one flat JSON file. No locking: last writer wins.

use crate::{InMemory, Journal};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A persisted memory snapshot.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Snapshot {
    /// Stored facts.
    pub facts: InMemory,

    /// Conversation journal.
    pub journal: Journal,

    /// Where this snapshot loads from and saves to.
    #[serde(skip)]
    path: PathBuf,
}

impl Snapshot {
    /// Load a snapshot from a JSON file.
    ///
    /// A missing file yields an empty snapshot; a corrupt file is
    /// replaced by an empty snapshot with a warning, matching the
    /// best-effort behavior the labs expect. Any other read failure is
    /// an error, so an unreadable snapshot is never overwritten by a
    /// later save.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let snapshot = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Snapshot>(&text) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    tracing::warn!("discarding corrupt memory snapshot {}: {err}", path.display());
                    Snapshot::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("reading memory snapshot {}", path.display()));
            }
        };

        Ok(Snapshot { path, ..snapshot })
    }

    /// Save the snapshot to its file as pretty JSON.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(&self.path, text)
            .with_context(|| format!("writing memory snapshot {}", self.path.display()))
    }

    /// Drop all facts and turns, keeping the file path.
    pub fn clear(&mut self) {
        self.facts = InMemory::new();
        self.journal.clear();
    }

    /// The snapshot's file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
