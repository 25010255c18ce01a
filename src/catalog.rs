//! Gesture catalog loading
//!
//! The catalog is a plain text file, one `label,kind` record per line.
//! Lines starting with `#` are comments, blank lines are skipped, and both
//! fields are trimmed of surrounding whitespace. A file that yields zero
//! entries is rejected rather than silently producing a session with no
//! prompts.

use std::fs;
use std::path::Path;

use log::info;

use crate::error::TrainError;
use crate::types::GestureCatalogEntry;

/// Immutable gesture catalog for one training session
#[derive(Debug, Clone)]
pub struct GestureCatalog {
    entries: Vec<GestureCatalogEntry>,
}

impl GestureCatalog {
    /// Build a catalog from pre-parsed entries. Rejects duplicates and
    /// empty sets with the same errors as file loading.
    pub fn new(entries: Vec<GestureCatalogEntry>) -> Result<Self, TrainError> {
        if entries.is_empty() {
            return Err(TrainError::EmptyCatalog);
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.label == entry.label) {
                return Err(TrainError::CatalogFormat {
                    line: i + 1,
                    reason: format!("duplicate label \"{}\"", entry.label),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Load and parse a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TrainError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let catalog = Self::parse(&text)?;
        info!(
            "loaded {} gestures from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse catalog text
    pub fn parse(text: &str) -> Result<Self, TrainError> {
        let mut entries = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (label, kind) = line.split_once(',').ok_or(TrainError::CatalogFormat {
                line: idx + 1,
                reason: "expected \"label,kind\"".into(),
            })?;
            let label = label.trim();
            let kind = kind.trim();
            if label.is_empty() || kind.is_empty() {
                return Err(TrainError::CatalogFormat {
                    line: idx + 1,
                    reason: "label and kind must be non-empty".into(),
                });
            }
            if entries
                .iter()
                .any(|e: &GestureCatalogEntry| e.label == label)
            {
                return Err(TrainError::CatalogFormat {
                    line: idx + 1,
                    reason: format!("duplicate label \"{label}\""),
                });
            }
            entries.push(GestureCatalogEntry {
                label: label.to_string(),
                kind: kind.to_string(),
            });
        }
        if entries.is_empty() {
            return Err(TrainError::EmptyCatalog);
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn entries(&self) -> &[GestureCatalogEntry] {
        &self.entries
    }

    /// Look up the kind tag for a label
    pub fn kind_of(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.kind.as_str())
    }

    /// Whether the label names a static gesture
    pub fn is_static(&self, label: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.label == label && e.is_static())
    }
}
