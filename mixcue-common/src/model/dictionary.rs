//! Genre and subgenre lookup dictionaries
//!
//! Both dictionaries are derived from ingested songs and contain only names
//! observed in at least one song. The genre dictionary maps a genre name to
//! its remote catalog id; the subgenre dictionary counts occurrences and
//! supports presentation-side hiding without losing the counts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Genre name → remote catalog genre id
///
/// Insertion is last-write-wins for a repeated name. Names are expected to
/// map to a stable id; the dictionary does not enforce consistency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenreDictionary {
    entries: HashMap<String, String>,
}

impl GenreDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, id: impl Into<String>) {
        self.entries.insert(name.into(), id.into());
    }

    pub fn get_id(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Genre names, sorted for stable presentation
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Subgenre name → occurrence count across all ingested songs
///
/// Absent names count as zero. A hidden entry stores its count negated so
/// unhiding can restore it; hidden entries are skipped by every read-side
/// accessor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubgenreDictionary {
    counts: HashMap<String, i64>,
}

impl SubgenreDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of a subgenre name
    pub fn record(&mut self, name: impl Into<String>) {
        *self.counts.entry(name.into()).or_insert(0) += 1;
    }

    /// Occurrence count for a name (0 when absent or hidden)
    pub fn count(&self, name: &str) -> u64 {
        match self.counts.get(name) {
            Some(&n) if n > 0 => n as u64,
            _ => 0,
        }
    }

    /// Whether a subgenre is present and visible
    pub fn exists(&self, name: &str) -> bool {
        self.count(name) > 0
    }

    /// Remove entries whose name is also a top-level genre
    pub fn clean<'a, I>(&mut self, genre_names: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in genre_names {
            self.counts.remove(name);
        }
    }

    /// Hide every visible entry with a count below `threshold`
    pub fn hide_below(&mut self, threshold: u64) {
        for value in self.counts.values_mut() {
            if *value > 0 && (*value as u64) < threshold {
                *value = -*value;
            }
        }
    }

    /// Restore all hidden entries to visibility
    pub fn unhide_all(&mut self) {
        for value in self.counts.values_mut() {
            *value = value.abs();
        }
    }

    /// Visible names containing `needle`
    pub fn subgenres_of(&self, needle: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .counts
            .iter()
            .filter(|&(name, &count)| count > 0 && name.contains(needle))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Visible subgenre names, sorted for stable presentation
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .counts
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Visible entry count
    pub fn len(&self) -> usize {
        self.counts.values().filter(|&&count| count > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
