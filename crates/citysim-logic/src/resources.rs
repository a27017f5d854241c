//! Resource bookkeeping — the persistent resource table and the turn-wide
//! delta that is committed into it.
//!
//! Quantities are `i64`. Keys are resource-kind names; iteration order is
//! alphabetical so that reports and exported state are stable between runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Resource stockpiles for a session, keyed by resource kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceTable(BTreeMap<String, i64>);

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current amount of `kind`, 0 if the key does not exist yet.
    pub fn get(&self, kind: &str) -> i64 {
        self.0.get(kind).copied().unwrap_or(0)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.0.contains_key(kind)
    }

    /// Insert `kind` at zero if absent. Never overwrites an existing value.
    pub fn ensure_key(&mut self, kind: &str) {
        if !self.0.contains_key(kind) {
            self.0.insert(kind.to_string(), 0);
        }
    }

    /// Add `amount` to `kind`, creating the key at zero first.
    pub fn add(&mut self, kind: &str, amount: i64) {
        let entry = self.0.entry(kind.to_string()).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Commit a turn delta. This is the only place production reaches the table.
    pub fn apply(&mut self, delta: &ResourceDelta) {
        for (kind, amount) in delta.iter() {
            self.add(kind, amount);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for ResourceTable {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Production accumulated over every city during one turn, before commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceDelta(BTreeMap<String, i64>);

impl ResourceDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulate(&mut self, kind: &str, amount: i64) {
        let entry = self.0.entry(kind.to_string()).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    pub fn get(&self, kind: &str) -> i64 {
        self.0.get(kind).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum over all resource kinds.
    pub fn total(&self) -> i64 {
        self.0.values().fold(0i64, |acc, v| acc.saturating_add(*v))
    }
}
