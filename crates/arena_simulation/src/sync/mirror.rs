//! Generic keyed mirror authoritative коллекции
//!
//! Каждый проход пересобирает map из полного snapshot'а: id описывается
//! заново (старые поля перезаписываются), отсутствующие в snapshot'е id
//! пропадают. Excluded id (локальный игрок) туда не попадает никогда.
//! Повторное применение того же snapshot'а даёт тот же mirror.

use bevy::prelude::*;
use std::collections::BTreeMap;

/// Entry, который можно поставить в мир как mirrored entity
pub trait MirrorEntry: Clone + PartialEq + Send + Sync + 'static {
    fn transform(&self) -> Transform;
}

/// Что изменилось за один проход reconciliation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub added: Vec<String>,
    /// Оставшиеся id с изменённым описанием
    pub updated: Vec<String>,
    pub removed: Vec<String>,
}

impl ReconcileReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

#[derive(Resource, Debug, Clone)]
pub struct Mirror<D: MirrorEntry> {
    entries: BTreeMap<String, D>,
    generation: u64,
    /// Размер последнего snapshot'а до exclusion
    source_count: usize,
}

impl<D: MirrorEntry> Default for Mirror<D> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            generation: 0,
            source_count: 0,
        }
    }
}

/// Равны при совпадении entries; generation counter не участвует
impl<D: MirrorEntry> PartialEq for Mirror<D> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<D: MirrorEntry> Mirror<D> {
    /// Заменить mirror свежим описанием `snapshot`
    pub fn reconcile<W>(
        &mut self,
        snapshot: &BTreeMap<String, W>,
        exclude: Option<&str>,
        describe: impl Fn(&str, &W) -> D,
    ) -> ReconcileReport {
        let fresh: BTreeMap<String, D> = snapshot
            .iter()
            .filter(|(id, _)| Some(id.as_str()) != exclude)
            .map(|(id, wire)| (id.clone(), describe(id, wire)))
            .collect();

        let mut report = ReconcileReport::default();
        for (id, entry) in &fresh {
            match self.entries.get(id) {
                None => report.added.push(id.clone()),
                Some(previous) if previous != entry => report.updated.push(id.clone()),
                Some(_) => {}
            }
        }
        report.removed = self
            .entries
            .keys()
            .filter(|id| !fresh.contains_key(*id))
            .cloned()
            .collect();

        self.entries = fresh;
        self.generation += 1;
        self.source_count = snapshot.len();
        report
    }

    pub fn get(&self, id: &str) -> Option<&D> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &D)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reconciliation passes applied so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn source_count(&self) -> usize {
        self.source_count
    }
}
