//! Majority-vote classification of element pairs across a collection of partitions.
use crate::Cancelled;
use itertools::Itertools;
use partition::{Element, PartitionCollection};
use std::collections::{BTreeMap, BTreeSet};

/// The classification of an unordered element pair relative to a partition collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    /// Co-clustered in more than two thirds of the partitions.
    PredominantlyCo,
    /// Co-clustered in less than one third of the partitions.
    PredominantlyAnti,
    /// Neither a strong majority nor a strong minority.
    Dirty,
    /// Not recorded in the table.
    Unknown,
}

/// Classifies a pair from its co-clustering count `co_count` over `collection_size`
/// partitions.
///
/// Thresholds use truncating integer division: `co_count < collection_size / 3` is
/// predominantly anti, `co_count > (2 * collection_size) / 3` is predominantly co,
/// everything in between is dirty. With `collection_size == 0` every pair comes out dirty;
/// callers short-circuit empty collections before classifying.
pub fn classify_pair(co_count: usize, collection_size: usize) -> Relation {
    if co_count < collection_size / 3 {
        Relation::PredominantlyAnti
    } else if co_count > (2 * collection_size) / 3 {
        Relation::PredominantlyCo
    } else {
        Relation::Dirty
    }
}

/// Per-element metadata for one preprocessing pass: the sets of *other* elements this
/// element is predominantly co-clustered with, predominantly anti-clustered with, and
/// dirty with, plus whether the element was already committed this pass.
///
/// Rebuilt from scratch every pass, never persisted.
#[derive(Clone, Debug)]
pub struct ItemInfo<T: Element> {
    pred_co_with: BTreeSet<T>,
    pred_anti_with: BTreeSet<T>,
    dirty_with: BTreeSet<T>,
    accounted_for: bool,
}

impl<T: Element> Default for ItemInfo<T> {
    fn default() -> Self {
        Self {
            pred_co_with: BTreeSet::new(),
            pred_anti_with: BTreeSet::new(),
            dirty_with: BTreeSet::new(),
            accounted_for: false,
        }
    }
}

impl<T: Element> ItemInfo<T> {
    fn seeded(element: T) -> Self {
        let mut info = Self::default();
        // every element is predominantly co-clustered with itself
        info.pred_co_with.insert(element);
        info
    }

    /// The elements this one is predominantly co-clustered with, including itself.
    pub fn pred_co_with(&self) -> &BTreeSet<T> {
        &self.pred_co_with
    }

    /// The elements this one is predominantly anti-clustered with.
    pub fn pred_anti_with(&self) -> &BTreeSet<T> {
        &self.pred_anti_with
    }

    /// The elements this one forms a dirty pair with.
    pub fn dirty_with(&self) -> &BTreeSet<T> {
        &self.dirty_with
    }
}

/// The relation table of one preprocessing pass: an [ItemInfo] per unclustered element and
/// the global set of elements that appear in at least one dirty pair.
#[derive(Clone, Debug)]
pub struct RelationTable<T: Element> {
    infos: BTreeMap<T, ItemInfo<T>>,
    global_dirty: BTreeSet<T>,
}

impl<T: Element> Default for RelationTable<T> {
    fn default() -> Self {
        Self {
            infos: BTreeMap::new(),
            global_dirty: BTreeSet::new(),
        }
    }
}

impl<T: Element> RelationTable<T> {
    /// Classifies every unordered pair of `unclustered` elements against the collection.
    ///
    /// `on_pair` runs once before each pair is examined; the preprocessing pass uses it to
    /// poll cancellation and to advance its progress gauge. Returning `Err` from it aborts
    /// the build immediately.
    pub fn build<F>(
        collection: &PartitionCollection<T>,
        unclustered: &BTreeSet<T>,
        mut on_pair: F,
    ) -> Result<Self, Cancelled>
    where
        F: FnMut() -> Result<(), Cancelled>,
    {
        let mut table = Self::default();
        for element in unclustered {
            table
                .infos
                .insert(element.clone(), ItemInfo::seeded(element.clone()));
        }

        let size = collection.len();
        for (i, j) in unclustered.iter().tuple_combinations() {
            on_pair()?;
            let co_count = collection.iter().filter(|c| c.co_clustered(i, j)).count();
            table.record(i, j, classify_pair(co_count, size));
        }
        Ok(table)
    }

    fn record(&mut self, a: &T, b: &T, relation: Relation) {
        match relation {
            Relation::PredominantlyCo => {
                self.info_mut(a).pred_co_with.insert(b.clone());
                self.info_mut(b).pred_co_with.insert(a.clone());
            }
            Relation::PredominantlyAnti => {
                self.info_mut(a).pred_anti_with.insert(b.clone());
                self.info_mut(b).pred_anti_with.insert(a.clone());
            }
            Relation::Dirty => {
                self.info_mut(a).dirty_with.insert(b.clone());
                self.info_mut(b).dirty_with.insert(a.clone());
                self.global_dirty.insert(a.clone());
                self.global_dirty.insert(b.clone());
            }
            Relation::Unknown => {}
        }
    }

    fn info_mut(&mut self, element: &T) -> &mut ItemInfo<T> {
        self.infos.entry(element.clone()).or_default()
    }

    /// Looks up the recorded relation of `a` and `b`.
    pub fn relation(&self, a: &T, b: &T) -> Relation {
        match self.infos.get(a) {
            Some(info) if info.pred_co_with.contains(b) => Relation::PredominantlyCo,
            Some(info) if info.pred_anti_with.contains(b) => Relation::PredominantlyAnti,
            Some(info) if info.dirty_with.contains(b) => Relation::Dirty,
            _ => Relation::Unknown,
        }
    }

    /// Returns the set of elements `element` is predominantly co-clustered with,
    /// including `element` itself. Empty for an element that was never classified.
    pub fn equivalence_class(&self, element: &T) -> BTreeSet<T> {
        self.infos
            .get(element)
            .map(|info| info.pred_co_with.clone())
            .unwrap_or_default()
    }

    /// Returns whether `element` appears in at least one dirty pair.
    pub fn is_dirty(&self, element: &T) -> bool {
        self.global_dirty.contains(element)
    }

    /// The set of all elements that appear in at least one dirty pair.
    pub fn global_dirty(&self) -> &BTreeSet<T> {
        &self.global_dirty
    }

    /// Returns whether `element` was already committed to a cluster this pass.
    pub fn is_accounted(&self, element: &T) -> bool {
        self.infos
            .get(element)
            .map_or(false, |info| info.accounted_for)
    }

    /// Marks `element` as committed for the remainder of this pass.
    pub fn mark_accounted(&mut self, element: &T) {
        self.info_mut(element).accounted_for = true;
    }

    /// Sums `|dirty_with|` over the given elements.
    ///
    /// A pair with both endpoints inside `elements` contributes twice. This per-element
    /// accounting is what the kernelization rule compares against; it must not be
    /// de-duplicated.
    pub fn num_dirty_pairs(&self, elements: &BTreeSet<T>) -> usize {
        elements
            .iter()
            .filter_map(|element| self.infos.get(element))
            .map(|info| info.dirty_with.len())
            .sum()
    }
}
