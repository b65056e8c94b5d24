//! This module contains the model of a single clustering.
use derive_more::{From, Into};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::hash::Hash;

/// The identifier of a cluster inside a [Partition].
///
/// Id `0` is reserved and means "not yet assigned to any cluster". Positive ids are kept
/// dense (`1..=k` for `k` clusters) by [Partition::add_cluster], the only operation that
/// creates clusters; ids are never reused after a cluster vanishes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Serialize, Deserialize,
)]
pub struct ClusterId(u32);

impl ClusterId {
    /// The reserved sentinel for elements that are not part of any cluster yet.
    pub const UNCLUSTERED: ClusterId = ClusterId(0);

    /// Returns whether this is the unclustered sentinel.
    pub fn is_unclustered(self) -> bool {
        self.0 == 0
    }
}

/// The bounds every element type has to satisfy.
///
/// Elements are opaque identifiers: totally ordered (this order drives every deterministic
/// enumeration in preprocessing and search), hashable and cheap to clone.
pub trait Element: Ord + Hash + Clone + Debug {}
impl<T: Ord + Hash + Clone + Debug> Element for T {}

/// A partition (clustering) of a finite element set: a mapping from element to [ClusterId].
///
/// Elements mapped to [ClusterId::UNCLUSTERED] are not part of any cluster yet. Two elements
/// are *co-clustered* iff their ids are equal; this includes the case where both are still
/// unclustered, a deliberate property the distance computation relies on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition<T: Element> {
    assignment: BTreeMap<T, ClusterId>,
}

impl<T: Element> Partition<T> {
    /// Creates a partition without any elements.
    pub fn new() -> Self {
        Self {
            assignment: BTreeMap::new(),
        }
    }

    /// Creates a partition where every given element is unclustered.
    pub fn from_elements(elements: impl IntoIterator<Item = T>) -> Self {
        Self {
            assignment: elements
                .into_iter()
                .map(|element| (element, ClusterId::UNCLUSTERED))
                .collect(),
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    /// Returns whether the partition contains no elements at all.
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// Iterates over all elements in their total order.
    ///
    /// The iterator is `Clone`, so pair enumerations can fan it out.
    pub fn elements(&self) -> impl Iterator<Item = &T> + Clone {
        self.assignment.keys()
    }

    /// Iterates over all `(element, id)` entries in element order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, ClusterId)> {
        self.assignment.iter().map(|(element, id)| (element, *id))
    }

    /// Returns whether `element` is contained in this partition.
    pub fn contains(&self, element: &T) -> bool {
        self.assignment.contains_key(element)
    }

    /// Returns the cluster id of `element`.
    ///
    /// An element that is absent from the partition is reported as
    /// [ClusterId::UNCLUSTERED]. The distance computation relies on this after elements
    /// have been removed from a single partition of a collection.
    pub fn cluster_of(&self, element: &T) -> ClusterId {
        self.assignment
            .get(element)
            .copied()
            .unwrap_or(ClusterId::UNCLUSTERED)
    }

    /// Assigns `element` to `id` directly, inserting the element if it was absent.
    ///
    /// This is the low-level mutator used by the branch-and-bound search, which only ever
    /// assigns ids in `1..=num_clusters() + 1` and thereby keeps positive ids dense. Other
    /// callers should prefer [Partition::add_cluster].
    pub fn assign(&mut self, element: T, id: ClusterId) {
        self.assignment.insert(element, id);
    }

    /// Adds a brand-new cluster containing exactly the given elements.
    ///
    /// The new cluster gets id `num_clusters() + 1`, so positive ids stay dense. Elements
    /// not yet present in the partition are inserted.
    pub fn add_cluster(&mut self, members: &BTreeSet<T>) {
        let id = ClusterId::from(self.num_clusters() as u32 + 1);
        for member in members {
            self.assignment.insert(member.clone(), id);
        }
    }

    /// Removes `element` from the partition entirely.
    pub fn remove_element(&mut self, element: &T) {
        self.assignment.remove(element);
    }

    /// Removes a whole set of elements from the partition.
    pub fn remove_elements(&mut self, elements: &BTreeSet<T>) {
        for element in elements {
            self.remove_element(element);
        }
    }

    /// Returns the number of clusters, that is the number of distinct non-zero ids.
    pub fn num_clusters(&self) -> usize {
        self.assignment
            .values()
            .filter(|id| !id.is_unclustered())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Returns all elements that are already assigned to a cluster.
    pub fn clustered_elements(&self) -> BTreeSet<T> {
        self.assignment
            .iter()
            .filter(|(_, id)| !id.is_unclustered())
            .map(|(element, _)| element.clone())
            .collect()
    }

    /// Returns all elements that are not assigned to a cluster yet.
    pub fn unclustered_elements(&self) -> BTreeSet<T> {
        self.assignment
            .iter()
            .filter(|(_, id)| id.is_unclustered())
            .map(|(element, _)| element.clone())
            .collect()
    }

    /// Returns the first unclustered element in element order, if any.
    pub fn first_unclustered(&self) -> Option<&T> {
        self.assignment
            .iter()
            .find(|(_, id)| id.is_unclustered())
            .map(|(element, _)| element)
    }

    /// Returns whether every element is assigned to a cluster.
    pub fn is_complete(&self) -> bool {
        self.first_unclustered().is_none()
    }

    /// Returns whether `a` and `b` are co-clustered, that is mapped to equal ids.
    ///
    /// Two unclustered elements count as co-clustered.
    pub fn co_clustered(&self, a: &T, b: &T) -> bool {
        self.cluster_of(a) == self.cluster_of(b)
    }

    /// Returns whether `other` is defined over exactly the same element set.
    pub fn same_elements(&self, other: &Self) -> bool {
        self.len() == other.len() && self.elements().all(|element| other.contains(element))
    }

    /// Groups the elements by cluster id, including the unclustered group under id `0`.
    pub fn clusters(&self) -> BTreeMap<ClusterId, BTreeSet<T>> {
        let mut clusters: BTreeMap<ClusterId, BTreeSet<T>> = BTreeMap::new();
        for (element, id) in &self.assignment {
            clusters.entry(*id).or_default().insert(element.clone());
        }
        clusters
    }
}
