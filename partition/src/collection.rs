//! An ordered collection of partitions over one shared element set.
use crate::partition::{Element, Partition};
use common::{CcError, CcResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An ordered sequence of [Partition]s, all defined over the identical element set.
///
/// The order is significant for display and serialization only, not for the algorithms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionCollection<T: Element> {
    partitions: Vec<Partition<T>>,
}

impl<T: Element> PartitionCollection<T> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self {
            partitions: Vec::new(),
        }
    }

    /// Creates a collection from the given partitions.
    /// # Returns
    /// An `Err` if any two partitions range over different element sets.
    pub fn from_partitions(partitions: Vec<Partition<T>>) -> CcResult<Self> {
        let mut collection = Self::new();
        for partition in partitions {
            collection.push(partition)?;
        }
        Ok(collection)
    }

    /// Appends a partition.
    /// # Returns
    /// An `Err` if its element set differs from the collection's.
    pub fn push(&mut self, partition: Partition<T>) -> CcResult<()> {
        if let Some(first) = self.partitions.first() {
            if !first.same_elements(&partition) {
                return Err(CcError::from(
                    "partition is not over the collection's element set",
                ));
            }
        }
        self.partitions.push(partition);
        Ok(())
    }

    /// Returns the number of partitions.
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    /// Returns whether the collection holds no partitions.
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Iterates over the partitions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Partition<T>> {
        self.partitions.iter()
    }

    /// Returns the partition at `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<&Partition<T>> {
        self.partitions.get(index)
    }

    /// Returns the shared element set, empty for an empty collection.
    pub fn elements(&self) -> BTreeSet<T> {
        self.partitions
            .first()
            .map(|partition| partition.elements().cloned().collect())
            .unwrap_or_default()
    }

    /// Creates an all-unclustered partition over the shared element set.
    pub fn unclustered_template(&self) -> Partition<T> {
        Partition::from_elements(self.elements())
    }

    /// Removes `element` from every partition in the collection.
    pub fn remove_element(&mut self, element: &T) {
        for partition in &mut self.partitions {
            partition.remove_element(element);
        }
    }

    /// Removes a whole set of elements from every partition in the collection.
    pub fn remove_elements(&mut self, elements: &BTreeSet<T>) {
        for element in elements {
            self.remove_element(element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn set(elements: &[&str]) -> BTreeSet<String> {
        elements.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn push_rejects_foreign_element_sets() {
        let mut collection = PartitionCollection::new();
        collection
            .push(Partition::from_elements(set(&["a", "b"])))
            .unwrap();

        assert!(collection
            .push(Partition::from_elements(set(&["a", "c"])))
            .is_err());
        assert!(collection
            .push(Partition::from_elements(set(&["a"])))
            .is_err());
        assert!(collection
            .push(Partition::from_elements(set(&["a", "b"])))
            .is_ok());
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn remove_element_is_propagated() {
        let mut first = Partition::from_elements(set(&["a", "b", "c"]));
        first.add_cluster(&set(&["a", "b"]));
        let second = Partition::from_elements(set(&["a", "b", "c"]));
        let mut collection = PartitionCollection::from_partitions(vec![first, second]).unwrap();

        collection.remove_element(&"b".to_string());
        for partition in collection.iter() {
            assert!(!partition.contains(&"b".to_string()));
            assert_eq!(partition.len(), 2);
        }
    }

    #[test]
    fn elements_of_empty_collection_are_empty() {
        let collection: PartitionCollection<String> = PartitionCollection::new();
        assert!(collection.elements().is_empty());
        assert!(collection.unclustered_template().is_empty());
    }
}
