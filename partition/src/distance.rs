//! The pairwise disagreement distance between partitions and its aggregates.
use crate::collection::PartitionCollection;
use crate::partition::{Element, Partition};
use itertools::Itertools;

/// Returns the number of unordered element pairs on which `a` and `b` disagree.
///
/// A pair disagrees if it is co-clustered in one partition but not in the other. Both
/// partitions must range over the same element set. Runs in O(n²) over the element count.
///
/// Unclustered elements are mutually co-clustered (they share id `0`), so two partitions
/// that leave the same pair unclustered agree on that pair.
pub fn distance<T: Element>(a: &Partition<T>, b: &Partition<T>) -> u64 {
    a.elements()
        .tuple_combinations()
        .filter(|(i, j)| a.co_clustered(i, j) != b.co_clustered(i, j))
        .count() as u64
}

/// Returns the sum of [distance]s between `a` and every partition of the collection.
pub fn distance_to_collection<T: Element>(
    a: &Partition<T>,
    collection: &PartitionCollection<T>,
) -> u64 {
    collection.iter().map(|c| distance(a, c)).sum()
}

/// Returns the average distance of a collection.
///
/// Sums the distance of every unordered pair of partitions (exploiting that the distance
/// is symmetric and zero on the diagonal) and returns twice that sum divided by the
/// collection size. Note the divisor is the collection size, not the pair count.
pub fn avg_distance<T: Element>(collection: &PartitionCollection<T>) -> f64 {
    let mut accu = 0u64;
    for (i, a) in collection.iter().enumerate() {
        for b in collection.iter().skip(i + 1) {
            accu += distance(a, b);
        }
    }
    ((accu << 1) as f64) / (collection.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::ClusterId;
    use assert_approx_eq::assert_approx_eq;
    use itertools::Itertools;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn set(elements: &[&str]) -> BTreeSet<String> {
        elements.iter().map(|s| s.to_string()).collect()
    }

    /// A partition over the elements `0..ids.len()` with the given raw cluster ids;
    /// id 0 leaves the element unclustered. Density does not matter for distances.
    fn partition_from_ids(ids: &[u32]) -> Partition<u32> {
        let mut partition = Partition::new();
        for (element, id) in ids.iter().enumerate() {
            partition.assign(element as u32, ClusterId::from(*id));
        }
        partition
    }

    fn partition_with_len(len: usize) -> impl Strategy<Value = Partition<u32>> {
        prop::collection::vec(0u32..4, len).prop_map(|ids| partition_from_ids(&ids))
    }

    fn two_partitions(
        max_elements: usize,
    ) -> impl Strategy<Value = (Partition<u32>, Partition<u32>)> {
        (1..=max_elements)
            .prop_flat_map(|len| (partition_with_len(len), partition_with_len(len)))
    }

    fn same_key_collection(
        max_elements: usize,
        max_partitions: usize,
    ) -> impl Strategy<Value = PartitionCollection<u32>> {
        (1..=max_elements)
            .prop_flat_map(move |len| {
                prop::collection::vec(partition_with_len(len), 1..=max_partitions)
            })
            .prop_map(|partitions| {
                PartitionCollection::from_partitions(partitions)
                    .expect("the strategy generates one shared element set")
            })
    }

    /// C1 = {a:1, b:1, c:2}, C2 = {a:1, b:2, c:2}: the pairs (a,b) and (b,c) disagree,
    /// (a,c) agrees, so the distance is 2.
    #[test]
    fn distance_concrete_scenario() {
        let mut c1 = Partition::from_elements(set(&["a", "b", "c"]));
        c1.add_cluster(&set(&["a", "b"]));
        c1.add_cluster(&set(&["c"]));
        let mut c2 = Partition::from_elements(set(&["a", "b", "c"]));
        c2.add_cluster(&set(&["a"]));
        c2.add_cluster(&set(&["b", "c"]));

        assert_eq!(distance(&c1, &c2), 2);
        assert_eq!(distance(&c2, &c1), 2);
    }

    #[test]
    fn distance_is_zero_for_relabeled_ids() {
        let mut c1 = Partition::from_elements(set(&["a", "b", "c"]));
        c1.add_cluster(&set(&["a", "b"]));
        c1.add_cluster(&set(&["c"]));
        // the same grouping, but the clusters were created in the other order
        let mut c2 = Partition::from_elements(set(&["a", "b", "c"]));
        c2.add_cluster(&set(&["c"]));
        c2.add_cluster(&set(&["a", "b"]));

        assert_eq!(distance(&c1, &c2), 0);
    }

    #[test]
    fn unclustered_pairs_count_as_agreeing() {
        let c1: Partition<String> = Partition::from_elements(set(&["a", "b"]));
        let c2: Partition<String> = Partition::from_elements(set(&["a", "b"]));
        assert_eq!(distance(&c1, &c2), 0);
    }

    #[test]
    fn avg_distance_of_single_partition_is_zero() {
        let mut c1 = Partition::from_elements(set(&["a", "b", "c"]));
        c1.add_cluster(&set(&["a", "b"]));
        let collection = PartitionCollection::from_partitions(vec![c1]).unwrap();
        assert_approx_eq!(avg_distance(&collection), 0.0);
    }

    #[test]
    fn avg_distance_uses_the_collection_size_as_divisor() {
        let mut c1 = Partition::from_elements(set(&["a", "b", "c"]));
        c1.add_cluster(&set(&["a", "b"]));
        c1.add_cluster(&set(&["c"]));
        let mut c2 = Partition::from_elements(set(&["a", "b", "c"]));
        c2.add_cluster(&set(&["a"]));
        c2.add_cluster(&set(&["b", "c"]));

        let collection = PartitionCollection::from_partitions(vec![c1, c2]).unwrap();
        // one pair at distance 2, doubled, divided by the two partitions
        assert_approx_eq!(avg_distance(&collection), 2.0);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric((a, b) in two_partitions(6)) {
            prop_assert_eq!(distance(&a, &b), distance(&b, &a));
        }

        #[test]
        fn distance_is_zero_iff_co_clustering_agrees((a, b) in two_partitions(6)) {
            let same_relation = a
                .elements()
                .tuple_combinations()
                .all(|(i, j)| a.co_clustered(i, j) == b.co_clustered(i, j));
            prop_assert_eq!(distance(&a, &b) == 0, same_relation);
        }

        #[test]
        fn distance_to_collection_is_the_sum(collection in same_key_collection(5, 4)) {
            if let Some(first) = collection.get(0) {
                let sum: u64 = collection.iter().map(|c| distance(first, c)).sum();
                prop_assert_eq!(distance_to_collection(first, &collection), sum);
            }
        }
    }
}
