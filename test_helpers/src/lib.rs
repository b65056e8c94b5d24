#![cfg_attr(feature = "strict", deny(warnings))]
#![cfg_attr(feature = "strict", deny(clippy::all))]
#![cfg_attr(feature = "strict", deny(missing_docs))]
//! This crate contains stuff that's really helpful for tests: proptest strategies
//! producing partitions and collections over a shared element set.
//!
//! Elements are plain `u32`s, which is all the algorithms ever require of them.
use partition::{ClusterId, Partition, PartitionCollection};
use proptest::prelude::*;

/// Builds a partition over the elements `0..choices.len()` from one uniform choice per
/// element: each element joins a uniformly chosen existing cluster or opens a new one, so
/// cluster ids come out dense.
fn partition_from_choices(choices: &[f64]) -> Partition<u32> {
    let mut result = Partition::new();
    let mut max_cluster = 0u32;
    for (element, choice) in choices.iter().enumerate() {
        let cluster = 1 + (choice * f64::from(max_cluster + 1)) as u32;
        if cluster > max_cluster {
            max_cluster = cluster;
        }
        result.assign(element as u32, ClusterId::from(cluster));
    }
    result
}

/// Gives a strategy generating a fully clustered partition over exactly `len` elements.
pub fn partition_with_len(len: usize) -> impl Strategy<Value = Partition<u32>> {
    prop::collection::vec(0.0f64..1.0, len)
        .prop_map(|choices| partition_from_choices(&choices))
}

/// Gives a strategy generating a fully clustered partition over at most `max_elements`
/// elements (and at least one).
pub fn partition(max_elements: usize) -> impl Strategy<Value = Partition<u32>> {
    (1..=max_elements).prop_flat_map(partition_with_len)
}

/// Gives a strategy generating two partitions over the identical element set.
pub fn two_partitions(
    max_elements: usize,
) -> impl Strategy<Value = (Partition<u32>, Partition<u32>)> {
    (1..=max_elements).prop_flat_map(|len| (partition_with_len(len), partition_with_len(len)))
}

/// Gives a strategy generating a non-empty collection of up to `max_partitions` partitions
/// over one shared element set of up to `max_elements` elements.
pub fn same_key_collection(
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
