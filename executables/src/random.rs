//! Random clustering instances, useful for demos and for fuzzing the core.
use partition::{ClusterId, Element, Partition};
use rand::Rng;
use std::collections::BTreeSet;

/// Generates a random partition over the given elements.
///
/// Walking the elements in order, each one joins a uniformly chosen existing cluster or
/// opens a brand-new one, so cluster ids come out dense. With `allow_unclustered` the
/// choice includes leaving the element unclustered.
pub fn random_partition<T: Element, R: Rng>(
    elements: &BTreeSet<T>,
    allow_unclustered: bool,
    rng: &mut R,
) -> Partition<T> {
    let mut result = Partition::new();
    let mut max_cluster = 0u32;
    for element in elements {
        let cluster = if allow_unclustered {
            rng.gen_range(0..=max_cluster + 1)
        } else {
            rng.gen_range(1..=max_cluster + 1)
        };
        if cluster > max_cluster {
            max_cluster = cluster;
        }
        result.assign(element.clone(), ClusterId::from(cluster));
    }
    result
}
