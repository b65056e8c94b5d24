//! Combining two partial partitions into one.
use crate::partition::{ClusterId, Element, Partition};

/// Merges two partitions assumed to range over the same key domain.
///
/// All of `a` is copied verbatim into the result; if `merge_unclustered` is not set, `a`'s
/// unclustered elements are dropped. `b`'s non-zero clusters are then appended as new
/// clusters with fresh ids above `a`'s maximum, preserving `b`'s grouping but not its
/// numeric ids; elements of `b` that are already present in the result stay where they are.
/// `b`'s unclustered elements are folded in only if `merge_unclustered` is set.
///
/// This composes partial results from different passes or instances; the main
/// preprocessing/search orchestration never calls it.
pub fn merge<T: Element>(
    a: &Partition<T>,
    b: &Partition<T>,
    merge_unclustered: bool,
) -> Partition<T> {
    let mut result = Partition::new();
    for (element, id) in a.iter() {
        if !id.is_unclustered() || merge_unclustered {
            result.assign(element.clone(), id);
        }
    }

    for (id, mut members) in b.clusters() {
        members.retain(|member| !result.contains(member));
        if members.is_empty() {
            continue;
        }
        if id.is_unclustered() {
            if merge_unclustered {
                for member in members {
                    result.assign(member, ClusterId::UNCLUSTERED);
                }
            }
        } else {
            result.add_cluster(&members);
        }
    }
    result
}
