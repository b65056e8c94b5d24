//! The kernelization pass that commits provably-correct clusters before the search.
use crate::relation::RelationTable;
use crate::Cancelled;
use common::Control;
use partition::{Element, Partition, PartitionCollection};
use std::collections::BTreeSet;

/// Runs one preprocessing pass over the unclustered elements of `partial`.
///
/// Implements Rule 1 of the Betzler et al. kernelization: every equivalence class of
/// predominantly co-clustered elements whose clean part outweighs its dirty pairs must be
/// a cluster of every optimal consensus clustering, so it is committed right away. The
/// caller repeats passes until the clustered element count stops growing.
///
/// An empty `partial` is seeded with the collection's element set, all unclustered; with an
/// empty collection the empty partition is returned unchanged.
///
/// Cancellation is polled once per examined pair and once per examined element; a tripped
/// flag yields `Err(Cancelled)`, discarding the partial progress of this pass. The progress
/// gauge runs from 0 to 1 over `|U| * (|U| + 1) / 2` steps, the pair triangular number plus
/// one step per element.
pub fn apply_preprocessing<T: Element>(
    collection: &PartitionCollection<T>,
    partial: &Partition<T>,
    control: Control<'_>,
) -> Result<Partition<T>, Cancelled> {
    let mut optimal = partial.clone();
    if optimal.is_empty() {
        if collection.is_empty() {
            return Ok(optimal);
        }
        optimal = collection.unclustered_template();
    }

    let unclustered = optimal.unclustered_elements();
    if unclustered.is_empty() {
        return Ok(optimal);
    }

    let total_steps = (unclustered.len() * (unclustered.len() + 1)) / 2;
    let mut steps = 0usize;

    let mut table = RelationTable::build(collection, &unclustered, || {
        control.set_progress(steps as f64 / total_steps as f64);
        if control.is_cancelled() {
            return Err(Cancelled);
        }
        steps += 1;
        Ok(())
    })?;

    // walk the elements in their total order and commit every equivalence class whose
    // clean part outweighs its dirty pairs
    for element in &unclustered {
        control.set_progress(steps as f64 / total_steps as f64);
        if control.is_cancelled() {
            return Err(Cancelled);
        }

        if !table.is_accounted(element) && !table.is_dirty(element) {
            let candidate = table.equivalence_class(element);
            let dirty_overlap: BTreeSet<T> = candidate
                .intersection(table.global_dirty())
                .cloned()
                .collect();
            let clean_len = candidate.len() - dirty_overlap.len();

            if clean_len > table.num_dirty_pairs(&dirty_overlap) {
                log::debug!(
                    "committing an equivalence class of {} elements as cluster {}",
                    candidate.len(),
                    optimal.num_clusters() + 1
                );
                optimal.add_cluster(&candidate);
                for member in &candidate {
                    table.mark_accounted(member);
                }
            }
        }
        steps += 1;
    }
    control.set_progress(steps as f64 / total_steps as f64);

    Ok(optimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::logging::init_test_logging;
    use common::{CancelCell, ProgressCell};
    use partition::distance_to_collection;
    use std::collections::BTreeSet;

    fn set(elements: &[&str]) -> BTreeSet<String> {
        elements.iter().map(|s| s.to_string()).collect()
    }

    fn unanimous_collection() -> PartitionCollection<String> {
        let mut partitions = Vec::new();
        for _ in 0..3 {
            let mut p = Partition::from_elements(set(&["a", "b", "c", "d"]));
            p.add_cluster(&set(&["a", "b"]));
            p.add_cluster(&set(&["c", "d"]));
            partitions.push(p);
        }
        PartitionCollection::from_partitions(partitions).unwrap()
    }

    #[test]
    fn empty_collection_yields_the_empty_partition() {
        let collection: PartitionCollection<String> = PartitionCollection::new();
        let result =
            apply_preprocessing(&collection, &Partition::new(), Control::none()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn unanimous_instance_is_solved_by_preprocessing_alone() {
        init_test_logging();
        let collection = unanimous_collection();
        let result =
            apply_preprocessing(&collection, &Partition::new(), Control::none()).unwrap();

        assert!(result.is_complete());
        assert_eq!(result.num_clusters(), 2);
        assert_eq!(distance_to_collection(&result, &collection), 0);
    }

    #[test]
    fn preprocessing_is_idempotent_on_its_own_output() {
        let collection = unanimous_collection();
        let once = apply_preprocessing(&collection, &Partition::new(), Control::none()).unwrap();
        let twice = apply_preprocessing(&collection, &once, Control::none()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn dirty_elements_are_not_committed() {
        init_test_logging();
        // the two partitions split the pair (a, b) evenly, so it is dirty and both
        // elements are skipped
        let mut agree = Partition::from_elements(set(&["a", "b"]));
        agree.add_cluster(&set(&["a", "b"]));
        let mut disagree = Partition::from_elements(set(&["a", "b"]));
        disagree.add_cluster(&set(&["a"]));
        disagree.add_cluster(&set(&["b"]));
        let collection = PartitionCollection::from_partitions(vec![agree, disagree]).unwrap();

        let result =
            apply_preprocessing(&collection, &Partition::new(), Control::none()).unwrap();
        assert_eq!(result.num_clusters(), 0);
        assert_eq!(result.unclustered_elements(), set(&["a", "b"]));
    }

    #[test]
    fn pre_set_cancellation_flag_aborts_immediately() {
        let collection = unanimous_collection();
        let cancel = CancelCell::new();
        let progress = ProgressCell::new();
        cancel.cancel();

        let result = apply_preprocessing(
            &collection,
            &Partition::new(),
            Control::new(Some(&cancel), Some(&progress)),
        );

        assert_eq!(result.unwrap_err(), Cancelled);
        // the flag was observed before any step completed
        assert_eq!(progress.get(), 0.0);
    }

    #[test]
    fn progress_reaches_one_on_a_full_pass() {
        let collection = unanimous_collection();
        let progress = ProgressCell::new();

        apply_preprocessing(
            &collection,
            &Partition::new(),
            Control::new(None, Some(&progress)),
        )
        .unwrap();

        assert_eq!(progress.get(), 1.0);
    }
}
