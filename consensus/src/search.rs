//! The exact branch-and-bound search that completes a partial consensus clustering.
use crate::Cancelled;
use common::Control;
use partition::{distance_to_collection, ClusterId, Element, Partition, PartitionCollection};

/// Completes `partial` into an optimal consensus clustering of `collection`.
///
/// The returned partition has minimum total distance to the collection over all total
/// completions of `partial`; this exactness is the whole point of the search, there are no
/// heuristics. An empty `partial` is seeded with the collection's element set; an empty
/// collection yields the empty partition.
///
/// Cancellation is polled at the entry of every recursive call and unwinds with
/// `Err(Cancelled)`. The progress gauge moves monotonically from 0 to 1; each recursion
/// level splits its interval evenly over the explored branches.
pub fn complete_search<T: Element>(
    collection: &PartitionCollection<T>,
    partial: &Partition<T>,
    control: Control<'_>,
) -> Result<Partition<T>, Cancelled> {
    if partial.is_empty() {
        let seeded = collection.unclustered_template();
        if seeded.is_empty() {
            return Ok(seeded);
        }
        return branch(collection, &seeded, control, 0.0, 1.0);
    }
    branch(collection, partial, control, 0.0, 1.0)
}

fn branch<T: Element>(
    collection: &PartitionCollection<T>,
    current: &Partition<T>,
    control: Control<'_>,
    current_pc: f64,
    max_pc: f64,
) -> Result<Partition<T>, Cancelled> {
    if control.is_cancelled() {
        return Err(Cancelled);
    }

    // the first unclustered element in element order is the branching variable; a fixed
    // choice keeps results and progress accounting reproducible
    let element = match current.first_unclustered() {
        Some(element) => element.clone(),
        None => return Ok(current.clone()),
    };

    // place the element into each existing cluster plus one new cluster
    let branches = current.num_clusters() + 1;
    let step = (max_pc - current_pc) / branches as f64;
    let mut best: Option<(u64, Partition<T>)> = None;

    for cluster in 1..=branches {
        let sub_start = current_pc + (cluster - 1) as f64 * step;
        let mut candidate = current.clone();
        candidate.assign(element.clone(), ClusterId::from(cluster as u32));

        let completed = branch(collection, &candidate, control, sub_start, sub_start + step)?;

        // increases below one percent are not worth reporting
        if max_pc - (sub_start + step) > 0.01 {
            control.set_progress(sub_start + step);
        }

        let dist = distance_to_collection(&completed, collection);
        if best
            .as_ref()
            .map_or(true, |(best_dist, _)| dist < *best_dist)
        {
            best = Some((dist, completed));
        }
        // a perfect match cannot be improved, stop exploring the siblings
        if matches!(best, Some((0, _))) {
            break;
        }
    }
    control.set_progress(max_pc);

    let (_, best_partition) = best.expect("at least one branch is explored");
    Ok(best_partition)
}
