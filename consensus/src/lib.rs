#![cfg_attr(feature = "strict", deny(warnings))]
#![cfg_attr(feature = "strict", deny(clippy::all))]
#![cfg_attr(feature = "strict", deny(missing_docs))]

//! This crate computes exact consensus clusterings: given a collection of partitions over
//! one element set, it finds a partition with minimum total disagreement distance to the
//! collection.
//!
//! [consensus_clustering] is the entry point. It alternates kernelization passes
//! ([apply_preprocessing]) until they stabilize and hands the remaining partial partition
//! to the exact branch-and-bound search ([complete_search]). Everything is synchronous and
//! single-threaded; hosts drive cancellation and progress through the two cells of a
//! [common::Control], which the algorithms poll cooperatively at the granularities
//! documented on each function. Callers must not run two computations over the same
//! mutable partition concurrently.

mod relation;
pub use relation::{classify_pair, ItemInfo, Relation, RelationTable};

mod preprocess;
pub use preprocess::apply_preprocessing;

mod search;
pub use search::complete_search;

use common::Control;
use partition::{Element, Partition, PartitionCollection};

/// The computation observed a raised cancellation flag and aborted.
///
/// This is deliberately distinct from the empty partition a trivial input produces, so
/// callers can tell "nothing to do" apart from "aborted mid-computation".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cancelled;

/// The outcome of a consensus computation: the partition, or [Cancelled].
pub type SearchResult<T> = Result<Partition<T>, Cancelled>;

/// How much kernelization to run before the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preprocessing {
    /// Hand the instance to the search untouched.
    Off,
    /// Run at most this many passes, stopping early once a pass commits nothing.
    Bounded(usize),
    /// Repeat passes until the clustered element count stops growing.
    ToFixedPoint,
}

/// Configuration of [consensus_clustering].
#[derive(Clone, Copy, Debug)]
pub struct ConsensusConfig {
    /// The preprocessing mode, [Preprocessing::ToFixedPoint] by default.
    pub preprocessing: Preprocessing,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            preprocessing: Preprocessing::ToFixedPoint,
        }
    }
}

/// Computes a partition with minimum sum of distances to all partitions of `collection`.
///
/// All partitions are assumed to range over the same element set (which
/// [PartitionCollection] enforces on construction). The progress gauge restarts at 0 for
/// every preprocessing pass and once more for the search; a host that wants one combined
/// gauge samples the cell and scales it itself.
pub fn consensus_clustering<T: Element>(
    collection: &PartitionCollection<T>,
    config: &ConsensusConfig,
    control: Control<'_>,
) -> SearchResult<T> {
    let max_passes = match config.preprocessing {
        Preprocessing::Off => 0,
        Preprocessing::Bounded(passes) => passes,
        Preprocessing::ToFixedPoint => usize::MAX,
    };

    let mut partial = Partition::new();
    let mut clustered = 0;
    for pass in 0..max_passes {
        partial = apply_preprocessing(collection, &partial, control)?;
        let now_clustered = partial.clustered_elements().len();
        log::info!(
            "preprocessing pass {} fixed {} of {} elements",
            pass + 1,
            now_clustered,
            partial.len()
        );
        // each pass either grows the clustered set or the loop stops, so this terminates
        // after at most as many passes as there are elements
        if now_clustered == clustered {
            break;
        }
        clustered = now_clustered;
    }

    let remaining = if partial.is_empty() {
        collection.elements().len()
    } else {
        partial.unclustered_elements().len()
    };
    log::info!("starting branch-and-bound over {} unclustered elements", remaining);
    complete_search(collection, &partial, control)
}
