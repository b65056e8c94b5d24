#![cfg_attr(feature = "strict", deny(warnings))]
#![cfg_attr(feature = "strict", deny(clippy::all))]
#![cfg_attr(feature = "strict", deny(missing_docs))]

//! This crate contains everything related directly to partitions: the model of a single
//! clustering, collections of clusterings over a shared element set, the pairwise
//! disagreement distance and the merge utility.

mod partition;
pub use crate::partition::*;

mod collection;
pub use collection::PartitionCollection;

mod distance;
pub use distance::{avg_distance, distance, distance_to_collection};

mod merge;
pub use merge::merge;
