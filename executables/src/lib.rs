#![cfg_attr(feature = "strict", deny(warnings))]
#![cfg_attr(feature = "strict", deny(clippy::all))]
#![cfg_attr(feature = "strict", deny(missing_docs))]

//! This crate contains helper functions that are used exclusively in defining binaries:
//! the line-oriented interchange format for clustering instances and random instance
//! generation.

pub mod format;
pub mod random;
