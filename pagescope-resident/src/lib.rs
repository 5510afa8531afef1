//! Page-cache residency inspection
//!
//! Answers "how much of this file sits in the page cache right now"
//! without perturbing the cache: the file is mapped `PROT_NONE` and the
//! kernel is asked page by page via `mincore(2)`.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod probe;
pub mod stats;

pub use probe::{file_residency, page_size};
pub use stats::ResidencyStats;
