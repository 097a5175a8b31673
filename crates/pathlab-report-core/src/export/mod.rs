//! Export functionality for result summaries.

mod summary;

pub use summary::*;
