//! Domain models for pathology report rendering.

mod classification;
mod range;
mod report;

pub use classification::*;
pub use range::*;
pub use report::*;
