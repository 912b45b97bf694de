//! Timeline views over a match's event list.
//!
//! - [`frames`]: one-minute buckets for the scrubber
//! - [`vision`]: which wards are on the map at a given instant

mod frames;
mod vision;

pub use frames::*;
pub use vision::*;
