//! Core data models for match analytics.

mod event;
mod ids;
mod match_data;
mod metrics;
mod region;
mod summoner;

pub use event::*;
pub use ids::*;
pub use match_data::*;
pub use metrics::*;
pub use region::*;
pub use summoner::*;
