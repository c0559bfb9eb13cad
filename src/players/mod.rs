// Player data aggregation: the core of the backend.
//
// Pipeline: roster feed + stats feed + ADP feeds -> defensive normalization
// -> fantasy point scoring -> one merged record per player -> per-season
// cache -> position filter.

pub mod aggregator;
pub mod cache;
pub mod coerce;
pub mod record;
pub mod sample;
pub mod scoring;

pub use aggregator::Aggregator;
pub use record::{AdpEntry, PlayerRecord, Position, PositionFilter};
