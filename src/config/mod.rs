//! Validated configuration consumed by the simulation engines.

mod pool_snapshot;

pub use pool_snapshot::PoolSnapshot;
