pub mod cache;
pub mod showcase;
pub mod snapshot;
