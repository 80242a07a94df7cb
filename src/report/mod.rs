//! Report module - rendering and exporting dashboard snapshots

pub mod export;
pub mod summary;

pub use export::*;
pub use summary::*;
