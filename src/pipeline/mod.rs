//! Pipeline module - loading, filtering and the three dashboard aggregates

pub mod correlation;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod histogram;
pub mod loader;
pub mod rates;

pub use correlation::*;
pub use dashboard::*;
pub use dataset::*;
pub use error::*;
pub use filter::*;
pub use histogram::*;
pub use loader::*;
pub use rates::*;
