//! paxsat: Passenger Satisfaction Explorer
//!
//! A library and terminal dashboard for exploring airline passenger
//! satisfaction survey data through an age histogram, a satisfaction rate
//! breakdown and a ranking of service features by correlation with
//! satisfaction.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
