//! Common functionality for invplan.
//!
//! invplan formulates a multi-period, multi-location inventory-balancing linear
//! program from raw order data and solves it with the HiGHS solver.
#![warn(missing_docs)]
pub mod cli;
pub mod demand;
pub mod id;
pub mod index;
pub mod input;
pub mod location;
pub mod log;
pub mod model;
pub mod optimisation;
pub mod output;
pub mod settings;

#[cfg(test)]
mod fixture;
