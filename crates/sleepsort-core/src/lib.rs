//! Sleep sort core - Fundamental types and primitives
//!
//! This crate defines the types shared by the sorter and its driver:
//! - Unit scale and delay conversion
//! - Delay tasks and input validation
//! - Error taxonomy

pub mod time;
pub mod task;
pub mod error;

pub use time::*;
pub use task::*;
pub use error::*;
